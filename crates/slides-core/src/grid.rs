// File: crates/slides-core/src/grid.rs
// Summary: Tick layout helpers (even spacing, 1/2/5 "nice" steps).

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Step of the form {1, 2, 5} x 10^k giving roughly `count` intervals over `span`.
pub fn nice_step(span: f64, count: usize) -> f64 {
    if !(span > 0.0) || count == 0 { return 1.0; }
    let raw = span / count as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let err = raw / mag;
    let f = if err >= 7.07 { 10.0 } else if err >= 3.16 { 5.0 } else if err >= 1.41 { 2.0 } else { 1.0 };
    f * mag
}

/// Expand `[min, max]` outward to multiples of the nice step.
pub fn nice_domain(min: f64, max: f64, count: usize) -> (f64, f64) {
    if !(max > min) { return (min, max); }
    let step = nice_step(max - min, count);
    ((min / step).floor() * step, (max / step).ceil() * step)
}

/// Tick values at nice-step multiples inside `[min, max]`.
pub fn ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    if !(max > min) {
        return if min.is_finite() { vec![min] } else { Vec::new() };
    }
    let step = nice_step(max - min, count);
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_steps_and_domains() {
        assert_eq!(nice_step(100.0, 10), 10.0);
        assert_eq!(nice_step(1.0, 5), 0.2);
        assert_eq!(nice_domain(0.0, 187.0, 10), (0.0, 200.0));
        assert_eq!(nice_domain(0.0, 120.0, 10), (0.0, 120.0));
        assert_eq!(ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
    }
}
