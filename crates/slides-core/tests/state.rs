// File: crates/slides-core/tests/state.rs
// Purpose: ChartState transitions: toggles, zoom validation, annotations.

mod common;

use common::{date, two_series, walking_running_rows};
use slides_core::{ChartError, ChartState};

#[test]
fn defaults_after_load() {
    let st = ChartState::from_data(&walking_running_rows());
    assert!(st.disabled_categories().is_empty());
    assert!(st.zoom_domain().is_none());
    assert!(st.annotations_visible());
    assert_eq!(st.categories(), &["Walking".to_string(), "Running".to_string()]);
}

#[test]
fn double_toggle_restores_disabled_set() {
    let mut st = ChartState::from_data(&walking_running_rows());
    st.toggle_category("Running").unwrap();
    let before = st.disabled_categories().clone();
    st.toggle_category("Walking").unwrap();
    st.toggle_category("Walking").unwrap();
    assert_eq!(st.disabled_categories(), &before);
    assert!(!st.is_enabled("Running"));
    assert_eq!(st.enabled_categories(), vec!["Walking"]);
}

#[test]
fn unknown_category_is_rejected() {
    let mut st = ChartState::from_data(&walking_running_rows());
    let err = st.toggle_category("Rowing").unwrap_err();
    assert!(matches!(err, ChartError::UnknownCategory(ref k) if k == "Rowing"));
    assert!(st.disabled_categories().is_empty());
}

#[test]
fn zoom_is_validated_and_replaced() {
    let mut st = ChartState::from_data(&two_series());
    st.set_zoom(date(2021, 10, 5), date(2021, 10, 20)).unwrap();
    let first = st.zoom_domain();

    // inverted
    assert!(matches!(
        st.set_zoom(date(2021, 10, 25), date(2021, 10, 10)),
        Err(ChartError::InvalidZoomRange { .. })
    ));
    // entirely outside the loaded extent
    assert!(st.set_zoom(date(2022, 1, 1), date(2022, 2, 1)).is_err());
    assert!(st.set_zoom(date(2020, 1, 1), date(2020, 2, 1)).is_err());
    // overlaps the extent only at its last instant
    assert!(matches!(
        st.set_zoom(date(2021, 11, 1), date(2021, 11, 15)),
        Err(ChartError::InvalidZoomRange { .. })
    ));
    assert!(st.set_zoom(date(2021, 9, 1), date(2021, 10, 1)).is_err());
    assert_eq!(st.zoom_domain(), first);

    st.set_zoom(date(2021, 10, 10), date(2021, 10, 12)).unwrap();
    assert_eq!(st.zoom_domain().unwrap().start, date(2021, 10, 10));
}

#[test]
fn overhanging_zoom_stays_inside_extent() {
    let mut st = ChartState::from_data(&two_series());
    st.set_zoom(date(2021, 10, 15), date(2021, 11, 15)).unwrap();
    let z = st.zoom_domain().unwrap();
    let full = st.full_extent().unwrap();
    assert_eq!(z.start, date(2021, 10, 15));
    assert_eq!(z.end, full.end);
}

#[test]
fn clear_zoom_is_idempotent() {
    let mut st = ChartState::from_data(&two_series());
    st.set_zoom(date(2021, 10, 2), date(2021, 10, 3)).unwrap();
    st.clear_zoom();
    st.clear_zoom();
    assert!(st.zoom_domain().is_none());
    assert_eq!(st.visible_domain(), st.full_extent());
}

#[test]
fn zoom_without_time_data_fails() {
    let mut st = ChartState::from_data(&walking_running_rows());
    assert!(st.set_zoom(date(2021, 1, 1), date(2021, 2, 1)).is_err());
}

#[test]
fn annotation_flag() {
    let mut st = ChartState::from_data(&two_series());
    st.toggle_annotations();
    assert!(!st.annotations_visible());
    st.set_annotations(false);
    st.set_annotations(false);
    assert!(!st.annotations_visible());
    st.toggle_annotations();
    assert!(st.annotations_visible());
}
