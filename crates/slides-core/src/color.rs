// File: crates/slides-core/src/color.rs
// Summary: Backend-neutral RGBA color with hex parsing; serialized as "#rrggbb" / "#rrggbbaa".

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let h = s.trim().trim_start_matches('#');
        let byte = |i: usize| u8::from_str_radix(h.get(i..i + 2)?, 16).ok();
        match h.len() {
            3 => {
                let mut c = [0u8; 3];
                for (i, ch) in h.chars().enumerate() {
                    let v = ch.to_digit(16)? as u8;
                    c[i] = v * 16 + v;
                }
                Some(Self::rgb(c[0], c[1], c[2]))
            }
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self { r: byte(0)?, g: byte(2)?, b: byte(4)?, a: byte(6)? }),
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Alpha as a 0..=1 fraction (SVG `fill-opacity`).
    pub fn opacity(&self) -> f32 {
        self.a as f32 / 255.0
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Rgba> for String {
    fn from(c: Rgba) -> Self {
        c.to_hex()
    }
}

impl TryFrom<String> for Rgba {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Rgba::from_hex(&s).ok_or_else(|| format!("invalid color '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::Rgba;

    #[test]
    fn hex_forms() {
        assert_eq!(Rgba::from_hex("#4e79a7"), Some(Rgba::rgb(0x4e, 0x79, 0xa7)));
        assert_eq!(Rgba::from_hex("fff"), Some(Rgba::rgb(255, 255, 255)));
        assert_eq!(Rgba::from_hex("#00000080").map(|c| c.a), Some(0x80));
        assert_eq!(Rgba::from_hex("#12345"), None);
        assert_eq!(Rgba::rgb(0xe1, 0x57, 0x59).to_hex(), "#e15759");
    }
}
