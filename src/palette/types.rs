//! Palette data types.

use serde::{Deserialize, Serialize};

use crate::color::transform::{hsv_to_rgb, rgb_to_hex};

/// Number of colors in every palette.
pub const PALETTE_SIZE: usize = 5;

/// A color as hue, saturation and value, each conventionally in 0.0-1.0.
///
/// Serialized as a `[h, s, v]` array.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct ColorTriple {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl ColorTriple {
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// True if every component lies in `0.0..=1.0`.
    pub fn is_normalized(&self) -> bool {
        [self.h, self.s, self.v]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }

    /// Returns the color as 8-bit RGB channels.
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        hsv_to_rgb(self.h, self.s, self.v)
    }

    /// Returns the color as a `#rrggbb` string.
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb();
        rgb_to_hex(r, g, b)
    }
}

impl From<[f64; 3]> for ColorTriple {
    fn from([h, s, v]: [f64; 3]) -> Self {
        Self { h, s, v }
    }
}

impl From<ColorTriple> for [f64; 3] {
    fn from(c: ColorTriple) -> Self {
        [c.h, c.s, c.v]
    }
}

/// A named set of exactly five colors.
///
/// The name is not guaranteed unique but is what favorites use to identify a palette.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub name: String,
    pub colors: [ColorTriple; PALETTE_SIZE],
}

impl Palette {
    pub fn new(name: impl Into<String>, colors: [ColorTriple; PALETTE_SIZE]) -> Self {
        Self {
            name: name.into(),
            colors,
        }
    }

    /// Returns the color at `index`, or `None` outside 0..5.
    pub fn color(&self, index: usize) -> Option<ColorTriple> {
        self.colors.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_json_shape() {
        let palette = Palette::new(
            "Palette 1",
            [
                ColorTriple::new(0.0, 1.0, 1.0),
                ColorTriple::new(0.5, 0.5, 0.5),
                ColorTriple::new(0.25, 0.0, 1.0),
                ColorTriple::new(0.75, 1.0, 0.0),
                ColorTriple::new(0.1, 0.2, 0.3),
            ],
        );

        let json = serde_json::to_value(&palette).unwrap();
        assert_eq!(json["name"], "Palette 1");
        assert_eq!(json["colors"][1], serde_json::json!([0.5, 0.5, 0.5]));

        let back: Palette = serde_json::from_value(json).unwrap();
        assert_eq!(back, palette);
    }

    #[test]
    fn test_palette_rejects_wrong_color_count() {
        let json = r#"{"name":"short","colors":[[0,0,0],[0,0,0]]}"#;
        assert!(serde_json::from_str::<Palette>(json).is_err());
    }

    #[test]
    fn test_is_normalized() {
        assert!(ColorTriple::new(0.0, 0.5, 1.0).is_normalized());
        assert!(!ColorTriple::new(0.0, 3.0, 0.5).is_normalized());
        assert!(!ColorTriple::new(-0.01, 0.5, 0.5).is_normalized());
        assert!(!ColorTriple::new(0.5, 0.5, f64::NAN).is_normalized());
    }

    #[test]
    fn test_color_lookup() {
        let palette = Palette::new("p", [ColorTriple::new(0.0, 0.0, 1.0); PALETTE_SIZE]);
        assert!(palette.color(4).is_some());
        assert!(palette.color(5).is_none());
        assert_eq!(palette.colors[0].to_hex(), "#ffffff");
    }
}
