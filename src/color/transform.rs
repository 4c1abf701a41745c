//! Color conversions and the color-to-screen mapping.
//!
//! All functions are pure. Screen coordinates are in pixels with y growing downward.

use std::f64::consts::TAU;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::calibration::model::CalibrationModel;
use crate::palette::types::ColorTriple;

/// Which way hue increases around the on-screen wheel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HueDirection {
    /// Hue angle grows with screen y, i.e. clockwise as seen on screen.
    #[default]
    Clockwise,
    /// Hue angle grows against screen y (red at 3 o'clock, green upper-left).
    CounterClockwise,
}

/// The two screen points needed to reproduce one color: a click on the wheel
/// for hue/saturation and a position on the brightness bar for value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenTarget {
    pub wheel: (i32, i32),
    pub brightness: (i32, i32),
}

/// Converts HSV (each 0.0-1.0) to 8-bit RGB.
///
/// Hue wraps, so `h = 1.0` is red like `h = 0.0`.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (u8, u8, u8) {
    let h = h.rem_euclid(1.0) * 6.0;
    let sector = h.floor();
    let f = h - sector;

    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match sector as i64 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        5 => (v, p, q),
        _ => (0.0, 0.0, 0.0),
    };

    (to_channel(r), to_channel(g), to_channel(b))
}

fn to_channel(x: f64) -> u8 {
    (x * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Formats RGB as lowercase `#rrggbb`.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

fn hex_pattern() -> &'static Regex {
    static HEX: OnceLock<Regex> = OnceLock::new();
    HEX.get_or_init(|| Regex::new(r"^#?([0-9a-fA-F]{6})$").expect("valid hex regex"))
}

/// Parses `#rrggbb` (leading `#` optional) into HSV with hue in 0.0-1.0.
pub fn hex_to_hsv(hex: &str) -> Option<ColorTriple> {
    let caps = hex_pattern().captures(hex.trim())?;
    let digits = caps.get(1)?.as_str();

    let channel = |i: usize| -> Option<f64> {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .ok()
            .map(|c| c as f64 / 255.0)
    };
    let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        ((g - b) / delta) / 6.0
    } else if max == g {
        ((b - r) / delta + 2.0) / 6.0
    } else {
        ((r - g) / delta + 4.0) / 6.0
    };
    let s = if max == 0.0 { 0.0 } else { delta / max };

    Some(ColorTriple::new(h.rem_euclid(1.0), s, max))
}

/// Point on the color wheel for hue `h` and saturation `s`.
///
/// The hue is an angle of `h * 2π` from the positive x axis; saturation scales the
/// distance from the center up to the calibrated radius.
pub fn wheel_point(h: f64, s: f64, model: &CalibrationModel, direction: HueDirection) -> (i32, i32) {
    let angle = h * TAU;
    let distance = s * model.radius as f64;
    let dy = match direction {
        HueDirection::Clockwise => distance * angle.sin(),
        HueDirection::CounterClockwise => -distance * angle.sin(),
    };

    (
        (model.center_x as f64 + distance * angle.cos()).round() as i32,
        (model.center_y as f64 + dy).round() as i32,
    )
}

/// Point on the brightness bar for value `v`.
///
/// Interpolates from `brightness_x_start` (v = 0) to `brightness_x_end` (v = 1),
/// whichever way the bar was calibrated.
pub fn brightness_point(v: f64, model: &CalibrationModel) -> (i32, i32) {
    let span = model.brightness_x_end as f64 - model.brightness_x_start as f64;
    (
        (model.brightness_x_start as f64 + v * span).round() as i32,
        model.brightness_y,
    )
}

/// Screen points for a color using the default (clockwise) wheel orientation.
pub fn hsv_to_screen_point(hsv: ColorTriple, model: &CalibrationModel) -> ScreenTarget {
    hsv_to_screen_point_with(hsv, model, HueDirection::Clockwise)
}

pub fn hsv_to_screen_point_with(
    hsv: ColorTriple,
    model: &CalibrationModel,
    direction: HueDirection,
) -> ScreenTarget {
    ScreenTarget {
        wheel: wheel_point(hsv.h, hsv.s, model, direction),
        brightness: brightness_point(hsv.v, model),
    }
}
