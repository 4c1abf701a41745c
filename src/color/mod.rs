//! Color conversions and the mapping from colors to screen coordinates.

pub mod transform;

pub use transform::{hsv_to_screen_point, hsv_to_screen_point_with, HueDirection, ScreenTarget};
