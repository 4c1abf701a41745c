//! Calibrated screen geometry of the color wheel and brightness bar.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Wheel center/radius and brightness-bar endpoints, in screen pixels.
///
/// Produced only by a completed calibration run and replaced as a whole by the
/// next one. `brightness_x_end` may be left of `brightness_x_start`; the bar is
/// used in whatever direction it was calibrated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationModel {
    pub center_x: i32,
    pub center_y: i32,
    pub radius: i32,
    pub brightness_x_start: i32,
    pub brightness_x_end: i32,
    pub brightness_y: i32,
}

impl CalibrationModel {
    /// Checks that the wheel has a usable radius.
    pub fn validate(&self) -> AppResult<()> {
        if self.radius <= 0 {
            return Err(AppError::InvalidGeometry {
                radius: self.radius,
            });
        }
        Ok(())
    }
}

/// Distance from the wheel center to a sample on its edge, rounded to whole pixels.
pub fn derive_radius(center: (i32, i32), edge: (i32, i32)) -> i32 {
    let dx = edge.0 as f64 - center.0 as f64;
    let dy = edge.1 as f64 - center.1 as f64;
    dx.hypot(dy).round() as i32
}
