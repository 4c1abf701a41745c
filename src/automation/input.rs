//! Mouse input simulation for applying a color.
//!
//! A color is applied in two gestures: a click on the color wheel (hue and
//! saturation), then a drag of the brightness handle from the bar's end to the
//! target value. SendInput is used because it behaves like hardware input; it
//! moves the user's actual cursor.

use anyhow::Result;

use crate::automation::config::AppConfig;
use crate::color::ScreenTarget;
use crate::palette::ColorTriple;

/// Everything the clicker needs to reproduce one palette color on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ApplyRequest {
    pub color: ColorTriple,
    pub target: ScreenTarget,
    /// Where the brightness handle is grabbed before dragging (the bar's end).
    pub slider_grab: (i32, i32),
}

/// Performs the pointer actions that set a color in the target application.
pub trait ColorApplier {
    fn apply_color(&self, request: &ApplyRequest) -> Result<()>;
}

/// Intermediate x positions when dragging from `from_x` to `to_x` in `steps` moves.
///
/// The last position is always `to_x`.
pub fn drag_path(from_x: i32, to_x: i32, steps: u32) -> Vec<i32> {
    let steps = steps.max(1) as i64;
    (1..=steps)
        .map(|i| (from_x as i64 + (to_x - from_x) as i64 * i / steps) as i32)
        .collect()
}

/// Maps a screen pixel to SendInput's absolute 0-65535 range.
pub fn normalize_absolute(x: i32, y: i32, screen_width: i32, screen_height: i32) -> (i32, i32) {
    let w = screen_width.max(1) as i64;
    let h = screen_height.max(1) as i64;
    (
        ((x as i64 * 65535) / w) as i32,
        ((y as i64 * 65535) / h) as i32,
    )
}

/// Applies colors to the configured window with SendInput.
#[derive(Clone, Debug)]
pub struct SendInputApplier {
    #[cfg_attr(not(windows), allow(dead_code))]
    config: AppConfig,
}

impl SendInputApplier {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }
}

#[cfg(not(windows))]
impl ColorApplier for SendInputApplier {
    fn apply_color(&self, _request: &ApplyRequest) -> Result<()> {
        Err(anyhow::anyhow!("Applying colors is only available on Windows"))
    }
}

#[cfg(windows)]
impl ColorApplier for SendInputApplier {
    fn apply_color(&self, request: &ApplyRequest) -> Result<()> {
        use std::thread::sleep;
        use std::time::Duration;

        use crate::automation::window::{bring_to_foreground, find_window_by_title};
        use platform::{left_down, left_up, move_to};

        let cfg = &self.config;
        let ms = Duration::from_millis;

        let hwnd = find_window_by_title(&cfg.window_title)?;
        bring_to_foreground(hwnd);
        sleep(ms(100));

        let (wx, wy) = request.target.wheel;
        crate::log(&format!(
            "Applying HSV({:.2}, {:.2}, {:.2}): wheel ({}, {}), brightness ({}, {})",
            request.color.h,
            request.color.s,
            request.color.v,
            wx,
            wy,
            request.target.brightness.0,
            request.target.brightness.1
        ));

        // Wheel click
        move_to(wx, wy)?;
        sleep(ms(cfg.move_settle_ms));
        left_down(wx, wy)?;
        sleep(ms(cfg.click_hold_ms));
        left_up(wx, wy)?;
        sleep(ms(cfg.wheel_settle_ms));

        // Brightness drag. The handle sits at the bar's end after a wheel click.
        let (grab_x, bar_y) = request.slider_grab;
        let target_x = request.target.brightness.0;
        move_to(grab_x, bar_y)?;
        sleep(ms(cfg.move_settle_ms));
        left_down(grab_x, bar_y)?;
        sleep(ms(cfg.slider_press_ms));

        for x in drag_path(grab_x, target_x, cfg.slider_drag_steps) {
            move_to(x, bar_y)?;
            sleep(ms(cfg.slider_step_ms));
        }

        left_up(target_x, bar_y)?;
        sleep(ms(cfg.post_apply_ms));

        Ok(())
    }
}

#[cfg(windows)]
mod platform {
    use anyhow::{anyhow, Result};
    use windows::Win32::UI::Input::KeyboardAndMouse::{
        SendInput, INPUT, INPUT_0, INPUT_MOUSE, MOUSEEVENTF_ABSOLUTE, MOUSEEVENTF_LEFTDOWN,
        MOUSEEVENTF_LEFTUP, MOUSEEVENTF_MOVE, MOUSE_EVENT_FLAGS, MOUSEINPUT,
    };
    use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

    use super::normalize_absolute;

    fn send_mouse(x: i32, y: i32, flags: MOUSE_EVENT_FLAGS) -> Result<()> {
        let (screen_width, screen_height) =
            unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
        let (dx, dy) = normalize_absolute(x, y, screen_width, screen_height);

        let input = INPUT {
            r#type: INPUT_MOUSE,
            Anonymous: INPUT_0 {
                mi: MOUSEINPUT {
                    dx,
                    dy,
                    dwFlags: flags | MOUSEEVENTF_ABSOLUTE | MOUSEEVENTF_MOVE,
                    ..Default::default()
                },
            },
        };
        let sent = unsafe { SendInput(&[input], std::mem::size_of::<INPUT>() as i32) };
        if sent != 1 {
            return Err(anyhow!("SendInput rejected mouse event at ({}, {})", x, y));
        }
        Ok(())
    }

    pub fn move_to(x: i32, y: i32) -> Result<()> {
        send_mouse(x, y, MOUSE_EVENT_FLAGS(0))
    }

    pub fn left_down(x: i32, y: i32) -> Result<()> {
        send_mouse(x, y, MOUSEEVENTF_LEFTDOWN)
    }

    pub fn left_up(x: i32, y: i32) -> Result<()> {
        send_mouse(x, y, MOUSEEVENTF_LEFTUP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_path_ends_on_target() {
        assert_eq!(drag_path(100, 0, 4), vec![75, 50, 25, 0]);
        assert_eq!(drag_path(0, 10, 3), vec![3, 6, 10]);
        assert_eq!(drag_path(5, 5, 2), vec![5, 5]);
    }

    #[test]
    fn test_drag_path_zero_steps_jumps() {
        assert_eq!(drag_path(0, 42, 0), vec![42]);
    }

    #[test]
    fn test_normalize_absolute() {
        assert_eq!(normalize_absolute(0, 0, 1920, 1080), (0, 0));
        assert_eq!(normalize_absolute(960, 540, 1920, 1080), (32767, 32767));
        assert_eq!(normalize_absolute(1920, 1080, 1920, 1080), (65535, 65535));
    }
}
