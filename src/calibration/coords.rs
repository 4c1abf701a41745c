//! Pointer position reading.

use anyhow::Result;

/// Reports where the pointer currently is, in screen coordinates.
pub trait PointerSource {
    fn pointer_position(&self) -> Result<(i32, i32)>;
}

/// Reads the system cursor.
#[derive(Clone, Copy, Debug, Default)]
pub struct CursorPointer;

impl PointerSource for CursorPointer {
    fn pointer_position(&self) -> Result<(i32, i32)> {
        get_cursor_position()
    }
}

/// Gets the current cursor position in screen coordinates.
#[cfg(windows)]
pub fn get_cursor_position() -> Result<(i32, i32)> {
    use windows::Win32::Foundation::POINT;
    use windows::Win32::UI::WindowsAndMessaging::GetCursorPos;

    let mut pt = POINT::default();
    unsafe {
        GetCursorPos(&mut pt)?;
    }
    Ok((pt.x, pt.y))
}

#[cfg(not(windows))]
pub fn get_cursor_position() -> Result<(i32, i32)> {
    Err(anyhow::anyhow!(
        "Reading the cursor position is only available on Windows"
    ))
}

/// Held state of the keys that drive a calibration run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConfirmKeys {
    /// Enter
    pub confirm: bool,
    /// Escape
    pub cancel: bool,
}

/// Turns polled key states into one-shot presses.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyEdges {
    held: ConfirmKeys,
}

impl KeyEdges {
    /// Returns the keys that went down since the previous poll.
    pub fn update(&mut self, now: ConfirmKeys) -> ConfirmKeys {
        let pressed = ConfirmKeys {
            confirm: now.confirm && !self.held.confirm,
            cancel: now.cancel && !self.held.cancel,
        };
        self.held = now;
        pressed
    }
}

/// Polls Enter and Escape regardless of which window has focus.
#[cfg(windows)]
pub fn global_confirm_keys() -> Option<ConfirmKeys> {
    use windows::Win32::UI::Input::KeyboardAndMouse::{GetAsyncKeyState, VK_ESCAPE, VK_RETURN};

    // High bit set means the key is down.
    let down = |vk: i32| unsafe { GetAsyncKeyState(vk) } < 0;
    Some(ConfirmKeys {
        confirm: down(VK_RETURN.0 as i32),
        cancel: down(VK_ESCAPE.0 as i32),
    })
}

/// Global key state is not available here; callers fall back to window key events.
#[cfg(not(windows))]
pub fn global_confirm_keys() -> Option<ConfirmKeys> {
    None
}
