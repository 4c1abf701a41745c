//! Window discovery for the application that owns the color wheel.

/// Case-insensitive substring match of a window title against the configured title.
pub fn title_matches(title: &str, wanted: &str) -> bool {
    !wanted.is_empty() && title.to_lowercase().contains(&wanted.to_lowercase())
}

#[cfg(windows)]
pub use platform::{bring_to_foreground, find_window_by_title};

#[cfg(windows)]
mod platform {
    use anyhow::{anyhow, Result};
    use std::ffi::OsString;
    use std::os::windows::ffi::OsStringExt;

    use windows::Win32::Foundation::{BOOL, HWND, LPARAM, TRUE};
    use windows::Win32::UI::WindowsAndMessaging::{
        EnumWindows, GetWindowTextLengthW, GetWindowTextW, IsWindowVisible,
        SetForegroundWindow,
    };

    use super::title_matches;

    /// Finds the first visible top-level window whose title contains `wanted`.
    pub fn find_window_by_title(wanted: &str) -> Result<HWND> {
        struct EnumData<'a> {
            wanted: &'a str,
            hwnd: Option<HWND>,
            title: Option<String>,
        }

        unsafe extern "system" fn enum_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
            unsafe {
                let data = &mut *(lparam.0 as *mut EnumData);

                if !IsWindowVisible(hwnd).as_bool() {
                    return TRUE;
                }

                let title_len = GetWindowTextLengthW(hwnd);
                if title_len <= 0 {
                    return TRUE;
                }
                let mut title_buf: Vec<u16> = vec![0; (title_len + 1) as usize];
                let copied = GetWindowTextW(hwnd, &mut title_buf);
                let title = OsString::from_wide(&title_buf[..copied.max(0) as usize])
                    .to_string_lossy()
                    .to_string();

                if title_matches(&title, data.wanted) {
                    data.hwnd = Some(hwnd);
                    data.title = Some(title);
                    return BOOL(0); // Stop enumeration
                }

                TRUE
            }
        }

        let mut data = EnumData {
            wanted,
            hwnd: None,
            title: None,
        };
        unsafe {
            // EnumWindows reports an error when the callback stops it early; that is a match.
            let _ = EnumWindows(Some(enum_callback), LPARAM(&mut data as *mut _ as isize));
        }

        if let Some(title) = &data.title {
            crate::log(&format!("Found target window: \"{}\"", title));
        }

        data.hwnd
            .ok_or_else(|| anyhow!("Could not find a window titled \"{}\". Is it open?", wanted))
    }

    /// Brings the window to the foreground so it receives synthesized input.
    pub fn bring_to_foreground(hwnd: HWND) {
        unsafe {
            let _ = SetForegroundWindow(hwnd);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_matches() {
        assert!(title_matches("BoomBang - Chrome", "boombang"));
        assert!(title_matches("BoomBang", "BoomBang"));
        assert!(!title_matches("Notepad", "BoomBang"));
        assert!(!title_matches("anything", ""));
    }
}
