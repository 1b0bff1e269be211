use std::time::Duration;

/// Double-click time used when the host exposes no setting.
pub const DEFAULT_DOUBLE_CLICK_RATE: Duration = Duration::from_millis(500);

/// Reads the host's configured double-click time.
#[cfg(windows)]
pub fn double_click_rate() -> Duration {
    use windows::Win32::UI::Input::KeyboardAndMouse::GetDoubleClickTime;

    // SAFETY: GetDoubleClickTime takes no arguments and only reads a user setting.
    let ms = unsafe { GetDoubleClickTime() };
    if ms == 0 {
        log::warn!("GetDoubleClickTime returned 0; using {DEFAULT_DOUBLE_CLICK_RATE:?}");
        return DEFAULT_DOUBLE_CLICK_RATE;
    }
    Duration::from_millis(u64::from(ms))
}

/// Reads the host's configured double-click time.
///
/// No portable query exists outside Windows; the Windows default is used.
#[cfg(not(windows))]
pub fn double_click_rate() -> Duration {
    DEFAULT_DOUBLE_CLICK_RATE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_rate_is_positive() {
        assert!(double_click_rate() > Duration::ZERO);
    }
}
