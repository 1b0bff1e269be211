use std::time::Duration;

use crate::paint::Color;

/// Window and presentation settings.
///
/// `Game::initialize` may edit these before the window is created.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,

    /// Client area size in logical pixels.
    pub width: u32,
    pub height: u32,

    /// Present on vertical blank.
    pub vsync: bool,

    pub resizable: bool,

    /// Double-click rate override; `None` uses the host setting.
    pub double_click_rate: Option<Duration>,

    /// Quiet period after the last resize event before a live resize is considered over.
    pub resize_settle: Duration,

    /// Clear color for frames whose draw hooks do not clear.
    pub clear_color: Color,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Game Window".to_string(),
            width: 720,
            height: 480,
            vsync: false,
            resizable: false,
            double_click_rate: None,
            resize_settle: Duration::from_millis(150),
            clear_color: Color::BLACK,
        }
    }
}
