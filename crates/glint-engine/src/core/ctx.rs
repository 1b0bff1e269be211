use crate::coords::Vec2;
use crate::input::{Keyboard, Mouse};
use crate::time::FrameSample;

/// Per-tick context passed to `Game::update`.
///
/// Input devices have already sampled this tick's state. The mouse is mutable so a game
/// can reset double-click tracking (e.g. after losing focus).
pub struct UpdateCtx<'a> {
    pub time: FrameSample,

    /// Last published frame rate; 0 until the first full second has elapsed.
    pub fps: f64,

    pub mouse: &'a mut Mouse,
    pub keyboard: &'a Keyboard,

    /// Client area in logical pixels.
    pub client_size: Vec2,
    pub focused: bool,

    /// True while a live resize pauses rendering.
    pub resizing: bool,
}

impl UpdateCtx<'_> {
    /// Delta time in seconds.
    #[inline]
    pub fn dt(&self) -> f32 {
        self.time.delta_secs() as f32
    }
}
