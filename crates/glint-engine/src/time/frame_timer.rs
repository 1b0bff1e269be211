use std::time::Duration;

const WINDOW: Duration = Duration::from_secs(1);

/// Smoothed frames-per-second counter.
///
/// Frames and delta time are accumulated until at least one second has passed; the rate
/// over that (slightly variable) window is then published and the accumulator restarts.
#[derive(Debug, Clone, Default)]
pub struct FrameTimer {
    frame_count: u32,
    accumulated: Duration,
    fps: f64,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one frame.
    ///
    /// Returns the newly published rate when this frame closed a window.
    pub fn tick(&mut self, delta: Duration) -> Option<f64> {
        self.accumulated += delta;
        self.frame_count += 1;

        if self.accumulated < WINDOW {
            return None;
        }

        self.fps = f64::from(self.frame_count) / self.accumulated.as_secs_f64();
        self.frame_count = 0;
        self.accumulated = Duration::ZERO;
        Some(self.fps)
    }

    /// Last published rate; zero until the first window closes.
    #[inline]
    pub fn fps(&self) -> f64 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn publishes_frame_count_when_exactly_one_second() {
        let mut t = FrameTimer::new();
        assert_eq!(t.tick(ms(250)), None);
        assert_eq!(t.tick(ms(250)), None);
        assert_eq!(t.tick(ms(250)), None);
        assert_eq!(t.tick(ms(250)), Some(4.0));
        assert_eq!(t.fps(), 4.0);

        // Accumulator restarted: the next window counts from zero.
        assert_eq!(t.tick(ms(500)), None);
        assert_eq!(t.tick(ms(500)), Some(2.0));
    }

    #[test]
    fn fps_is_zero_before_first_window() {
        let mut t = FrameTimer::new();
        t.tick(ms(16));
        assert_eq!(t.fps(), 0.0);
    }

    #[test]
    fn published_value_holds_until_next_window() {
        let mut t = FrameTimer::new();
        t.tick(ms(500));
        t.tick(ms(500));
        assert_eq!(t.fps(), 2.0);
        t.tick(ms(100));
        assert_eq!(t.fps(), 2.0);
    }

    #[test]
    fn overshooting_window_smooths_over_its_length() {
        let mut t = FrameTimer::new();
        t.tick(ms(600));
        let fps = t.tick(ms(900)).unwrap();
        assert!((fps - 2.0 / 1.5).abs() < 1e-9);
    }

    #[test]
    fn long_stall_is_not_clamped() {
        let mut t = FrameTimer::new();
        let fps = t.tick(Duration::from_secs(4)).unwrap();
        assert_eq!(fps, 0.25);
    }
}
