use std::time::{Duration, Instant};

/// Frame timing snapshot.
///
/// Produced once per tick and handed to every subsystem that ticks.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FrameSample {
    /// Total time since the clock was started.
    pub elapsed: Duration,

    /// Time since the previous tick.
    pub delta: Duration,
}

impl FrameSample {
    #[inline]
    pub const fn new(elapsed: Duration, delta: Duration) -> Self {
        Self { elapsed, delta }
    }

    /// Elapsed time in seconds.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Delta time in seconds.
    #[inline]
    pub fn delta_secs(&self) -> f64 {
        self.delta.as_secs_f64()
    }
}

/// Monotonic stopwatch producing elapsed and delta time.
///
/// Unlike a per-frame clamped clock, no clamping is applied: a long stall is reported
/// as one long delta and downstream systems decide what to do with it.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    /// Set while running; the instant counting (re)started.
    running_since: Option<Instant>,

    /// Time accumulated before the last `stop()`.
    banked: Duration,

    /// Elapsed value observed by the previous `update_delta_time()`.
    last_update: Duration,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroes elapsed time and begins counting.
    pub fn start(&mut self) {
        self.running_since = Some(Instant::now());
        self.banked = Duration::ZERO;
        self.last_update = Duration::ZERO;
    }

    /// Freezes the readable elapsed value.
    ///
    /// Calling `stop` on a stopped clock is a no-op.
    pub fn stop(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.banked += Instant::now().saturating_duration_since(since);
        }
    }

    /// Returns `true` between `start()` and `stop()`.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Total time counted since `start()`.
    pub fn elapsed(&self) -> Duration {
        let live = self
            .running_since
            .map(|since| Instant::now().saturating_duration_since(since))
            .unwrap_or_default();
        self.banked + live
    }

    /// Returns the time since the previous call and advances the baseline.
    ///
    /// Never negative. Before `start()` the baseline and elapsed value are both zero.
    pub fn update_delta_time(&mut self) -> Duration {
        let now = self.elapsed();
        let delta = now.saturating_sub(self.last_update);
        self.last_update = now;
        delta
    }

    /// Samples the clock once for the current tick.
    pub fn sample(&mut self) -> FrameSample {
        let delta = self.update_delta_time();
        FrameSample::new(self.last_update, delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::thread;

    #[test]
    fn new_clock_is_stopped_and_zero() {
        let clock = Clock::new();
        assert!(!clock.is_running());
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }

    #[test]
    fn delta_before_start_is_zero() {
        let mut clock = Clock::new();
        assert_eq!(clock.update_delta_time(), Duration::ZERO);
    }

    #[test]
    fn consecutive_deltas_are_small_and_non_negative() {
        let mut clock = Clock::new();
        clock.start();
        let _ = clock.update_delta_time();
        let d = clock.update_delta_time();
        assert!(d < Duration::from_millis(50));
    }

    #[test]
    fn elapsed_advances_while_running() {
        let mut clock = Clock::new();
        clock.start();
        thread::sleep(Duration::from_millis(5));
        assert!(clock.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn stop_freezes_elapsed() {
        let mut clock = Clock::new();
        clock.start();
        thread::sleep(Duration::from_millis(2));
        clock.stop();
        let frozen = clock.elapsed();
        thread::sleep(Duration::from_millis(2));
        assert_eq!(clock.elapsed(), frozen);
        assert!(!clock.is_running());
    }

    #[test]
    fn start_zeroes_previous_run() {
        let mut clock = Clock::new();
        clock.start();
        thread::sleep(Duration::from_millis(10));
        clock.stop();
        clock.start();
        assert!(clock.elapsed() < Duration::from_millis(10));
    }

    #[test]
    fn deltas_sum_to_elapsed() {
        let mut clock = Clock::new();
        clock.start();
        let mut total = Duration::ZERO;
        for _ in 0..3 {
            thread::sleep(Duration::from_millis(1));
            total += clock.update_delta_time();
        }
        clock.stop();
        assert!(total <= clock.elapsed());
    }

    #[test]
    fn sample_reports_elapsed_at_the_tick() {
        let mut clock = Clock::new();
        clock.start();
        thread::sleep(Duration::from_millis(1));
        let s = clock.sample();
        assert_eq!(s.elapsed, s.delta);
        assert!(s.elapsed_secs() > 0.0);
    }
}
