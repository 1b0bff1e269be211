use std::time::{Duration, Instant};

/// Detects live-resize sessions from a stream of resize notifications.
///
/// The first notification begins a session; it ends once no notification has arrived
/// for the settle period. Callers pass the current instant so the tracker stays
/// deterministic under test.
#[derive(Debug, Clone)]
pub struct ResizeTracker {
    settle: Duration,
    last_event: Option<Instant>,
}

impl ResizeTracker {
    pub fn new(settle: Duration) -> Self {
        Self { settle, last_event: None }
    }

    /// Records a resize notification. Returns `true` if it began a new session.
    pub fn on_resized(&mut self, now: Instant) -> bool {
        let began = self.last_event.is_none();
        self.last_event = Some(now);
        began
    }

    /// Returns `true` once, when the active session has settled.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.last_event {
            Some(last) if now.saturating_duration_since(last) >= self.settle => {
                self.last_event = None;
                true
            }
            _ => false,
        }
    }

    /// Ends the active session now. Returns `true` if one was open.
    ///
    /// A later `poll` does not report the same session again.
    pub fn finish(&mut self) -> bool {
        self.last_event.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTLE: Duration = Duration::from_millis(150);

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn burst_is_a_single_session() {
        let t0 = Instant::now();
        let mut r = ResizeTracker::new(SETTLE);

        assert!(r.on_resized(t0));
        assert!(!r.on_resized(t0 + ms(50)));
        assert!(!r.on_resized(t0 + ms(100)));

        assert!(!r.poll(t0 + ms(200)));
        assert!(r.poll(t0 + ms(250)));
        assert!(!r.poll(t0 + ms(400)));
    }

    #[test]
    fn new_event_after_settle_begins_again() {
        let t0 = Instant::now();
        let mut r = ResizeTracker::new(SETTLE);
        r.on_resized(t0);
        assert!(r.poll(t0 + SETTLE));
        assert!(r.on_resized(t0 + ms(500)));
    }

    #[test]
    fn settle_counts_from_last_event() {
        let t0 = Instant::now();
        let mut r = ResizeTracker::new(SETTLE);
        r.on_resized(t0);
        r.on_resized(t0 + ms(30));
        assert!(!r.poll(t0 + SETTLE));
        assert!(r.poll(t0 + ms(30) + SETTLE));
    }

    #[test]
    fn finished_session_is_not_reported_again() {
        let t0 = Instant::now();
        let mut r = ResizeTracker::new(SETTLE);
        assert!(!r.finish());

        r.on_resized(t0);
        assert!(r.finish());
        assert!(!r.poll(t0 + ms(500)));
        assert!(r.on_resized(t0 + ms(600)));
    }
}
