use std::time::Duration;

use super::buttons::ButtonStates;
use super::types::ButtonId;

/// Upper bound for how long a first click stays armed, whatever the configured rate.
pub const ARMED_CEILING: Duration = Duration::from_secs(5);

/// Double-click detector state between ticks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DoubleClickState<B> {
    Idle,
    /// A first click on `button` is waiting for a matching second click.
    Armed { button: B, since_click: Duration },
}

/// Per-tick double-click state machine over one button group.
///
/// Tick order:
/// 1. an armed click ages by the tick's delta, then expires once it is older than the
///    rate (or [`ARMED_CEILING`])
/// 2. the group is scanned in `B::ALL` order for a press; the last pressed id wins
/// 3. a press on the armed button fires, any other press (re)arms
///
/// The fired result only describes the current tick.
#[derive(Debug, Clone)]
pub struct DoubleClickDetector<B: ButtonId> {
    rate: Duration,
    state: DoubleClickState<B>,
    fired: Option<B>,
}

impl<B: ButtonId> DoubleClickDetector<B> {
    pub fn new(rate: Duration) -> Self {
        Self {
            rate,
            state: DoubleClickState::Idle,
            fired: None,
        }
    }

    /// Maximum delay between two clicks of a double-click.
    #[inline]
    pub fn rate(&self) -> Duration {
        self.rate
    }

    #[inline]
    pub fn state(&self) -> DoubleClickState<B> {
        self.state
    }

    /// Button double-clicked on the current tick, if any.
    #[inline]
    pub fn fired(&self) -> Option<B> {
        self.fired
    }

    #[inline]
    pub fn is_double_clicked(&self, id: B) -> bool {
        self.fired == Some(id)
    }

    /// Advances one tick. Must run after `buttons` was refreshed for the same tick.
    pub fn update<const N: usize>(
        &mut self,
        buttons: &ButtonStates<B, N>,
        delta: Duration,
    ) -> Option<B> {
        self.fired = None;

        if let DoubleClickState::Armed { since_click, .. } = &mut self.state {
            *since_click = since_click.saturating_add(delta);
            if *since_click > self.rate || *since_click > ARMED_CEILING {
                self.state = DoubleClickState::Idle;
            }
        }

        let Some(clicked) = buttons.pressed().last() else {
            return None;
        };

        match self.state {
            DoubleClickState::Armed { button, since_click }
                if button == clicked && since_click <= self.rate =>
            {
                log::trace!("double-click on {clicked:?} after {since_click:?}");
                self.fired = Some(clicked);
                self.state = DoubleClickState::Idle;
            }
            _ => {
                self.state = DoubleClickState::Armed {
                    button: clicked,
                    since_click: Duration::ZERO,
                };
            }
        }

        self.fired
    }

    /// Forces `Idle` and drops any fired result (e.g. on focus loss).
    pub fn reset(&mut self) {
        self.state = DoubleClickState::Idle;
        self.fired = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseButton;

    type Buttons = ButtonStates<MouseButton, { MouseButton::COUNT }>;

    const TICK: Duration = Duration::from_millis(100);

    /// Drives buttons + detector one 100 ms tick at a time.
    struct Rig {
        buttons: Buttons,
        detector: DoubleClickDetector<MouseButton>,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                buttons: Buttons::new(),
                detector: DoubleClickDetector::new(Duration::from_millis(500)),
            }
        }

        fn tick(&mut self, held: &[MouseButton]) -> Option<MouseButton> {
            self.buttons.refresh(|b| held.contains(&b));
            self.detector.update(&self.buttons, TICK)
        }
    }

    const L: MouseButton = MouseButton::Left;
    const R: MouseButton = MouseButton::Right;

    // ── scenarios ─────────────────────────────────────────────────────────

    #[test]
    fn second_press_within_rate_fires_once() {
        let mut rig = Rig::new();
        assert_eq!(rig.tick(&[L]), None); // t=0.0 arm
        assert_eq!(
            rig.detector.state(),
            DoubleClickState::Armed { button: L, since_click: Duration::ZERO }
        );
        assert_eq!(rig.tick(&[L]), None); // t=0.1
        assert_eq!(rig.tick(&[]), None); // t=0.2 release
        assert_eq!(rig.tick(&[L]), Some(L)); // t=0.3
        assert!(rig.detector.is_double_clicked(L));
        assert_eq!(rig.detector.state(), DoubleClickState::Idle);

        assert_eq!(rig.tick(&[L]), None); // fired does not carry over
        assert!(!rig.detector.is_double_clicked(L));
    }

    #[test]
    fn second_press_after_rate_decays_then_rearms() {
        let mut rig = Rig::new();
        rig.tick(&[L]); // t=0.0
        rig.tick(&[]); // 0.1
        rig.tick(&[]); // 0.2
        rig.tick(&[]); // 0.3
        rig.tick(&[]); // 0.4
        rig.tick(&[]); // 0.5 — since_click == rate, still armed
        assert!(matches!(rig.detector.state(), DoubleClickState::Armed { .. }));

        assert_eq!(rig.tick(&[L]), None); // 0.6 — expires first, then re-arms
        assert_eq!(
            rig.detector.state(),
            DoubleClickState::Armed { button: L, since_click: Duration::ZERO }
        );
    }

    #[test]
    fn press_exactly_at_rate_still_fires() {
        let mut rig = Rig::new();
        rig.tick(&[L]);
        for _ in 0..4 {
            rig.tick(&[]);
        }
        assert_eq!(rig.tick(&[L]), Some(L)); // since_click = 0.5
    }

    #[test]
    fn different_button_rearms_without_firing() {
        let mut rig = Rig::new();
        rig.tick(&[L]);
        rig.tick(&[]);
        assert_eq!(rig.tick(&[R]), None);
        assert_eq!(
            rig.detector.state(),
            DoubleClickState::Armed { button: R, since_click: Duration::ZERO }
        );
        rig.tick(&[]);
        assert_eq!(rig.tick(&[L]), None);
        assert!(!rig.detector.is_double_clicked(L));
    }

    #[test]
    fn simultaneous_presses_resolve_to_last_in_scan_order() {
        let mut rig = Rig::new();
        rig.tick(&[L, MouseButton::Middle]);
        assert_eq!(
            rig.detector.state(),
            DoubleClickState::Armed { button: MouseButton::Middle, since_click: Duration::ZERO }
        );
    }

    #[test]
    fn ceiling_bounds_a_long_rate() {
        let mut b = Buttons::new();
        let mut d = DoubleClickDetector::new(Duration::from_secs(60));

        b.refresh(|btn| btn == L);
        d.update(&b, Duration::ZERO);
        b.refresh(|_| false);
        d.update(&b, Duration::from_secs(6));
        assert_eq!(d.state(), DoubleClickState::Idle);
    }

    #[test]
    fn holding_does_not_count_as_second_click() {
        let mut rig = Rig::new();
        rig.tick(&[L]);
        assert_eq!(rig.tick(&[L]), None);
        assert_eq!(rig.tick(&[L]), None);
    }

    #[test]
    fn reset_forces_idle() {
        let mut rig = Rig::new();
        rig.tick(&[L]);
        rig.detector.reset();
        assert_eq!(rig.detector.state(), DoubleClickState::Idle);
        rig.tick(&[]);
        assert_eq!(rig.tick(&[L]), None);
    }
}
