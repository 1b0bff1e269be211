use std::fmt;
use std::time::Duration;

use crate::coords::Vec2;

use super::buttons::ButtonStates;
use super::double_click::DoubleClickDetector;
use super::source::InputSource;
use super::types::{ButtonId, MouseButton};

/// Polled mouse state for the current tick.
///
/// Owns its button buffers, position latch and double-click state; only `update` (and the
/// explicit `reset_double_click`) mutate them.
#[derive(Debug, Clone)]
pub struct Mouse {
    buttons: ButtonStates<MouseButton, { MouseButton::COUNT }>,
    double_click: DoubleClickDetector<MouseButton>,

    position: Vec2,
    old_position: Vec2,
    within_client: bool,
}

impl Mouse {
    /// Creates a mouse using the given double-click rate.
    pub fn new(double_click_rate: Duration) -> Self {
        Self {
            buttons: ButtonStates::new(),
            double_click: DoubleClickDetector::new(double_click_rate),
            position: Vec2::zero(),
            old_position: Vec2::zero(),
            within_client: false,
        }
    }

    /// Creates a mouse using the host's configured double-click rate.
    pub fn from_platform() -> Self {
        Self::new(super::platform::double_click_rate())
    }

    /// Samples `source` for one tick.
    pub fn update(&mut self, source: &impl InputSource, delta: Duration) {
        self.buttons.refresh(|b| source.is_button_down(b));

        self.old_position = self.position;
        self.position = source.cursor_position();

        let size = source.client_size();
        self.within_client = self.position.x >= 0.0
            && self.position.y >= 0.0
            && self.position.x <= size.x
            && self.position.y <= size.y;

        self.double_click.update(&self.buttons, delta);
    }

    // ── position ──────────────────────────────────────────────────────────

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.position.y
    }

    /// Movement since the previous tick.
    #[inline]
    pub fn position_delta(&self) -> Vec2 {
        self.position - self.old_position
    }

    /// Whether the pointer lies inside the client area (edges included).
    #[inline]
    pub fn is_within_client(&self) -> bool {
        self.within_client
    }

    // ── buttons ───────────────────────────────────────────────────────────

    #[inline]
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons.is_down(button)
    }

    #[inline]
    pub fn is_button_up(&self, button: MouseButton) -> bool {
        self.buttons.is_up(button)
    }

    #[inline]
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons.is_pressed(button)
    }

    #[inline]
    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.buttons.is_released(button)
    }

    #[inline]
    pub fn is_button_double_clicked(&self, button: MouseButton) -> bool {
        self.double_click.is_double_clicked(button)
    }

    pub fn left_button(&self) -> bool {
        self.is_button_down(MouseButton::Left)
    }

    pub fn right_button(&self) -> bool {
        self.is_button_down(MouseButton::Right)
    }

    pub fn middle_button(&self) -> bool {
        self.is_button_down(MouseButton::Middle)
    }

    pub fn x1_button(&self) -> bool {
        self.is_button_down(MouseButton::X1)
    }

    pub fn x2_button(&self) -> bool {
        self.is_button_down(MouseButton::X2)
    }

    pub fn buttons(&self) -> &ButtonStates<MouseButton, { MouseButton::COUNT }> {
        &self.buttons
    }

    // ── double-click ──────────────────────────────────────────────────────

    #[inline]
    pub fn double_click_rate(&self) -> Duration {
        self.double_click.rate()
    }

    pub fn double_click(&self) -> &DoubleClickDetector<MouseButton> {
        &self.double_click
    }

    /// Drops any armed first click. Never called by the engine itself.
    pub fn reset_double_click(&mut self) {
        self.double_click.reset();
    }
}

impl fmt::Display for Mouse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] IsIn: {} DownButtons:",
            self.position.x, self.position.y, self.within_client
        )?;

        let mut any = false;
        for &b in MouseButton::ALL {
            if self.buttons.is_down(b) {
                write!(f, " {b}")?;
                any = true;
            }
        }
        if !any {
            f.write_str(" None")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;

    #[derive(Default)]
    struct FakeSource {
        buttons: Vec<MouseButton>,
        cursor: Vec2,
        size: Vec2,
    }

    impl InputSource for FakeSource {
        fn is_key_down(&self, _key: Key) -> bool {
            false
        }
        fn is_button_down(&self, button: MouseButton) -> bool {
            self.buttons.contains(&button)
        }
        fn cursor_position(&self) -> Vec2 {
            self.cursor
        }
        fn client_size(&self) -> Vec2 {
            self.size
        }
    }

    const TICK: Duration = Duration::from_millis(100);

    fn source(x: f32, y: f32) -> FakeSource {
        FakeSource {
            cursor: Vec2::new(x, y),
            size: Vec2::new(720.0, 480.0),
            ..FakeSource::default()
        }
    }

    // ── position ──────────────────────────────────────────────────────────

    #[test]
    fn delta_is_movement_since_previous_tick() {
        let mut m = Mouse::new(Duration::from_millis(500));
        m.update(&source(10.0, 20.0), TICK);
        m.update(&source(15.0, 12.0), TICK);
        assert_eq!(m.position(), Vec2::new(15.0, 12.0));
        assert_eq!(m.position_delta(), Vec2::new(5.0, -8.0));

        m.update(&source(15.0, 12.0), TICK);
        assert_eq!(m.position_delta(), Vec2::zero());
    }

    #[test]
    fn client_bounds_are_inclusive() {
        let mut m = Mouse::new(Duration::from_millis(500));
        m.update(&source(0.0, 0.0), TICK);
        assert!(m.is_within_client());
        m.update(&source(720.0, 480.0), TICK);
        assert!(m.is_within_client());
        m.update(&source(720.5, 10.0), TICK);
        assert!(!m.is_within_client());
        m.update(&source(-1.0, 10.0), TICK);
        assert!(!m.is_within_client());
    }

    // ── buttons ───────────────────────────────────────────────────────────

    #[test]
    fn edges_and_double_click_flow_through() {
        let mut m = Mouse::new(Duration::from_millis(500));
        let mut src = source(1.0, 1.0);

        src.buttons = vec![MouseButton::Left];
        m.update(&src, TICK);
        assert!(m.is_button_pressed(MouseButton::Left));
        assert!(m.left_button());

        src.buttons.clear();
        m.update(&src, TICK);
        assert!(m.is_button_released(MouseButton::Left));

        src.buttons = vec![MouseButton::Left];
        m.update(&src, TICK);
        assert!(m.is_button_double_clicked(MouseButton::Left));
        assert!(!m.is_button_double_clicked(MouseButton::Right));
    }

    #[test]
    fn reset_double_click_drops_armed_click() {
        let mut m = Mouse::new(Duration::from_millis(500));
        let mut src = source(1.0, 1.0);
        src.buttons = vec![MouseButton::Left];
        m.update(&src, TICK);
        m.reset_double_click();
        src.buttons.clear();
        m.update(&src, TICK);
        src.buttons = vec![MouseButton::Left];
        m.update(&src, TICK);
        assert!(!m.is_button_double_clicked(MouseButton::Left));
    }

    #[test]
    fn display_lists_held_buttons() {
        let mut m = Mouse::new(Duration::from_millis(500));
        m.update(&source(3.0, 4.0), TICK);
        assert_eq!(m.to_string(), "[3, 4] IsIn: true DownButtons: None");

        let mut src = source(3.0, 4.0);
        src.buttons = vec![MouseButton::Right, MouseButton::Left];
        m.update(&src, TICK);
        assert_eq!(m.to_string(), "[3, 4] IsIn: true DownButtons: Left Right");
    }
}
