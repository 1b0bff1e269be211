use crate::coords::Vec2;

use super::types::{ButtonId, InputEvent, Key, KeyState, MouseButton, MouseButtonState, Modifiers};

/// Raw, unbuffered input polling.
///
/// Every query is a point-in-time sample; edge detection and double-buffering are done by
/// the input devices that sample a source once per tick.
pub trait InputSource {
    fn is_key_down(&self, key: Key) -> bool;

    fn is_button_down(&self, button: MouseButton) -> bool;

    /// Pointer position in client coordinates (logical pixels).
    fn cursor_position(&self) -> Vec2;

    /// Client area size in logical pixels.
    fn client_size(&self) -> Vec2;

    fn is_focused(&self) -> bool {
        true
    }
}

/// Held-state snapshot maintained from window events.
///
/// This is the pollable view of the platform: the runtime applies every translated
/// `InputEvent` as it arrives and input devices read it once per tick.
#[derive(Debug, Clone)]
pub struct PlatformInput {
    keys: [bool; Key::COUNT],
    buttons: [bool; MouseButton::COUNT],

    /// Last known pointer position; kept after the pointer leaves the window.
    pub cursor: Vec2,

    /// Whether the pointer is over the window surface.
    pub hovered: bool,

    pub client_size: Vec2,
    pub modifiers: Modifiers,
    pub focused: bool,
}

impl Default for PlatformInput {
    fn default() -> Self {
        Self {
            keys: [false; Key::COUNT],
            buttons: [false; MouseButton::COUNT],
            cursor: Vec2::zero(),
            hovered: false,
            client_size: Vec2::zero(),
            modifiers: Modifiers::default(),
            focused: true,
        }
    }
}

impl PlatformInput {
    pub fn new(client_size: Vec2) -> Self {
        Self {
            client_size,
            ..Self::default()
        }
    }

    /// Applies a platform-agnostic input event to the held state.
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Release events are not delivered to an unfocused window.
                    self.keys = [false; Key::COUNT];
                    self.buttons = [false; MouseButton::COUNT];
                }
            }

            InputEvent::PointerMoved(pos) => {
                self.cursor = *pos;
                self.hovered = true;
            }

            InputEvent::PointerLeft => {
                self.hovered = false;
            }

            InputEvent::Key {
                key,
                state,
                modifiers,
                ..
            } => {
                self.modifiers = *modifiers;
                self.keys[key.index()] = *state == KeyState::Pressed;
            }

            InputEvent::PointerButton(e) => {
                self.cursor = e.position;
                self.modifiers = e.modifiers;
                self.buttons[e.button.index()] = e.state == MouseButtonState::Pressed;
            }

            InputEvent::MouseWheel { modifiers, .. } => {
                self.modifiers = *modifiers;
            }
        }
    }

    pub fn set_client_size(&mut self, size: Vec2) {
        self.client_size = size;
    }
}

impl InputSource for PlatformInput {
    #[inline]
    fn is_key_down(&self, key: Key) -> bool {
        self.keys[key.index()]
    }

    #[inline]
    fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons[button.index()]
    }

    #[inline]
    fn cursor_position(&self) -> Vec2 {
        self.cursor
    }

    #[inline]
    fn client_size(&self) -> Vec2 {
        self.client_size
    }

    #[inline]
    fn is_focused(&self) -> bool {
        self.focused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerButtonEvent;

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key {
            key,
            state,
            modifiers: Modifiers::default(),
            repeat: false,
        }
    }

    #[test]
    fn key_events_toggle_held_state() {
        let mut p = PlatformInput::default();
        p.apply_event(&key(Key::W, KeyState::Pressed));
        assert!(p.is_key_down(Key::W));
        p.apply_event(&key(Key::W, KeyState::Released));
        assert!(!p.is_key_down(Key::W));
    }

    #[test]
    fn button_event_moves_cursor() {
        let mut p = PlatformInput::default();
        p.apply_event(&InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Right,
            state: MouseButtonState::Pressed,
            position: Vec2::new(4.0, 9.0),
            modifiers: Modifiers::default(),
        }));
        assert!(p.is_button_down(MouseButton::Right));
        assert_eq!(p.cursor_position(), Vec2::new(4.0, 9.0));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut p = PlatformInput::default();
        p.apply_event(&key(Key::Space, KeyState::Pressed));
        p.apply_event(&InputEvent::Focused(false));
        assert!(!p.is_key_down(Key::Space));
        assert!(!p.is_focused());
    }

    #[test]
    fn pointer_left_keeps_last_position() {
        let mut p = PlatformInput::default();
        p.apply_event(&InputEvent::PointerMoved(Vec2::new(30.0, 40.0)));
        p.apply_event(&InputEvent::PointerLeft);
        assert!(!p.hovered);
        assert_eq!(p.cursor_position(), Vec2::new(30.0, 40.0));
    }
}
