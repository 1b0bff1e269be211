use std::fmt;

use crate::coords::Vec2;

/// Identifier from a fixed, ordered set of two-state inputs (keys, mouse buttons).
///
/// `ALL` defines the scan order used wherever a deterministic iteration is required
/// (edge queries, double-click tie-breaks). `index()` must be the position in `ALL`.
pub trait ButtonId: Copy + Eq + fmt::Debug + 'static {
    const ALL: &'static [Self];

    fn index(self) -> usize;
}

/// Keyboard key identifier.
///
/// The runtime maps platform key codes into these variants. Keys outside this set are
/// not tracked.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    // Common control keys
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,

    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Modifiers as keys
    Shift,
    Control,
    Alt,
    Meta,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Function keys
    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,
}

impl Key {
    pub const COUNT: usize = 67;
}

impl ButtonId for Key {
    const ALL: &'static [Key] = &[
        Key::Escape, Key::Enter, Key::Tab, Key::Backspace, Key::Space,
        Key::Insert, Key::Delete, Key::Home, Key::End, Key::PageUp, Key::PageDown,
        Key::ArrowUp, Key::ArrowDown, Key::ArrowLeft, Key::ArrowRight,
        Key::Shift, Key::Control, Key::Alt, Key::Meta,
        Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
        Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
        Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
        Key::Digit0, Key::Digit1, Key::Digit2, Key::Digit3, Key::Digit4,
        Key::Digit5, Key::Digit6, Key::Digit7, Key::Digit8, Key::Digit9,
        Key::F1, Key::F2, Key::F3, Key::F4, Key::F5, Key::F6,
        Key::F7, Key::F8, Key::F9, Key::F10, Key::F11, Key::F12,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Mouse button identifier.
///
/// Declaration order is the scan order: Left, Right, Middle, X1, X2.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    /// First side button ("back").
    X1,
    /// Second side button ("forward").
    X2,
}

impl MouseButton {
    pub const COUNT: usize = 5;
}

impl ButtonId for MouseButton {
    const ALL: &'static [MouseButton] = &[
        MouseButton::Left,
        MouseButton::Right,
        MouseButton::Middle,
        MouseButton::X1,
        MouseButton::X2,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Modifier keys state.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Mouse wheel delta.
///
/// `Line` corresponds to "notches"; `Pixel` is high precision touchpad input.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseWheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

/// Pointer button event in client coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub position: Vec2,
    pub modifiers: Modifiers,
}

/// Platform-agnostic window input notifications.
///
/// These drive both the polled `PlatformInput` state and the event-style `Game` hooks.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    ModifiersChanged(Modifiers),

    Key {
        key: Key,
        state: KeyState,
        modifiers: Modifiers,
        /// True when event is a key-repeat.
        repeat: bool,
    },

    PointerMoved(Vec2),
    PointerButton(PointerButtonEvent),

    MouseWheel {
        delta: MouseWheelDelta,
        modifiers: Modifiers,
    },

    /// Pointer left the window surface.
    PointerLeft,

    /// Window focus change.
    Focused(bool),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_scan_order_matches_index() {
        assert_eq!(Key::ALL.len(), Key::COUNT);
        for (i, k) in Key::ALL.iter().enumerate() {
            assert_eq!(k.index(), i, "{k} is out of order");
        }
    }

    #[test]
    fn mouse_scan_order_matches_index() {
        assert_eq!(MouseButton::ALL.len(), MouseButton::COUNT);
        for (i, b) in MouseButton::ALL.iter().enumerate() {
            assert_eq!(b.index(), i);
        }
    }
}
