use std::fmt;

use super::buttons::ButtonStates;
use super::source::InputSource;
use super::types::Key;

/// Polled keyboard state for the current tick.
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    keys: ButtonStates<Key, { Key::COUNT }>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples `source` for one tick.
    pub fn update(&mut self, source: &impl InputSource) {
        self.keys.refresh(|k| source.is_key_down(k));
    }

    #[inline]
    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys.is_down(key)
    }

    #[inline]
    pub fn is_key_up(&self, key: Key) -> bool {
        self.keys.is_up(key)
    }

    #[inline]
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.keys.is_pressed(key)
    }

    #[inline]
    pub fn is_key_released(&self, key: Key) -> bool {
        self.keys.is_released(key)
    }

    /// Keys currently held, in scan order.
    pub fn keys_down(&self) -> impl Iterator<Item = Key> + '_ {
        self.keys.down()
    }

    pub fn keys(&self) -> &ButtonStates<Key, { Key::COUNT }> {
        &self.keys
    }
}

impl fmt::Display for Keyboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut held = self.keys_down();
        let Some(first) = held.next() else {
            return f.write_str("None");
        };
        write!(f, "{first}")?;
        for k in held {
            write!(f, " + {k}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::input::MouseButton;

    struct Held(Vec<Key>);

    impl InputSource for Held {
        fn is_key_down(&self, key: Key) -> bool {
            self.0.contains(&key)
        }
        fn is_button_down(&self, _button: MouseButton) -> bool {
            false
        }
        fn cursor_position(&self) -> Vec2 {
            Vec2::zero()
        }
        fn client_size(&self) -> Vec2 {
            Vec2::zero()
        }
    }

    #[test]
    fn key_edges_follow_polls() {
        let mut kb = Keyboard::new();
        kb.update(&Held(vec![Key::Space]));
        assert!(kb.is_key_pressed(Key::Space));
        kb.update(&Held(vec![Key::Space]));
        assert!(kb.is_key_down(Key::Space));
        assert!(!kb.is_key_pressed(Key::Space));
        kb.update(&Held(vec![]));
        assert!(kb.is_key_released(Key::Space));
        assert!(kb.is_key_up(Key::Space));
    }

    #[test]
    fn display_joins_held_keys() {
        let mut kb = Keyboard::new();
        assert_eq!(kb.to_string(), "None");
        kb.update(&Held(vec![Key::A, Key::Control]));
        assert_eq!(kb.to_string(), "Control + A");
    }
}
