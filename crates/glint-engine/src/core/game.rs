use crate::coords::Vec2;
use crate::draw::Canvas;
use crate::input::{
    InputEvent, Key, KeyState, Modifiers, MouseButtonState, MouseWheelDelta, PointerButtonEvent,
};
use crate::text::FontSystem;
use crate::time::FrameSample;
use crate::window::WindowConfig;

use super::ctx::UpdateCtx;

/// Control directive returned by game callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Game contract: lifecycle, per-tick and input hooks.
///
/// Every hook has a default, so a game implements only what it needs.
///
/// Lifecycle order:
/// 1. `initialize` (before the window exists)
/// 2. `load_content`
/// 3. per tick: `update`, then, when a frame can be drawn, `draw_begin`, `draw`, `draw_end`
/// 4. `unload_content`, `exiting`
///
/// Input hooks run as window events arrive, between ticks.
pub trait Game {
    /// Adjusts window settings before the window is created.
    fn initialize(&mut self, config: &mut WindowConfig) {
        let _ = config;
    }

    /// Loads fonts and other device resources.
    fn load_content(&mut self, fonts: &mut FontSystem) {
        let _ = fonts;
    }

    /// Advances game state. Runs every tick, including while rendering is paused.
    fn update(&mut self, ctx: &mut UpdateCtx<'_>) -> AppControl {
        let _ = ctx;
        AppControl::Continue
    }

    fn draw_begin(&mut self, canvas: &mut Canvas<'_>) {
        let _ = canvas;
    }

    fn draw(&mut self, canvas: &mut Canvas<'_>, time: FrameSample) {
        let _ = (canvas, time);
    }

    fn draw_end(&mut self, canvas: &mut Canvas<'_>) {
        let _ = canvas;
    }

    fn unload_content(&mut self) {}

    /// Last hook before the loop stops.
    fn exiting(&mut self) {}

    // ── input events ──────────────────────────────────────────────────────

    /// Key went down (also fired for key repeat). Escape exits by default.
    fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> AppControl {
        let _ = modifiers;
        if key == Key::Escape {
            AppControl::Exit
        } else {
            AppControl::Continue
        }
    }

    fn on_key_up(&mut self, key: Key, modifiers: Modifiers) {
        let _ = (key, modifiers);
    }

    fn on_mouse_down(&mut self, event: &PointerButtonEvent) {
        let _ = event;
    }

    fn on_mouse_up(&mut self, event: &PointerButtonEvent) {
        let _ = event;
    }

    fn on_mouse_move(&mut self, position: Vec2) {
        let _ = position;
    }

    fn on_mouse_wheel(&mut self, delta: MouseWheelDelta, modifiers: Modifiers) {
        let _ = (delta, modifiers);
    }
}

/// Routes one input event to the matching input hook.
pub fn dispatch_input<G: Game + ?Sized>(game: &mut G, event: &InputEvent) -> AppControl {
    match event {
        InputEvent::Key { key, state: KeyState::Pressed, modifiers, .. } => {
            return game.on_key_down(*key, *modifiers);
        }
        InputEvent::Key { key, state: KeyState::Released, modifiers, .. } => {
            game.on_key_up(*key, *modifiers);
        }
        InputEvent::PointerButton(e) => match e.state {
            MouseButtonState::Pressed => game.on_mouse_down(e),
            MouseButtonState::Released => game.on_mouse_up(e),
        },
        InputEvent::PointerMoved(p) => game.on_mouse_move(*p),
        InputEvent::MouseWheel { delta, modifiers } => game.on_mouse_wheel(*delta, *modifiers),
        InputEvent::ModifiersChanged(_) | InputEvent::PointerLeft | InputEvent::Focused(_) => {}
    }
    AppControl::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseButton;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Game for Recorder {
        fn on_key_up(&mut self, key: Key, _: Modifiers) {
            self.calls.push(format!("up {key}"));
        }
        fn on_mouse_down(&mut self, e: &PointerButtonEvent) {
            self.calls.push(format!("down {}", e.button));
        }
        fn on_mouse_up(&mut self, e: &PointerButtonEvent) {
            self.calls.push(format!("up {}", e.button));
        }
        fn on_mouse_move(&mut self, p: Vec2) {
            self.calls.push(format!("move {} {}", p.x, p.y));
        }
        fn on_mouse_wheel(&mut self, delta: MouseWheelDelta, _: Modifiers) {
            if let MouseWheelDelta::Line { y, .. } = delta {
                self.calls.push(format!("wheel {y}"));
            }
        }
    }

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, modifiers: Modifiers::default(), repeat: false }
    }

    fn button(button: MouseButton, state: MouseButtonState) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button,
            state,
            position: Vec2::zero(),
            modifiers: Modifiers::default(),
        })
    }

    #[test]
    fn escape_exits_by_default() {
        let mut g = Recorder::default();
        assert_eq!(dispatch_input(&mut g, &key(Key::Escape, KeyState::Pressed)), AppControl::Exit);
        assert_eq!(dispatch_input(&mut g, &key(Key::A, KeyState::Pressed)), AppControl::Continue);
        assert_eq!(dispatch_input(&mut g, &key(Key::Escape, KeyState::Released)), AppControl::Continue);
    }

    #[test]
    fn events_reach_matching_hooks() {
        let mut g = Recorder::default();
        dispatch_input(&mut g, &key(Key::Q, KeyState::Released));
        dispatch_input(&mut g, &button(MouseButton::Left, MouseButtonState::Pressed));
        dispatch_input(&mut g, &button(MouseButton::X1, MouseButtonState::Released));
        dispatch_input(&mut g, &InputEvent::PointerMoved(Vec2::new(3.0, 4.0)));
        dispatch_input(
            &mut g,
            &InputEvent::MouseWheel {
                delta: MouseWheelDelta::Line { x: 0.0, y: -1.0 },
                modifiers: Modifiers::default(),
            },
        );
        dispatch_input(&mut g, &InputEvent::Focused(false));

        assert_eq!(g.calls, ["up Q", "down Left", "up X1", "move 3 4", "wheel -1"]);
    }
}
