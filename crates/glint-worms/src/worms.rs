use std::fmt::Write as _;

use glint_engine::coords::{Rect, Vec2};
use glint_engine::core::{AppControl, Game, UpdateCtx};
use glint_engine::draw::{Canvas, Rotation, Stroke, StrokeStyle};
use glint_engine::input::{Modifiers, MouseButton, MouseWheelDelta};
use glint_engine::paint::Color;
use glint_engine::text::{system_font, FontId, FontSystem, TextFormat};
use glint_engine::time::FrameSample;
use glint_engine::window::WindowConfig;

/// Pixel scroll distance counted as one wheel notch.
const PIXELS_PER_NOTCH: f32 = 40.0;

const HUD_SIZE: f32 = 16.0;
const MARKER_RADIUS: f32 = 24.0;

/// Demo game: a crosshair following the mouse plus an input HUD.
///
/// Double-clicking the left button drops (or removes) a marker at the cursor.
#[derive(Debug, Default)]
pub struct WormsGame {
    font: Option<FontId>,
    hud: String,

    cursor: Vec2,
    wheel_notches: f32,
    marker: Option<Vec2>,
}

impl WormsGame {
    fn rebuild_hud(&mut self, ctx: &UpdateCtx<'_>) {
        self.hud.clear();

        // Writing into a String cannot fail.
        let _ = writeln!(self.hud, "FPS: {:.1}", ctx.fps);
        let _ = writeln!(self.hud, "Delta: {:.2} ms", ctx.time.delta_secs() * 1000.0);
        let _ = write!(self.hud, "Mouse: ({:.0}, {:.0})", self.cursor.x, self.cursor.y);
        if !ctx.mouse.is_within_client() {
            self.hud.push_str(" outside");
        }
        self.hud.push('\n');

        self.hud.push_str("Keys:");
        for key in ctx.keyboard.keys_down() {
            let _ = write!(self.hud, " {key}");
        }
        self.hud.push('\n');

        let _ = write!(self.hud, "Wheel: {:.0}", self.wheel_notches);
        if ctx.resizing {
            self.hud.push_str("\n(resizing)");
        }
    }
}

impl Game for WormsGame {
    fn initialize(&mut self, config: &mut WindowConfig) {
        config.title = "Worms".to_string();
        config.resizable = true;
    }

    fn load_content(&mut self, fonts: &mut FontSystem) {
        let Some(bytes) = system_font() else {
            log::warn!("no system font found; HUD disabled");
            return;
        };
        match fonts.load_font(&bytes) {
            Ok(id) => self.font = Some(id),
            Err(err) => log::warn!("{err}; HUD disabled"),
        }
    }

    fn update(&mut self, ctx: &mut UpdateCtx<'_>) -> AppControl {
        if !ctx.focused {
            ctx.mouse.reset_double_click();
        }

        self.cursor = ctx.mouse.position();

        if ctx.mouse.is_button_double_clicked(MouseButton::Left) {
            self.marker = match self.marker {
                Some(_) => None,
                None => Some(self.cursor),
            };
            log::info!("marker {}", if self.marker.is_some() { "placed" } else { "removed" });
        }

        self.rebuild_hud(ctx);
        AppControl::Continue
    }

    fn draw_begin(&mut self, canvas: &mut Canvas<'_>) {
        canvas.clear(Color::BLACK);
    }

    fn draw(&mut self, canvas: &mut Canvas<'_>, time: FrameSample) {
        let size = canvas.viewport().size();

        // Crosshair
        let gray = Stroke::solid(1.0);
        canvas.line(
            Vec2::new(0.0, self.cursor.y),
            Vec2::new(size.x, self.cursor.y),
            Color::GRAY,
            gray,
        );
        canvas.line(
            Vec2::new(self.cursor.x, 0.0),
            Vec2::new(self.cursor.x, size.y),
            Color::GRAY,
            gray,
        );

        if let Some(at) = self.marker {
            let radii = Vec2::new(MARKER_RADIUS, MARKER_RADIUS);
            canvas.fill_ellipse(at, radii, Color::LIGHT_GREEN.with_opacity(0.5));
            canvas.ellipse(at, radii, Color::LIGHT_GREEN, Stroke::solid(2.0));

            let spin = (time.elapsed_secs() * 45.0 % 360.0) as f32;
            let box_half = MARKER_RADIUS * 1.5;
            canvas.rect_rotated(
                Rect::new(at.x - box_half, at.y - box_half, box_half * 2.0, box_half * 2.0),
                Color::WHITE,
                Stroke::new(1.0, StrokeStyle::Dash),
                Rotation::degrees(spin),
            );
        }

        if let Some(font) = self.font {
            canvas.text(
                self.hud.as_str(),
                TextFormat::new(font, HUD_SIZE),
                Vec2::new(10.0, 10.0),
                Color::WHITE,
            );
        }
    }

    fn on_mouse_wheel(&mut self, delta: MouseWheelDelta, _modifiers: Modifiers) {
        self.wheel_notches += match delta {
            MouseWheelDelta::Line { y, .. } => y,
            MouseWheelDelta::Pixel { y, .. } => y / PIXELS_PER_NOTCH,
        };
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use glint_engine::input::{InputSource, Key, Keyboard, Mouse};

    struct Held {
        left: bool,
        keys: &'static [Key],
    }

    impl InputSource for Held {
        fn is_key_down(&self, key: Key) -> bool {
            self.keys.contains(&key)
        }
        fn is_button_down(&self, button: MouseButton) -> bool {
            button == MouseButton::Left && self.left
        }
        fn cursor_position(&self) -> Vec2 {
            Vec2::new(100.0, 50.0)
        }
        fn client_size(&self) -> Vec2 {
            Vec2::new(720.0, 480.0)
        }
    }

    fn tick(game: &mut WormsGame, mouse: &mut Mouse, keyboard: &mut Keyboard, src: &Held) {
        let delta = Duration::from_millis(100);
        mouse.update(src, delta);
        keyboard.update(src);
        let mut ctx = UpdateCtx {
            time: FrameSample::new(delta, delta),
            fps: 60.0,
            mouse,
            keyboard,
            client_size: src.client_size(),
            focused: true,
            resizing: false,
        };
        game.update(&mut ctx);
    }

    #[test]
    fn wheel_accumulates_notches() {
        let mut game = WormsGame::default();
        let none = Modifiers::default();
        game.on_mouse_wheel(MouseWheelDelta::Line { x: 0.0, y: 1.0 }, none);
        game.on_mouse_wheel(MouseWheelDelta::Line { x: 0.0, y: 1.0 }, none);
        game.on_mouse_wheel(MouseWheelDelta::Pixel { x: 0.0, y: -PIXELS_PER_NOTCH }, none);
        assert_eq!(game.wheel_notches, 1.0);
    }

    #[test]
    fn hud_lists_held_keys_and_cursor() {
        let mut game = WormsGame::default();
        let mut mouse = Mouse::new(Duration::from_millis(500));
        let mut keyboard = Keyboard::new();
        let src = Held { left: false, keys: &[Key::A, Key::Space] };

        tick(&mut game, &mut mouse, &mut keyboard, &src);
        assert!(game.hud.contains("Mouse: (100, 50)"));
        assert!(game.hud.contains("Keys: Space A"));
        assert!(game.hud.starts_with("FPS: 60.0"));
    }

    #[test]
    fn double_click_toggles_marker() {
        let mut game = WormsGame::default();
        let mut mouse = Mouse::new(Duration::from_millis(500));
        let mut keyboard = Keyboard::new();
        let up = Held { left: false, keys: &[] };
        let down = Held { left: true, keys: &[] };

        for src in [&down, &up, &down] {
            tick(&mut game, &mut mouse, &mut keyboard, src);
        }
        assert_eq!(game.marker, Some(Vec2::new(100.0, 50.0)));

        for src in [&up, &down, &up, &down] {
            tick(&mut game, &mut mouse, &mut keyboard, src);
        }
        assert_eq!(game.marker, None);
    }
}
