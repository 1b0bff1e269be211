use crate::coords::{Rect, Vec2, Viewport};
use crate::paint::Color;
use crate::text::TextFormat;

use super::{DrawList, Primitive, Rotation, Stroke, TextCmd};

/// Scoped drawing context for one frame.
///
/// Borrows the frame loop's `DrawList` for the duration of the draw hooks and is dropped
/// before the list is handed to the graphics device, so nothing can be recorded once the
/// frame is being presented.
pub struct Canvas<'a> {
    list: &'a mut DrawList,
    viewport: Viewport,
}

impl<'a> Canvas<'a> {
    #[inline]
    pub fn new(list: &'a mut DrawList, viewport: Viewport) -> Self {
        Self { list, viewport }
    }

    /// Client area in logical pixels.
    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Fills the whole target with `color` before any primitive is drawn.
    #[inline]
    pub fn clear(&mut self, color: Color) {
        self.list.set_clear_color(color);
    }

    // ── lines ─────────────────────────────────────────────────────────────

    pub fn line(&mut self, from: Vec2, to: Vec2, color: Color, stroke: Stroke) {
        self.list.push(Primitive::Line { from, to, color, stroke }, None);
    }

    /// Rotates about the line's midpoint unless `rotation` names a pivot.
    pub fn line_rotated(
        &mut self,
        from: Vec2,
        to: Vec2,
        color: Color,
        stroke: Stroke,
        rotation: Rotation,
    ) {
        let rotation = rotation.or_pivot(from.midpoint(to));
        self.list.push(Primitive::Line { from, to, color, stroke }, Some(rotation));
    }

    // ── rectangles ────────────────────────────────────────────────────────

    pub fn rect(&mut self, rect: Rect, color: Color, stroke: Stroke) {
        self.list.push(Primitive::Rect { rect, color, stroke }, None);
    }

    pub fn rect_rotated(&mut self, rect: Rect, color: Color, stroke: Stroke, rotation: Rotation) {
        let rotation = rotation.or_pivot(rect.center());
        self.list.push(Primitive::Rect { rect, color, stroke }, Some(rotation));
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.list.push(Primitive::FillRect { rect, color }, None);
    }

    pub fn fill_rect_rotated(&mut self, rect: Rect, color: Color, rotation: Rotation) {
        let rotation = rotation.or_pivot(rect.center());
        self.list.push(Primitive::FillRect { rect, color }, Some(rotation));
    }

    // ── ellipses ──────────────────────────────────────────────────────────

    pub fn ellipse(&mut self, center: Vec2, radii: Vec2, color: Color, stroke: Stroke) {
        self.list.push(Primitive::Ellipse { center, radii, color, stroke }, None);
    }

    pub fn ellipse_rotated(
        &mut self,
        center: Vec2,
        radii: Vec2,
        color: Color,
        stroke: Stroke,
        rotation: Rotation,
    ) {
        let rotation = rotation.or_pivot(center);
        self.list.push(Primitive::Ellipse { center, radii, color, stroke }, Some(rotation));
    }

    pub fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        self.list.push(Primitive::FillEllipse { center, radii, color }, None);
    }

    pub fn fill_ellipse_rotated(
        &mut self,
        center: Vec2,
        radii: Vec2,
        color: Color,
        rotation: Rotation,
    ) {
        let rotation = rotation.or_pivot(center);
        self.list.push(Primitive::FillEllipse { center, radii, color }, Some(rotation));
    }

    // ── text ──────────────────────────────────────────────────────────────

    /// Draws `text` with its layout box spanning from `origin` to the client edge.
    pub fn text(&mut self, text: impl Into<String>, format: TextFormat, origin: Vec2, color: Color) {
        let cmd = self.text_cmd(text.into(), format, origin, color);
        self.list.push(Primitive::Text(cmd), None);
    }

    /// Rotates about the client-area center unless `rotation` names a pivot.
    pub fn text_rotated(
        &mut self,
        text: impl Into<String>,
        format: TextFormat,
        origin: Vec2,
        color: Color,
        rotation: Rotation,
    ) {
        let cmd = self.text_cmd(text.into(), format, origin, color);
        let rotation = rotation.or_pivot(self.viewport.center());
        self.list.push(Primitive::Text(cmd), Some(rotation));
    }

    fn text_cmd(&self, text: String, format: TextFormat, origin: Vec2, color: Color) -> TextCmd {
        let room = self.viewport.width - origin.x;
        TextCmd {
            text,
            format,
            origin,
            color,
            max_width: (room > 0.0).then_some(room),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::FontId;

    fn pivot_of(list: &DrawList, i: usize) -> Option<Vec2> {
        list.items()[i].rotation.and_then(|r| r.pivot)
    }

    #[test]
    fn primitives_are_recorded_in_call_order() {
        let mut list = DrawList::new();
        {
            let mut c = Canvas::new(&mut list, Viewport::new(100.0, 100.0));
            c.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::RED);
            c.line(Vec2::zero(), Vec2::new(5.0, 5.0), Color::WHITE, Stroke::default());
            c.fill_ellipse(Vec2::new(50.0, 50.0), Vec2::new(3.0, 3.0), Color::GRAY);
        }
        let kinds: Vec<_> = list
            .items()
            .iter()
            .map(|i| std::mem::discriminant(&i.primitive))
            .collect();
        assert_eq!(kinds.len(), 3);
        assert!(matches!(list.items()[0].primitive, Primitive::FillRect { .. }));
        assert!(matches!(list.items()[1].primitive, Primitive::Line { .. }));
        assert!(matches!(list.items()[2].primitive, Primitive::FillEllipse { .. }));
        assert!(list.items().iter().all(|i| i.rotation.is_none()));
    }

    // ── default pivots ────────────────────────────────────────────────────

    #[test]
    fn line_pivots_on_midpoint() {
        let mut list = DrawList::new();
        Canvas::new(&mut list, Viewport::new(100.0, 100.0)).line_rotated(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 20.0),
            Color::WHITE,
            Stroke::default(),
            Rotation::degrees(45.0),
        );
        assert_eq!(pivot_of(&list, 0), Some(Vec2::new(5.0, 10.0)));
    }

    #[test]
    fn rect_and_ellipse_pivot_on_center() {
        let mut list = DrawList::new();
        {
            let mut c = Canvas::new(&mut list, Viewport::new(100.0, 100.0));
            c.rect_rotated(
                Rect::new(10.0, 10.0, 20.0, 40.0),
                Color::WHITE,
                Stroke::default(),
                Rotation::degrees(10.0),
            );
            c.fill_ellipse_rotated(
                Vec2::new(7.0, 8.0),
                Vec2::new(2.0, 1.0),
                Color::WHITE,
                Rotation::degrees(10.0),
            );
        }
        assert_eq!(pivot_of(&list, 0), Some(Vec2::new(20.0, 30.0)));
        assert_eq!(pivot_of(&list, 1), Some(Vec2::new(7.0, 8.0)));
    }

    #[test]
    fn text_pivots_on_client_center() {
        let mut list = DrawList::new();
        Canvas::new(&mut list, Viewport::new(720.0, 480.0)).text_rotated(
            "hi",
            TextFormat::new(FontId(0), 12.0),
            Vec2::new(5.0, 5.0),
            Color::WHITE,
            Rotation::degrees(90.0),
        );
        assert_eq!(pivot_of(&list, 0), Some(Vec2::new(360.0, 240.0)));
    }

    #[test]
    fn explicit_pivot_wins() {
        let mut list = DrawList::new();
        let p = Vec2::new(1.0, 1.0);
        Canvas::new(&mut list, Viewport::new(100.0, 100.0)).fill_rect_rotated(
            Rect::new(10.0, 10.0, 20.0, 20.0),
            Color::WHITE,
            Rotation::about(30.0, p),
        );
        assert_eq!(pivot_of(&list, 0), Some(p));
    }

    // ── text layout box ───────────────────────────────────────────────────

    #[test]
    fn text_wraps_at_client_edge() {
        let mut list = DrawList::new();
        {
            let mut c = Canvas::new(&mut list, Viewport::new(200.0, 100.0));
            c.text("a", TextFormat::new(FontId(0), 12.0), Vec2::new(50.0, 0.0), Color::WHITE);
            c.text("b", TextFormat::new(FontId(0), 12.0), Vec2::new(250.0, 0.0), Color::WHITE);
        }
        let Primitive::Text(a) = &list.items()[0].primitive else { panic!("expected text") };
        let Primitive::Text(b) = &list.items()[1].primitive else { panic!("expected text") };
        assert_eq!(a.max_width, Some(150.0));
        assert_eq!(b.max_width, None);
    }

    #[test]
    fn clear_sets_list_clear_color() {
        let mut list = DrawList::new();
        Canvas::new(&mut list, Viewport::new(1.0, 1.0)).clear(Color::CORNFLOWER_BLUE);
        assert_eq!(list.clear_color(), Some(Color::CORNFLOWER_BLUE));
    }
}
