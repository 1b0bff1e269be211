use crate::paint::Color;

use super::{Primitive, Rotation};

/// A recorded primitive and its resolved rotation.
///
/// When present, `rotation.pivot` is always `Some`.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub primitive: Primitive,
    pub rotation: Option<Rotation>,
}

/// Primitives recorded for one frame, in call order.
///
/// The frame loop owns a single list and resets it at the start of every render; the
/// allocation is reused across frames.
#[derive(Debug, Default)]
pub struct DrawList {
    clear_color: Option<Color>,
    items: Vec<DrawItem>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops recorded items and sets the color the target is cleared to.
    pub fn reset(&mut self, clear_color: Option<Color>) {
        self.items.clear();
        self.clear_color = clear_color;
    }

    #[inline]
    pub fn clear_color(&self) -> Option<Color> {
        self.clear_color
    }

    #[inline]
    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = Some(color);
    }

    #[inline]
    pub fn push(&mut self, primitive: Primitive, rotation: Option<Rotation>) {
        self.items.push(DrawItem { primitive, rotation });
    }

    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;

    #[test]
    fn reset_keeps_capacity_and_replaces_clear_color() {
        let mut list = DrawList::new();
        for _ in 0..8 {
            list.push(
                Primitive::FillRect { rect: Rect::new(0.0, 0.0, 1.0, 1.0), color: Color::RED },
                None,
            );
        }
        list.set_clear_color(Color::WHITE);

        let cap = list.items.capacity();
        list.reset(None);
        assert!(list.is_empty());
        assert_eq!(list.clear_color(), None);
        assert_eq!(list.items.capacity(), cap);
    }
}
