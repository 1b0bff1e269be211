use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::text::TextFormat;

/// Dash pattern of a stroke.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dash,
    Dot,
    DashDot,
}

impl StrokeStyle {
    /// Alternating on/off lengths in multiples of the stroke width. Empty means solid.
    pub fn pattern(self) -> &'static [f32] {
        match self {
            StrokeStyle::Solid => &[],
            StrokeStyle::Dash => &[3.0, 2.0],
            StrokeStyle::Dot => &[1.0, 1.0],
            StrokeStyle::DashDot => &[3.0, 1.0, 1.0, 1.0],
        }
    }
}

/// Outline parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Stroke {
    /// Width in logical pixels.
    pub width: f32,
    pub style: StrokeStyle,
}

impl Stroke {
    #[inline]
    pub const fn new(width: f32, style: StrokeStyle) -> Self {
        Self { width, style }
    }

    #[inline]
    pub const fn solid(width: f32) -> Self {
        Self::new(width, StrokeStyle::Solid)
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.width.is_finite() && self.width > 0.0
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::solid(1.0)
    }
}

/// Rotation applied to a whole primitive.
///
/// `pivot = None` selects the primitive's default pivot: a line's midpoint, the center of
/// a rectangle or ellipse, or the client-area center for text.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rotation {
    pub degrees: f32,
    pub pivot: Option<Vec2>,
}

impl Rotation {
    /// Rotation about the primitive's default pivot.
    #[inline]
    pub const fn degrees(degrees: f32) -> Self {
        Self { degrees, pivot: None }
    }

    #[inline]
    pub const fn about(degrees: f32, pivot: Vec2) -> Self {
        Self { degrees, pivot: Some(pivot) }
    }

    /// Same rotation, with the pivot filled in when it was left to the default.
    #[inline]
    pub fn or_pivot(self, default: Vec2) -> Self {
        Self {
            degrees: self.degrees,
            pivot: Some(self.pivot.unwrap_or(default)),
        }
    }

    /// `(sin, cos)` of the angle.
    #[inline]
    pub fn sin_cos(&self) -> (f32, f32) {
        self.degrees.to_radians().sin_cos()
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.degrees % 360.0 == 0.0
    }
}

/// Text draw command.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub format: TextFormat,
    /// Top-left corner of the layout box in logical pixels.
    pub origin: Vec2,
    pub color: Color,
    /// Line wrap width. `None` disables wrapping.
    pub max_width: Option<f32>,
}

/// Renderer-agnostic drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        stroke: Stroke,
    },
    Rect {
        rect: Rect,
        color: Color,
        stroke: Stroke,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    Ellipse {
        center: Vec2,
        radii: Vec2,
        color: Color,
        stroke: Stroke,
    },
    FillEllipse {
        center: Vec2,
        radii: Vec2,
        color: Color,
    },
    Text(TextCmd),
}

impl Primitive {
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, Primitive::Text(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pivot_is_only_used_when_unset() {
        let c = Vec2::new(5.0, 5.0);
        assert_eq!(Rotation::degrees(30.0).or_pivot(c).pivot, Some(c));

        let p = Vec2::new(1.0, 2.0);
        assert_eq!(Rotation::about(30.0, p).or_pivot(c).pivot, Some(p));
    }

    #[test]
    fn full_turns_are_identity() {
        assert!(Rotation::degrees(0.0).is_identity());
        assert!(Rotation::degrees(-720.0).is_identity());
        assert!(!Rotation::degrees(90.0).is_identity());
    }

    #[test]
    fn solid_has_no_pattern() {
        assert!(StrokeStyle::Solid.pattern().is_empty());
        for style in [StrokeStyle::Dash, StrokeStyle::Dot, StrokeStyle::DashDot] {
            assert_eq!(style.pattern().len() % 2, 0, "{style:?} must alternate on/off");
        }
    }

    #[test]
    fn zero_width_stroke_is_invisible() {
        assert!(!Stroke::solid(0.0).is_visible());
        assert!(!Stroke::solid(f32::NAN).is_visible());
        assert!(Stroke::default().is_visible());
    }
}
