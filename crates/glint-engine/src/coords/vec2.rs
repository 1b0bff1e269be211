use core::ops::{Add, Div, Mul, Sub};

/// 2D vector in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Midpoint between `self` and `other`.
    #[inline]
    pub fn midpoint(self, other: Vec2) -> Vec2 {
        (self + other) * 0.5
    }

    /// Rotates the point around `pivot` by precomputed `(sin, cos)`.
    ///
    /// With +Y down, a positive angle turns clockwise on screen.
    #[inline]
    pub fn rotated_about(self, pivot: Vec2, sin: f32, cos: f32) -> Vec2 {
        let d = self - pivot;
        Vec2::new(
            pivot.x + d.x * cos - d.y * sin,
            pivot.y + d.x * sin + d.y * cos,
        )
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn quarter_turn_is_clockwise_on_screen() {
        let (sin, cos) = 90f32.to_radians().sin_cos();
        let p = Vec2::new(10.0, 0.0).rotated_about(Vec2::zero(), sin, cos);
        assert!(close(p, Vec2::new(0.0, 10.0)));
    }

    #[test]
    fn pivot_is_a_fixed_point() {
        let (sin, cos) = 33f32.to_radians().sin_cos();
        let pivot = Vec2::new(5.0, -2.0);
        assert!(close(pivot.rotated_about(pivot, sin, cos), pivot));
    }

    #[test]
    fn midpoint_is_average() {
        assert_eq!(Vec2::new(0.0, 4.0).midpoint(Vec2::new(10.0, 0.0)), Vec2::new(5.0, 2.0));
    }
}
