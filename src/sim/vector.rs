//! 2D vector type for positions, velocities and forces
//!
//! `Vector2` is `glam::Vec2`. It is `Copy`, so copying is plain assignment and
//! mutating a copy never touches the original. Arithmetic goes through the
//! std operators (`+`, `-`, `+=`, `* f32`); the helpers below cover the two
//! operations glam doesn't spell the way the simulation needs.

use glam::Vec2;

pub type Vector2 = Vec2;

pub trait VectorExt {
    /// Multiply each component by its own factor
    fn scale_xy(self, sx: f32, sy: f32) -> Self;

    /// Divide both components by the magnitude.
    ///
    /// A zero vector yields NaN components; there is no clamp.
    fn direction(self) -> Self;
}

impl VectorExt for Vec2 {
    #[inline]
    fn scale_xy(self, sx: f32, sy: f32) -> Self {
        Vec2::new(self.x * sx, self.y * sy)
    }

    #[inline]
    fn direction(self) -> Self {
        self / self.length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_is_independent() {
        let original = Vector2::new(3.0, 4.0);
        let mut copy = original;
        copy += Vector2::new(1.0, 1.0);
        copy = copy.scale_xy(2.0, 2.0);

        assert_eq!(original, Vector2::new(3.0, 4.0));
        assert_eq!(copy, Vector2::new(8.0, 10.0));
    }

    #[test]
    fn test_add_sub() {
        let mut v = Vector2::new(1.0, 2.0);
        v += Vector2::new(3.0, -1.0);
        assert_eq!(v, Vector2::new(4.0, 1.0));
        v -= Vector2::new(4.0, 4.0);
        assert_eq!(v, Vector2::new(0.0, -3.0));
    }

    #[test]
    fn test_scale_non_uniform() {
        let v = Vector2::new(2.0, 3.0).scale_xy(0.5, -2.0);
        assert_eq!(v, Vector2::new(1.0, -6.0));

        // Uniform scale is the same factor twice
        let u = Vector2::new(2.0, 3.0).scale_xy(-0.1, -0.1);
        assert!((u.x + 0.2).abs() < 1e-6);
        assert!((u.y + 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_magnitude() {
        assert!((Vector2::new(3.0, 4.0).length() - 5.0).abs() < 1e-6);
        assert_eq!(Vector2::ZERO.length(), 0.0);
    }

    #[test]
    fn test_direction() {
        let d = Vector2::new(10.0, 0.0).direction();
        assert_eq!(d, Vector2::new(1.0, 0.0));

        let d = Vector2::new(-3.0, 4.0).direction();
        assert!((d.length() - 1.0).abs() < 1e-6);
        assert!((d.x + 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_direction_of_zero_is_nan() {
        let d = Vector2::ZERO.direction();
        assert!(d.x.is_nan());
        assert!(d.y.is_nan());
    }
}
