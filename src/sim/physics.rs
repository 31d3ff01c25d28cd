//! Gravitation law and random sampling helpers

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inflated gravitational constant (6.67e-11 scaled by 10e10)
///
/// Chosen so particles visibly accelerate at pixel scale, not for accuracy.
pub const GRAVITATIONAL_CONSTANT: f32 = 6.67e-11 * 10e10;

/// Inclusive `[min, max]` range for a scalar
pub type NumberRange = [f32; 2];

/// Per-axis inclusive ranges for a 2D quantity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VectorRange {
    pub x: NumberRange,
    pub y: NumberRange,
}

impl VectorRange {
    pub const fn new(x: NumberRange, y: NumberRange) -> Self {
        Self { x, y }
    }

    /// Range collapsed to a single point
    pub const fn point(x: f32, y: f32) -> Self {
        Self {
            x: [x, x],
            y: [y, y],
        }
    }
}

/// [`VectorRange`] with either axis left out
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VectorRangePatch {
    pub x: Option<NumberRange>,
    pub y: Option<NumberRange>,
}

impl VectorRangePatch {
    /// Fill the missing axes from `base`
    pub fn over(self, base: VectorRange) -> VectorRange {
        VectorRange::new(self.x.unwrap_or(base.x), self.y.unwrap_or(base.y))
    }
}

/// Sample `floor(u * (max - min + 1) + min)` with `u` uniform in `[0, 1)`
///
/// For integral bounds this is a uniform integer in `[min, max]`. Reversed
/// bounds are not checked.
pub fn random_number_between<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    // Sampled in f64 so `u * span` can't round up to `max + 1`
    let u: f64 = rng.random();
    let (min, max) = (f64::from(min), f64::from(max));
    (u * (max - min + 1.0) + min).floor() as f32
}

/// [`random_number_between`] over an inclusive `[min, max]` pair
#[inline]
pub fn random_in_range<R: Rng + ?Sized>(rng: &mut R, [min, max]: NumberRange) -> f32 {
    random_number_between(rng, min, max)
}

/// Force magnitude between two masses at distance `d`
///
/// Diverges as `d` approaches zero; callers exclude self-pairs.
#[inline]
pub fn gravitation_force(m1: f32, m2: f32, d: f32) -> f32 {
    GRAVITATIONAL_CONSTANT * ((m1 * m2) / (d * d))
}
