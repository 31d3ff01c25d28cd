//! Bounding rectangle and wall-bounce heuristic
//!
//! Particles are not reflected off the walls physically. Instead the projected
//! position is classified into one of eight edge/half cases and each case maps
//! to a damped sign flip of the velocity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::physics::VectorRange;

/// Velocity factor applied on every wall bounce
pub const BOUNCE_DAMPING: f32 = 0.1;

/// Axis-aligned simulation rectangle, in the same space as positions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// `[min, max]` on the x axis
    pub x: [f32; 2],
    /// `[min, max]` on the y axis (y grows downward on screen)
    pub y: [f32; 2],
}

impl Bounds {
    pub const fn new(x: [f32; 2], y: [f32; 2]) -> Self {
        Self { x, y }
    }

    /// Bounds anchored at the origin with the given size
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self {
            x: [0.0, width],
            y: [0.0, height],
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.x[1] - self.x[0]
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.y[1] - self.y[0]
    }

    /// Exact center point of the rectangle
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.x[0] + self.x[1]) / 2.0,
            (self.y[0] + self.y[1]) / 2.0,
        )
    }

    /// The rectangle as a sampling range (for spawning positions)
    pub fn as_range(&self) -> VectorRange {
        VectorRange::new(self.x, self.y)
    }
}

/// [`Bounds`] with either axis left out
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<[f32; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<[f32; 2]>,
}

impl BoundsPatch {
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }

    /// Fill the missing axes from `base`
    pub fn over(self, base: Bounds) -> Bounds {
        Bounds::new(self.x.unwrap_or(base.x), self.y.unwrap_or(base.y))
    }
}

impl From<Bounds> for BoundsPatch {
    fn from(bounds: Bounds) -> Self {
        Self {
            x: Some(bounds.x),
            y: Some(bounds.y),
        }
    }
}

/// Which edge was breached, and on which half of that edge
///
/// Several flags can be set at once when a position breaches two edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overflow {
    pub left_top: bool,
    pub left_bottom: bool,
    pub right_top: bool,
    pub right_bottom: bool,
    pub top_left: bool,
    pub top_right: bool,
    pub bottom_left: bool,
    pub bottom_right: bool,
}

impl Overflow {
    /// Every flag set (no bounds to contain against)
    pub const ALL: Self = Self {
        left_top: true,
        left_bottom: true,
        right_top: true,
        right_bottom: true,
        top_left: true,
        top_right: true,
        bottom_left: true,
        bottom_right: true,
    };

    /// Classify a candidate position for a particle of `radius`
    ///
    /// The halves are split at `max / 2` of each axis, not at the midpoint of
    /// `[min, max]`.
    pub fn classify(pos: Vec2, radius: f32, bounds: Option<&Bounds>) -> Self {
        let Some(bounds) = bounds else {
            return Self::ALL;
        };

        let [x_min, x_max] = bounds.x;
        let [y_min, y_max] = bounds.y;
        let mut overflow = Self::default();

        if pos.x < x_min + radius {
            if pos.y + radius < y_max / 2.0 {
                overflow.left_top = true;
            } else {
                overflow.left_bottom = true;
            }
        }

        if pos.x > x_max - radius {
            if pos.y - radius < y_max / 2.0 {
                overflow.right_top = true;
            } else {
                overflow.right_bottom = true;
            }
        }

        if pos.y < y_min + radius {
            if pos.x + radius < x_max / 2.0 {
                overflow.top_left = true;
            } else {
                overflow.top_right = true;
            }
        }

        if pos.y > y_max - radius {
            if pos.x - radius < x_max / 2.0 {
                overflow.bottom_left = true;
            } else {
                overflow.bottom_right = true;
            }
        }

        overflow
    }

    /// True if any edge was breached
    pub fn any(&self) -> bool {
        self.left_top
            || self.left_bottom
            || self.right_top
            || self.right_bottom
            || self.top_left
            || self.top_right
            || self.bottom_left
            || self.bottom_right
    }

    /// Velocity after bouncing. First matching row wins.
    ///
    /// `top_right` sits with `right_top`, not with `top_left`; the grouping is
    /// kept as is.
    pub fn damped_velocity(&self, vel: Vec2) -> Vec2 {
        let d = BOUNCE_DAMPING;
        if self.right_top || self.top_right {
            Vec2::new(-vel.x * d, -vel.y * d)
        } else if self.right_bottom || self.left_top || self.left_bottom {
            Vec2::new(-vel.x * d, vel.y * d)
        } else if self.top_left || self.bottom_right || self.bottom_left {
            Vec2::new(vel.x * d, -vel.y * d)
        } else {
            Vec2::ZERO
        }
    }
}
