//! A single gravitating particle
//!
//! Each tick a particle sums the pull of every peer, integrates with
//! semi-implicit Euler, and bounces off the walls via [`Overflow`].

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use super::boundary::{Bounds, Overflow};
use super::physics::{NumberRange, VectorRange, gravitation_force, random_in_range};
use super::vector::VectorExt;
use crate::consts::ARROW_HEAD_LENGTH;
use crate::renderer::{ArcMode, DrawArc, DrawArrow, RenderSurface, colors};

/// Sampling ranges for spawning one particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleOptions {
    pub position_range: VectorRange,
    pub velocity_range: VectorRange,
    pub radius_range: NumberRange,
    pub density_range: NumberRange,
}

#[derive(Debug, Clone)]
pub struct Particle {
    position: Vec2,
    velocity: Vec2,
    radius: f32,
    density: f32,
    volume: f32,
    mass: f32,
    /// Net force from the last update
    forces: Vec2,
    /// Acceleration from the last update (drawn as an arrow)
    acceleration: Vec2,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32, density: f32) -> Self {
        let volume = (4.0 / 3.0) * PI * radius.powi(3);
        Self {
            position,
            velocity,
            radius,
            density,
            volume,
            mass: volume * density,
            forces: Vec2::ZERO,
            acceleration: Vec2::ZERO,
        }
    }

    /// Spawn a particle with every property sampled from `options`
    pub fn factory<R: Rng + ?Sized>(options: &ParticleOptions, rng: &mut R) -> Self {
        let position = Vec2::new(
            random_in_range(rng, options.position_range.x),
            random_in_range(rng, options.position_range.y),
        );
        let velocity = Vec2::new(
            random_in_range(rng, options.velocity_range.x),
            random_in_range(rng, options.velocity_range.y),
        );
        let radius = random_in_range(rng, options.radius_range);
        let density = random_in_range(rng, options.density_range);

        Self::new(position, velocity, radius, density)
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn density(&self) -> f32 {
        self.density
    }

    #[inline]
    pub fn volume(&self) -> f32 {
        self.volume
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn forces(&self) -> Vec2 {
        self.forces
    }

    #[inline]
    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    /// True if position and velocity are both finite
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }

    /// Gravitational pull `other` exerts on this particle
    ///
    /// Zero when `other` is this very particle. Two distinct particles at the
    /// same position produce NaN.
    pub fn attraction_to(&self, other: &Particle) -> Vec2 {
        if std::ptr::eq(self, other) {
            return Vec2::ZERO;
        }

        let between = other.position - self.position;
        let distance = between.length();
        let force = gravitation_force(self.mass, other.mass, distance);
        between.direction() * force
    }

    /// Sum of attractions from `peers`, which may include this particle
    pub fn net_force(&self, peers: &[Particle]) -> Vec2 {
        peers
            .iter()
            .fold(Vec2::ZERO, |forces, peer| forces + self.attraction_to(peer))
    }

    /// Advance one tick under `forces`
    ///
    /// Without `bounds` the particle counts as overflowing on every edge.
    pub fn update(&mut self, dt: f32, forces: Vec2, bounds: Option<&Bounds>) {
        self.forces = forces;
        self.acceleration = forces * (1.0 / self.mass);
        self.velocity += self.acceleration * dt;

        let next_position = self.position + self.velocity * dt;
        let overflow = Overflow::classify(next_position, self.radius, bounds);

        if !overflow.any() {
            self.position = next_position;
            return;
        }

        // Bounce, then move with the damped velocity (no second check)
        self.velocity = overflow.damped_velocity(self.velocity);
        self.position += self.velocity * dt;
    }

    /// Draw the body and an arrow for the last acceleration scaled by `dt`
    pub fn render<S: RenderSurface + ?Sized>(&self, surface: &mut S, dt: f32) {
        surface.draw_arc(&DrawArc {
            center: self.position,
            radius: self.radius,
            color: colors::PARTICLE,
            mode: ArcMode::Fill,
        });

        surface.draw_arrow(&DrawArrow {
            from: self.position,
            to: self.position + self.acceleration * dt,
            head_length: ARROW_HEAD_LENGTH,
        });
    }
}
