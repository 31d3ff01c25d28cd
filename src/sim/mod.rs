//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Caller-supplied frame delta only
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies beyond the `RenderSurface` trait

pub mod boundary;
pub mod particle;
pub mod physics;
pub mod simulation;
pub mod vector;

pub use boundary::{BOUNCE_DAMPING, Bounds, BoundsPatch, Overflow};
pub use particle::{Particle, ParticleOptions};
pub use physics::{
    GRAVITATIONAL_CONSTANT, NumberRange, VectorRange, VectorRangePatch, gravitation_force,
    random_in_range, random_number_between,
};
pub use simulation::{Simulation, SimulationOptions, SpawnRanges, SpawnRangesPatch};
pub use vector::{Vector2, VectorExt};
