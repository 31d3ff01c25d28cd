//! The particle collection and its per-frame driver

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boundary::Bounds;
use super::particle::{Particle, ParticleOptions};
use super::physics::{NumberRange, VectorRange, VectorRangePatch, random_in_range};
use crate::consts::DEFAULT_PARTICLE_COUNT;
use crate::renderer::RenderSurface;

/// Velocity, radius and density ranges for one family of particles
///
/// Deserializes leniently: missing fields keep the ordinary defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "SpawnRangesPatch")]
pub struct SpawnRanges {
    pub velocity: VectorRange,
    pub radius: NumberRange,
    pub density: NumberRange,
}

impl Default for SpawnRanges {
    /// Ordinary particles: all drift the same way, light and mid-sized
    fn default() -> Self {
        Self {
            velocity: VectorRange::new([-50.0, -50.0], [50.0, 50.0]),
            radius: [10.0, 30.0],
            density: [1.0, 100.0],
        }
    }
}

impl SpawnRanges {
    /// The single heavy particle pinned at the center
    pub fn center() -> Self {
        Self {
            radius: [10.0, 10.0],
            density: [100.0, 1000.0],
            ..Self::default()
        }
    }

    /// Particle options with positions drawn from `position_range`
    pub fn particle_options(&self, position_range: VectorRange) -> ParticleOptions {
        ParticleOptions {
            position_range,
            velocity_range: self.velocity,
            radius_range: self.radius,
            density_range: self.density,
        }
    }

    /// Spawn at an exact position, sampling everything else
    pub fn spawn_at<R: Rng + ?Sized>(&self, position: Vec2, rng: &mut R) -> Particle {
        let velocity = Vec2::new(
            random_in_range(rng, self.velocity.x),
            random_in_range(rng, self.velocity.y),
        );
        let radius = random_in_range(rng, self.radius);
        let density = random_in_range(rng, self.density);
        Particle::new(position, velocity, radius, density)
    }
}

/// [`SpawnRanges`] with any field left out
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpawnRangesPatch {
    pub velocity: VectorRangePatch,
    pub radius: Option<NumberRange>,
    pub density: Option<NumberRange>,
}

impl SpawnRangesPatch {
    /// Fill the missing fields from `base`
    pub fn over(self, base: SpawnRanges) -> SpawnRanges {
        SpawnRanges {
            velocity: self.velocity.over(base.velocity),
            radius: self.radius.unwrap_or(base.radius),
            density: self.density.unwrap_or(base.density),
        }
    }
}

impl From<SpawnRangesPatch> for SpawnRanges {
    fn from(patch: SpawnRangesPatch) -> Self {
        patch.over(Self::default())
    }
}

/// Parameters for [`Simulation::factory`]
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOptions {
    /// Ordinary particles; the center particle comes on top
    pub particle_count: usize,
    pub bound_range: Bounds,
    pub ordinary: SpawnRanges,
    pub center: SpawnRanges,
    pub seed: u64,
}

impl SimulationOptions {
    pub fn new(particle_count: usize, bound_range: Bounds) -> Self {
        Self {
            particle_count,
            bound_range,
            ordinary: SpawnRanges::default(),
            center: SpawnRanges::center(),
            seed: 0,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Ordinary particles plus the center one
    pub fn total_particles(&self) -> usize {
        self.particle_count.saturating_add(1)
    }
}

impl Default for SimulationOptions {
    fn default() -> Self {
        use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
        Self::new(
            DEFAULT_PARTICLE_COUNT,
            Bounds::from_size(DEFAULT_WIDTH, DEFAULT_HEIGHT),
        )
    }
}

/// All particles plus the rectangle that contains them
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Insertion order; also update order and paint order
    particles: Vec<Particle>,
    bounds: Bounds,
    /// Completed `update` calls
    frame: u64,
}

impl Simulation {
    pub fn new(particles: Vec<Particle>, bounds: Bounds) -> Self {
        Self {
            particles,
            bounds,
            frame: 0,
        }
    }

    /// Build `particle_count` ordinary particles plus one center particle
    pub fn factory(options: &SimulationOptions) -> Self {
        let mut rng = Pcg32::seed_from_u64(options.seed);
        Self::factory_with_rng(options, &mut rng)
    }

    /// [`Simulation::factory`] with a caller-supplied RNG
    pub fn factory_with_rng<R: Rng + ?Sized>(options: &SimulationOptions, rng: &mut R) -> Self {
        let bounds = options.bound_range;
        let center_particle = options.center.spawn_at(bounds.center(), rng);

        let ordinary = options.ordinary.particle_options(bounds.as_range());
        let mut particles = Vec::with_capacity(options.total_particles());
        for _ in 0..options.particle_count {
            particles.push(Particle::factory(&ordinary, rng));
        }
        particles.push(center_particle);

        log::info!(
            "Spawned {} particles in {}x{} (seed {})",
            particles.len(),
            bounds.width(),
            bounds.height(),
            options.seed
        );

        Self::new(particles, bounds)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Particles whose position or velocity went NaN/infinite
    pub fn non_finite_count(&self) -> usize {
        self.particles.iter().filter(|p| !p.is_finite()).count()
    }

    /// Advance every particle once, in list order
    ///
    /// Updates are staggered: particle `i` sees particles `0..i` at their
    /// already-updated positions for this frame.
    pub fn update(&mut self, dt: f32) {
        for i in 0..self.particles.len() {
            let forces = self.particles[i].net_force(&self.particles);
            self.particles[i].update(dt, forces, Some(&self.bounds));
        }
        self.frame += 1;
    }

    /// Draw every particle in list order (later ones on top)
    pub fn render<S: RenderSurface + ?Sized>(&self, surface: &mut S, dt: f32) {
        for particle in &self.particles {
            particle.render(surface, dt);
        }
    }
}
