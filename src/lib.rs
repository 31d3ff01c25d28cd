//! Gravity Particles - A real-time 2D N-body simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (gravity, integration, wall bounces)
//! - `renderer`: Draw surface abstraction and WebGPU pipeline
//! - `settings`: Construction parameters loaded from JSON

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SpawnRanges};
pub use sim::{Bounds, Particle, Simulation, SimulationOptions};

/// Simulation configuration constants
pub mod consts {
    /// Frame delta fed to every tick (seconds)
    pub const FRAME_DT: f32 = 0.008;

    /// Number of ordinary particles spawned by default (plus one center particle)
    pub const DEFAULT_PARTICLE_COUNT: usize = 1000;

    /// Length of the two strokes forming an acceleration arrow head (pixels)
    pub const ARROW_HEAD_LENGTH: f32 = 10.0;

    /// Fallback surface size when none is known (headless runs)
    pub const DEFAULT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_HEIGHT: f32 = 720.0;

    /// Frames simulated by the native headless runner
    pub const HEADLESS_FRAMES: u32 = 600;

    /// Browser console logger threshold
    pub const CONSOLE_LOG_LEVEL: log::Level = log::Level::Info;

    /// Level of the periodic frame summaries
    pub const SUMMARY_LOG_LEVEL: log::Level = log::Level::Info;
}

#[cfg(test)]
mod tests {
    use super::consts::*;

    #[test]
    fn test_frame_summaries_reach_the_console() {
        assert!(SUMMARY_LOG_LEVEL <= CONSOLE_LOG_LEVEL);
    }
}
