//! Simulation settings
//!
//! Everything here is fixed once the simulation is built. Loaded from a JSON
//! file on native; the browser build uses the defaults.

use serde::{Deserialize, Deserializer, Serialize};

use crate::consts::{DEFAULT_PARTICLE_COUNT, FRAME_DT, HEADLESS_FRAMES};
use crate::sim::{Bounds, BoundsPatch, SimulationOptions, SpawnRangesPatch};

pub use crate::sim::SpawnRanges;

/// Construction parameters and frame timing
///
/// Every field is optional, nested ones included. A partial `center` fills
/// the rest from the center defaults, not the ordinary ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Ordinary particles (the center particle is added on top)
    pub particle_count: usize,
    /// Delta fed to every tick (seconds)
    pub frame_dt: f32,
    /// RNG seed; a fresh one is picked per run when absent
    pub seed: Option<u64>,
    /// Ranges for ordinary particles
    pub ordinary: SpawnRanges,
    /// Ranges for the heavy center particle
    #[serde(deserialize_with = "center_ranges")]
    pub center: SpawnRanges,
    /// Rectangle to simulate in; missing axes come from the surface
    #[serde(skip_serializing_if = "BoundsPatch::is_empty")]
    pub bounds: BoundsPatch,
    /// Frames to run in headless (native) mode
    pub headless_frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            frame_dt: FRAME_DT,
            seed: None,
            ordinary: SpawnRanges::default(),
            center: SpawnRanges::center(),
            bounds: BoundsPatch::default(),
            headless_frames: HEADLESS_FRAMES,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings from {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Factory options for a run, filling unconfigured bounds from `surface`
    pub fn simulation_options(&self, surface: Bounds, fallback_seed: u64) -> SimulationOptions {
        SimulationOptions {
            particle_count: self.particle_count,
            bound_range: self.bounds.over(surface),
            ordinary: self.ordinary,
            center: self.center,
            seed: self.seed.unwrap_or(fallback_seed),
        }
    }
}

fn center_ranges<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SpawnRanges, D::Error> {
    SpawnRangesPatch::deserialize(deserializer).map(|patch| patch.over(SpawnRanges::center()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::VectorRange;

    #[test]
    fn test_defaults_match_reference_run() {
        let settings = Settings::default();
        assert_eq!(settings.particle_count, 1000);
        assert!((settings.frame_dt - 0.008).abs() < 1e-9);
        assert_eq!(settings.ordinary.radius, [10.0, 30.0]);
        assert_eq!(settings.ordinary.density, [1.0, 100.0]);
        assert_eq!(settings.center.radius, [10.0, 10.0]);
        assert_eq!(settings.center.density, [100.0, 1000.0]);
        assert_eq!(
            settings.center.velocity,
            VectorRange::new([-50.0, -50.0], [50.0, 50.0])
        );
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "particle_count": 12, "seed": 7 }"#)
            .expect("valid settings");
        assert_eq!(settings.particle_count, 12);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.center, SpawnRanges::center());
        assert_eq!(settings.bounds, BoundsPatch::default());
    }

    #[test]
    fn test_nested_ranges_and_bounds() {
        let json = r#"{
            "center": { "radius": [40, 40], "density": [5000, 5000],
                        "velocity": { "x": [0, 0], "y": [0, 0] } },
            "bounds": { "x": [0, 640], "y": [0, 480] }
        }"#;
        let settings = Settings::from_json(json).expect("valid settings");
        assert_eq!(settings.center.radius, [40.0, 40.0]);
        assert_eq!(settings.center.velocity, VectorRange::point(0.0, 0.0));
        assert_eq!(
            settings.bounds.over(Bounds::from_size(1.0, 1.0)),
            Bounds::from_size(640.0, 480.0)
        );
    }

    #[test]
    fn test_partial_nested_sections_keep_their_defaults() {
        let json = r#"{
            "particle_count": 12,
            "ordinary": { "radius": [5, 5] },
            "center": { "density": [2000, 2000], "velocity": { "y": [0, 0] } },
            "bounds": { "x": [0, 640] }
        }"#;
        let settings = Settings::from_json(json).expect("valid settings");
        assert_eq!(settings.particle_count, 12);

        let ordinary = SpawnRanges::default();
        assert_eq!(settings.ordinary.radius, [5.0, 5.0]);
        assert_eq!(settings.ordinary.density, ordinary.density);
        assert_eq!(settings.ordinary.velocity, ordinary.velocity);

        // Center falls back to its own family, not the ordinary one
        let center = SpawnRanges::center();
        assert_eq!(settings.center.radius, center.radius);
        assert_eq!(settings.center.density, [2000.0, 2000.0]);
        assert_eq!(settings.center.velocity.x, center.velocity.x);
        assert_eq!(settings.center.velocity.y, [0.0, 0.0]);

        let options = settings.simulation_options(Bounds::from_size(300.0, 200.0), 0);
        assert_eq!(options.bound_range, Bounds::new([0.0, 640.0], [0.0, 200.0]));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_from_keeps_valid_fields_of_partial_file() {
        let path = std::env::temp_dir().join("gravity-particles-partial-settings.json");
        std::fs::write(&path, r#"{ "particle_count": 12, "ordinary": { "radius": [5, 5] } }"#)
            .expect("writable temp dir");

        let settings = Settings::load_from(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(settings.particle_count, 12);
        assert_eq!(settings.ordinary.radius, [5.0, 5.0]);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Settings::from_json("{ particle_count: }").is_err());
        assert!(Settings::from_json(r#"{ "particle_count": -3 }"#).is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings {
            seed: Some(5),
            bounds: Bounds::from_size(100.0, 50.0).into(),
            ..Default::default()
        };
        let json = settings.to_json().expect("serializable");
        assert_eq!(Settings::from_json(&json).expect("parsable"), settings);
    }

    #[test]
    fn test_simulation_options_fallbacks() {
        let surface = Bounds::from_size(300.0, 200.0);

        let options = Settings::default().simulation_options(surface, 77);
        assert_eq!(options.bound_range, surface);
        assert_eq!(options.seed, 77);

        let configured = Settings {
            seed: Some(1),
            bounds: Bounds::from_size(10.0, 10.0).into(),
            ..Default::default()
        };
        let options = configured.simulation_options(surface, 77);
        assert_eq!(options.bound_range, Bounds::from_size(10.0, 10.0));
        assert_eq!(options.seed, 1);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_from_missing_file_falls_back() {
        let settings = Settings::load_from(std::path::Path::new("/nonexistent/gravity.json"));
        assert_eq!(settings, Settings::default());
    }
}
