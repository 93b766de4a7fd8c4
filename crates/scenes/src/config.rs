//! Scene configuration. Loaded from scenes.ron at startup.

use procgen::{GroundConfig, LandscapeConfig, ProcgenError, Shading, StarfieldConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for every demo scene. Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub ground: GroundConfig,
    /// Ground chunks generated along X for the streamed map.
    #[serde(default = "default_map_chunks")]
    pub map_chunks_x: u32,
    /// Ground chunks generated along Z for the streamed map.
    #[serde(default = "default_map_chunks")]
    pub map_chunks_z: u32,
    #[serde(default)]
    pub landscape: LandscapeConfig,
    /// Water level for the landscape palette (fraction of the highest peak).
    #[serde(default = "default_landscape_water")]
    pub landscape_water_level: f32,
    #[serde(default)]
    pub shading: Shading,
    #[serde(default)]
    pub starfield: StarfieldConfig,
    /// Frames to simulate for the starfield scene.
    #[serde(default = "default_frames")]
    pub starfield_frames: u32,
    /// Fixed frame time in seconds.
    #[serde(default = "default_frame_dt")]
    pub frame_dt: f32,
}

fn default_map_chunks() -> u32 {
    10
}
fn default_landscape_water() -> f32 {
    0.1
}
fn default_frames() -> u32 {
    600
}
fn default_frame_dt() -> f32 {
    1.0 / 60.0
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            ground: GroundConfig::default(),
            map_chunks_x: default_map_chunks(),
            map_chunks_z: default_map_chunks(),
            landscape: LandscapeConfig::default(),
            landscape_water_level: default_landscape_water(),
            shading: Shading::default(),
            starfield: StarfieldConfig::default(),
            starfield_frames: default_frames(),
            frame_dt: default_frame_dt(),
        }
    }
}

impl SceneConfig {
    /// Load config from `scenes.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        } else {
            log::info!("No config at {:?}, using defaults", path);
        }
        Self::default()
    }

    /// Save current config to `scenes.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        if let Ok(s) = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            if let Err(e) = std::fs::write(&path, s) {
                log::warn!("Could not write config to {:?}: {}", path, e);
            }
        }
    }

    /// Reject parameters no scene can be built from.
    pub fn validate(&self) -> Result<(), ProcgenError> {
        self.ground.validate()?;
        self.landscape.validate()?;
        self.starfield.validate()?;
        if !(self.frame_dt > 0.0) || !self.frame_dt.is_finite() {
            return Err(ProcgenError::InvalidParameter {
                name: "frame_dt",
                reason: format!("must be positive and finite, got {}", self.frame_dt),
            });
        }
        Ok(())
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("scenes.ron")
}
