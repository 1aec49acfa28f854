//! Tunable sampling ranges. Every default matches the stock room generator.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geometry::Fp;

pub static MAX_OBJECTS: usize = 10;
pub static MAX_LIGHTS: usize = 5;
/// Focus points get at most this share of the rays; the rest sample the BRDF.
pub static MAX_FOCUS_PROBABILITY: Fp = 0.3;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub room: RoomConfig,
    /// Object count is uniform in `1..=max_objects`.
    pub max_objects: usize,
    /// Light count is uniform in `1..=max_lights`.
    pub max_lights: usize,
    /// Total focus-point probability shared evenly by the lights.
    pub light_focus_probability: Fp,
    pub render: RenderConfig,
    pub exposure: ExposureConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RoomConfig {
    pub width: [Fp; 2],
    pub depth: [Fp; 2],
}

/// Settings copied verbatim into written scene files.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub samples: u32,
    pub ray_depth: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ExposureConfig {
    pub target_mean: Fp,
    pub target_std_dev: Fp,
    pub target_min: Fp,
    pub target_max: Fp,
    pub quantile: Fp,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            room: RoomConfig::default(),
            max_objects: MAX_OBJECTS,
            max_lights: MAX_LIGHTS,
            light_focus_probability: MAX_FOCUS_PROBABILITY,
            render: RenderConfig::default(),
            exposure: ExposureConfig::default(),
        }
    }
}

impl Default for RoomConfig {
    fn default() -> Self {
        RoomConfig {
            width: [0.5, 2.5],
            depth: [5.0, 25.0],
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            width: 256,
            height: 256,
            samples: 64,
            ray_depth: 6,
        }
    }
}

impl Default for ExposureConfig {
    fn default() -> Self {
        ExposureConfig {
            target_mean: 0.3,
            target_std_dev: 0.1,
            target_min: 0.1,
            target_max: 0.9,
            quantile: 0.8,
        }
    }
}

impl SceneConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the ranges the composer and the renderer rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));
        for (name, [lo, hi]) in [("room.width", self.room.width), ("room.depth", self.room.depth)] {
            if !(lo > 0.0 && lo <= hi && hi.is_finite()) {
                return invalid(format!("{name} must be a positive range, got [{lo}, {hi}]"));
            }
        }
        if !(1..=MAX_OBJECTS).contains(&self.max_objects) {
            return invalid(format!(
                "max_objects must be in 1..={MAX_OBJECTS}, got {}",
                self.max_objects
            ));
        }
        if !(1..=MAX_LIGHTS).contains(&self.max_lights) {
            return invalid(format!(
                "max_lights must be in 1..={MAX_LIGHTS}, got {}",
                self.max_lights
            ));
        }
        let p = self.light_focus_probability;
        if !(p > 0.0 && p <= MAX_FOCUS_PROBABILITY) {
            return invalid(format!(
                "light_focus_probability must be in (0, {MAX_FOCUS_PROBABILITY}], got {p}"
            ));
        }
        if self.render.width == 0 || self.render.height == 0 {
            return invalid(format!(
                "render size must be non-zero, got {}x{}",
                self.render.width, self.render.height
            ));
        }
        let exposure = &self.exposure;
        if !(exposure.quantile >= 0.0 && exposure.quantile < 1.0) {
            return invalid(format!(
                "exposure.quantile must be in [0, 1), got {}",
                exposure.quantile
            ));
        }
        if !(exposure.target_min > 0.0 && exposure.target_min <= exposure.target_max) {
            return invalid(format!(
                "exposure target range must be positive, got [{}, {}]",
                exposure.target_min, exposure.target_max
            ));
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
