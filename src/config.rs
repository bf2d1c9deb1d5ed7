//! TOML configuration for the site server, the rotation scheduler and the wall viewer.
//!
//! Every table is optional; missing keys fall back to the defaults in
//! [`crate::constants`]. Command line flags are merged on top by the binary.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::constants::*;
use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub rotation: RotationConfig,
    pub wall: WallConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.rotation.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub images_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            images_dir: PathBuf::from("public/images/section1"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    /// Base URL of the site server the catalog is loaded from.
    pub server_url: String,
    pub timeout_secs: u64,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:3000".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Knobs of the rotation scheduler. Sizes are in design pixels of the
/// render texture, bands are fractions of its height, times in seconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    pub floor: usize,
    pub target_min: usize,
    pub target_max: usize,

    /// Horizontal distance an image travels from entering to leaving.
    pub span: f32,
    pub width_min: f32,
    pub width_max: f32,
    /// Height is `width * aspect`.
    pub aspect_min: f32,
    pub aspect_max: f32,
    /// Pixels per second.
    pub speed_min: f32,
    pub speed_max: f32,
    pub layers: u8,
    pub band_min: f32,
    pub band_max: f32,

    pub band_proximity: f32,
    pub clearance: f64,
    pub stagger_min: f64,
    pub stagger_max: f64,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            floor: WORKING_SET_FLOOR,
            target_min: WORKING_SET_TARGET_MIN,
            target_max: WORKING_SET_TARGET_MAX,
            span: RENDER_WIDTH as f32,
            width_min: 140.0,
            width_max: 280.0,
            aspect_min: 1.15,
            aspect_max: 1.45,
            speed_min: 55.0,
            speed_max: 110.0,
            layers: 20,
            band_min: 0.02,
            band_max: 0.88,
            band_proximity: BAND_PROXIMITY,
            clearance: CLEARANCE,
            stagger_min: STAGGER_MIN,
            stagger_max: STAGGER_MAX,
        }
    }
}

impl RotationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let reals = [
            ("span", f64::from(self.span)),
            ("width_min", f64::from(self.width_min)),
            ("width_max", f64::from(self.width_max)),
            ("aspect_min", f64::from(self.aspect_min)),
            ("aspect_max", f64::from(self.aspect_max)),
            ("speed_min", f64::from(self.speed_min)),
            ("speed_max", f64::from(self.speed_max)),
            ("band_min", f64::from(self.band_min)),
            ("band_max", f64::from(self.band_max)),
            ("band_proximity", f64::from(self.band_proximity)),
            ("clearance", self.clearance),
            ("stagger_min", self.stagger_min),
            ("stagger_max", self.stagger_max),
        ];
        if let Some((name, _)) = reals.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::Invalid(format!("{name} must be a finite number")));
        }

        fn ordered<T: PartialOrd>(name: &str, min: T, max: T) -> Result<(), ConfigError> {
            if min > max {
                return Err(ConfigError::Invalid(format!("{name}: min is greater than max")));
            }
            Ok(())
        }

        ordered("target", self.target_min, self.target_max)?;
        if self.floor > self.target_min {
            return Err(ConfigError::Invalid("floor is greater than target_min".into()));
        }
        ordered("width", self.width_min, self.width_max)?;
        ordered("aspect", self.aspect_min, self.aspect_max)?;
        ordered("speed", self.speed_min, self.speed_max)?;
        ordered("band", self.band_min, self.band_max)?;
        ordered("stagger", self.stagger_min, self.stagger_max)?;

        if self.width_min <= 0.0 || self.speed_min <= 0.0 || self.span <= 0.0 {
            return Err(ConfigError::Invalid("span, width and speed must be positive".into()));
        }
        if self.stagger_min < 0.0 || self.clearance < 0.0 || self.band_proximity < 0.0 {
            return Err(ConfigError::Invalid("stagger, clearance and band_proximity must not be negative".into()));
        }
        if self.layers == 0 {
            return Err(ConfigError::Invalid("layers must be at least 1".into()));
        }
        Ok(())
    }
}
