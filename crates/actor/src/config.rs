use std::path::Path;

use serde::{Deserialize, Serialize};
use stride_anim::BlendConfig;
use stride_camera::CameraConfig;
use stride_common::ConfigError;
use stride_locomotion::LocomotionParameters;

/// Errors from reading an actor configuration file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported config format: {0:?} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(Option<String>),
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// Everything needed to spawn one actor. Missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorConfig {
    pub locomotion: LocomotionParameters,
    pub camera: CameraConfig,
    pub blend: BlendConfig,
    /// Seconds per locomotion step.
    pub fixed_step: f32,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            locomotion: LocomotionParameters::default(),
            camera: CameraConfig::default(),
            blend: BlendConfig::default(),
            fixed_step: 1.0 / 50.0,
        }
    }
}

impl ActorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.locomotion.validate()?;
        self.camera.validate()?;
        self.blend.validate()?;
        ConfigError::require_positive("fixed_step", self.fixed_step)
    }

    pub fn from_json_str(text: &str) -> Result<Self, LoadError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, LoadError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file; the format follows the extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let config = match ext.as_deref() {
            Some("json") => Self::from_json_str(&std::fs::read_to_string(path)?)?,
            Some("yaml" | "yml") => Self::from_yaml_str(&std::fs::read_to_string(path)?)?,
            _ => return Err(LoadError::UnsupportedFormat(ext)),
        };
        tracing::debug!(path = %path.display(), "actor config loaded");
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, LoadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
