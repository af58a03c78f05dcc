use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Video codec preference. Advisory only: the optimizer records it and
/// surfaces it to the embedding call layer, but never enforces it.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VideoCodec {
    Vp8,
    Vp9,
    H264,
}

/// How encoding adaptations are triggered.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdaptationMode {
    /// The sampling cycle classifies network conditions and applies
    /// presets on its own.
    Automatic,
    /// Presets are only applied through `set_quality_preset`.
    Manual,
}

/// Configuration for one optimizer instance.
///
/// Treated as immutable: the optimizer only ever replaces the whole
/// object via `update_config`, never individual fields.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct QualityConfig {
    /// Allow the controller to adjust encoding bitrate bounds
    #[serde(default = "default_adaptive_bitrate")]
    pub enable_adaptive_bitrate: bool,

    /// Allow the controller to adjust track resolution constraints
    #[serde(default = "default_resolution_scaling")]
    pub enable_resolution_scaling: bool,

    /// Target frames per second for the outbound track
    #[serde(default = "default_target_frame_rate")]
    pub target_frame_rate: u32,

    /// Upper bound for encoding bitrate (kbps)
    #[serde(default = "default_max_bitrate")]
    pub max_bitrate_kbps: u32,

    /// Lower bound for encoding bitrate (kbps)
    #[serde(default = "default_min_bitrate")]
    pub min_bitrate_kbps: u32,

    /// Preferred video codec (advisory)
    #[serde(default = "default_codec")]
    pub preferred_codec: VideoCodec,

    /// Automatic or manual adaptation
    #[serde(default = "default_adaptation_mode")]
    pub adaptation_mode: AdaptationMode,

    /// Sampling/adaptation cycle period in seconds
    #[serde(default = "default_sample_interval")]
    pub sample_interval_secs: u64,
}

fn default_adaptive_bitrate() -> bool {
    true
}

fn default_resolution_scaling() -> bool {
    true
}

fn default_target_frame_rate() -> u32 {
    30
}

fn default_max_bitrate() -> u32 {
    2500
}

fn default_min_bitrate() -> u32 {
    300
}

fn default_codec() -> VideoCodec {
    VideoCodec::Vp8
}

fn default_adaptation_mode() -> AdaptationMode {
    AdaptationMode::Automatic
}

fn default_sample_interval() -> u64 {
    2
}

impl QualityConfig {
    /// Load configuration from default sources (file + environment variables)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_file("vqo.toml")
    }

    /// Load configuration from a specific file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy();
        debug!("Loading configuration from: {}", path_str);

        let settings = Config::builder()
            .set_default("enable_adaptive_bitrate", default_adaptive_bitrate())?
            .set_default("enable_resolution_scaling", default_resolution_scaling())?
            .set_default("target_frame_rate", default_target_frame_rate() as i64)?
            .set_default("max_bitrate_kbps", default_max_bitrate() as i64)?
            .set_default("min_bitrate_kbps", default_min_bitrate() as i64)?
            .set_default("preferred_codec", "vp8")?
            .set_default("adaptation_mode", "automatic")?
            .set_default("sample_interval_secs", default_sample_interval() as i64)?
            // Add configuration file (optional)
            .add_source(File::with_name(&path_str).required(false))
            // Add environment variables with VQO_ prefix
            .add_source(Environment::with_prefix("VQO"))
            .build()?;

        let config: QualityConfig = settings.try_deserialize()?;
        config.validate()?;

        info!("Configuration loaded successfully");
        debug!("Final configuration: {:#?}", config);

        Ok(config)
    }

    /// Write the configuration to a TOML file, suitable for reloading
    /// through `load_from_file`.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> crate::error::Result<()> {
        let rendered = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), rendered)?;

        info!("Configuration saved to: {}", path.as_ref().display());
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_frame_rate == 0 {
            return Err(ConfigError::Message(
                "target_frame_rate must be greater than 0".to_string(),
            ));
        }

        if self.min_bitrate_kbps == 0 {
            return Err(ConfigError::Message(
                "min_bitrate_kbps must be greater than 0".to_string(),
            ));
        }

        if self.min_bitrate_kbps > self.max_bitrate_kbps {
            return Err(ConfigError::Message(
                "min_bitrate_kbps must not exceed max_bitrate_kbps".to_string(),
            ));
        }

        if self.sample_interval_secs == 0 {
            return Err(ConfigError::Message(
                "sample_interval_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Midpoint of the configured bitrate range (kbps), used as the
    /// reference point for the bitrate component of the quality score.
    pub fn bitrate_midpoint_kbps(&self) -> f64 {
        (self.min_bitrate_kbps as f64 + self.max_bitrate_kbps as f64) / 2.0
    }
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            enable_adaptive_bitrate: default_adaptive_bitrate(),
            enable_resolution_scaling: default_resolution_scaling(),
            target_frame_rate: default_target_frame_rate(),
            max_bitrate_kbps: default_max_bitrate(),
            min_bitrate_kbps: default_min_bitrate(),
            preferred_codec: default_codec(),
            adaptation_mode: default_adaptation_mode(),
            sample_interval_secs: default_sample_interval(),
        }
    }
}
