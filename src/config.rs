use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub detection: DetectionConfig,
    pub session: SessionConfig,
    pub output: OutputConfig,
}

/// Classification thresholds for the candidate aggregator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Events scoring at or above this are stored as FIDO candidates
    pub candidate_threshold: u8,
    /// Events scoring at or above this, but below `candidate_threshold`, get detailed output
    pub verbose_threshold: u8,
    /// Structures scoring at or above this are highlighted (presentation only)
    pub high_confidence_threshold: u8,
    /// Case-insensitive device name fragments that always get detailed output
    pub target_name_hints: Vec<String>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            candidate_threshold: 30,
            verbose_threshold: 20,
            high_confidence_threshold: 50,
            target_name_hints: vec!["ipad".to_string()],
        }
    }
}

impl DetectionConfig {
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("candidate_threshold", self.candidate_threshold),
            ("verbose_threshold", self.verbose_threshold),
            ("high_confidence_threshold", self.high_confidence_threshold),
        ] {
            if value > 100 {
                return Err(format!("{} must be at most 100, got {}", name, value));
            }
        }
        if self.verbose_threshold > self.candidate_threshold {
            return Err(format!(
                "verbose_threshold ({}) must not exceed candidate_threshold ({})",
                self.verbose_threshold, self.candidate_threshold
            ));
        }
        Ok(())
    }

    /// True when the device name contains any target hint
    pub fn is_target_name(&self, name: Option<&str>) -> bool {
        let Some(name) = name else {
            return false;
        };
        let name = name.to_lowercase();
        self.target_name_hints
            .iter()
            .any(|hint| !hint.is_empty() && name.contains(&hint.to_lowercase()))
    }
}

/// Scan session limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Stop the session after this many seconds; 0 disables the limit
    pub duration_secs: u64,
    /// Bound of the event channel between the scanning stack and the analysis loop
    pub channel_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_secs: 30,
            channel_capacity: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
        }
    }
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a named file (extension optional) and environment variables
    pub fn load_from(file_name: &str) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Config::builder()
            .set_default(
                "detection.candidate_threshold",
                defaults.detection.candidate_threshold as i64,
            )?
            .set_default(
                "detection.verbose_threshold",
                defaults.detection.verbose_threshold as i64,
            )?
            .set_default(
                "detection.high_confidence_threshold",
                defaults.detection.high_confidence_threshold as i64,
            )?
            .set_default(
                "detection.target_name_hints",
                defaults.detection.target_name_hints.clone(),
            )?
            .set_default("session.duration_secs", defaults.session.duration_secs)?
            .set_default(
                "session.channel_capacity",
                defaults.session.channel_capacity as i64,
            )?
            .set_default(
                "output.directory",
                defaults.output.directory.to_string_lossy().to_string(),
            )?
            // Load from config.toml if it exists
            .add_source(File::with_name(file_name).required(false))
            // CABLE_DETECTION__CANDIDATE_THRESHOLD=40 etc.
            .add_source(
                config::Environment::with_prefix("CABLE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate().map_err(ConfigError::Message)?;
        Ok(app_config)
    }

    /// Configuration for CLI defaults: file/env if loadable, built-in defaults otherwise
    pub fn get_defaults() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), String> {
        self.detection.validate()?;
        if self.session.channel_capacity == 0 {
            return Err("session.channel_capacity must be greater than 0".to_string());
        }
        Ok(())
    }
}
