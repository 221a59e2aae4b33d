//! Load: config loading from file and environment variables.

use std::path::Path;
use std::str::FromStr;

use tracing::{info, warn};

use super::model::AnalyzerConfig;
use super::ConfigError;

pub const CONFIG_FILE_ENV: &str = "APPLENS_CONFIG_FILE";
pub const DEFAULT_CONFIG_FILE: &str = "applens.toml";

impl AnalyzerConfig {
    /// Load configuration.
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = std::env::var(CONFIG_FILE_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let mut config = if Path::new(&config_path).exists() {
            info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            info!("Config file not found at {}, using defaults", config_path);
            Self::default()
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AnalyzerConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Override fields from `APPLENS_*` variables. Unparseable values are
    /// ignored with a warning.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        override_from(&lookup, "APPLENS_PARALLEL", &mut self.parallel.enabled);
        override_from(&lookup, "APPLENS_PARALLEL_MIN_LINES", &mut self.parallel.min_lines);
        override_from(&lookup, "APPLENS_STRIP_ANSI", &mut self.classify.strip_ansi);
        override_from(&lookup, "APPLENS_CACHE", &mut self.cache.enabled);
        override_from(&lookup, "APPLENS_CACHE_MAX_ENTRIES", &mut self.cache.max_entries);
        override_from(&lookup, "APPLENS_EXPORT_FORMAT", &mut self.export.format);
    }

    pub fn validate(&self) -> Result<(), String> {
        self.parallel.validate()?;
        self.cache.validate()?;
        Ok(())
    }
}

fn override_from<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, slot: &mut T) {
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *slot = value,
        Err(_) => warn!("Ignoring {}={:?}: not a valid value", key, raw),
    }
}
