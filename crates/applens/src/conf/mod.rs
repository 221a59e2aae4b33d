//! Conf module: configuration model and loading.

pub mod load;
pub mod model;

use thiserror::Error;

pub use load::{CONFIG_FILE_ENV, DEFAULT_CONFIG_FILE};
pub use model::{AnalyzerConfig, CacheConfig, ClassifyConfig, ExportConfig, ParallelConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
