//! Boot: logging init, config load, analyzer construction.

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::analysis::Analyzer;
use crate::conf::{AnalyzerConfig, ConfigError};

/// Initialise the tracing / logging subsystem. Logs go to stderr so stdout
/// stays clean for exported data.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "applens=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load config and build the analyzer.
pub fn boot() -> Result<(Analyzer, AnalyzerConfig), ConfigError> {
    info!("Starting applens v{}", env!("CARGO_PKG_VERSION"));

    let config = AnalyzerConfig::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!(
        "Parallel classification: enabled={}, min_lines={}",
        config.parallel.enabled, config.parallel.min_lines
    );
    info!(
        "Result cache: enabled={}, max_entries={}; strip_ansi={}",
        config.cache.enabled, config.cache.max_entries, config.classify.strip_ansi
    );

    let analyzer = Analyzer::new(&config);
    Ok((analyzer, config))
}
