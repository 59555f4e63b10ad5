//! Tracing subscriber setup.

use inkpress_config::{LogFormat, ObservabilityConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Builds the filter: `RUST_LOG` when set, otherwise the configured level
/// for Inkpress crates with `tower_http` at `debug`.
pub fn env_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(config)))
}

fn default_directives(config: &ObservabilityConfig) -> String {
    let level = config.log_level.to_lowercase();
    format!("warn,inkpress={level},inkpress_core={level},inkpress_repository={level},inkpress_service={level},inkpress_rest={level},inkpress_server={level},http={level},tower_http=debug")
}

/// Installs the global subscriber.
pub fn init_logging(config: &ObservabilityConfig) -> anyhow::Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .try_init()?,
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()?,
    }
    Ok(())
}
