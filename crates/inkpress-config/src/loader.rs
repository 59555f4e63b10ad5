//! Configuration loader with layered sources.

use crate::{AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use inkpress_core::InkpressError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable selecting the environment-specific config file.
pub const ENVIRONMENT_VAR: &str = "INKPRESS_ENVIRONMENT";

/// Loads [`AppConfig`] from a config directory.
///
/// Sources are applied in order, later ones winning:
/// 1. built-in defaults
/// 2. `{dir}/default.toml`
/// 3. `{dir}/{environment}.toml`
/// 4. `{dir}/local.toml` (not committed to version control)
/// 5. environment variables such as `INKPRESS__DATABASE__URL`
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    environment: Option<String>,
}

impl ConfigLoader {
    /// Creates a loader reading from the given directory.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            environment: None,
        }
    }

    /// Creates a loader reading from `./config`.
    #[must_use]
    pub fn from_default_location() -> Self {
        Self::new("./config")
    }

    /// Overrides the environment name instead of reading `INKPRESS_ENVIRONMENT`.
    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Loads and validates the configuration.
    pub fn load(&self) -> Result<AppConfig, InkpressError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file loaded: {}", e);
        }

        let environment = self
            .environment
            .clone()
            .or_else(|| std::env::var(ENVIRONMENT_VAR).ok())
            .unwrap_or_else(|| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();
        for name in ["default", environment.as_str(), "local"] {
            let path = self.config_dir.join(format!("{name}.toml"));
            if path.exists() {
                debug!("Loading config file: {}", path.display());
                builder = builder.add_source(File::from(path.as_path()).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("INKPRESS")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("server.cors_origins"),
        );

        let mut app_config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize::<AppConfig>)
            .map_err(config_error)?;

        app_config.app.environment = environment;

        ConfigValidator::validate(&app_config).map_err(|errors| {
            InkpressError::Configuration(
                errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        })?;

        Ok(app_config)
    }

    /// Returns the config directory.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}

fn config_error(err: ConfigError) -> InkpressError {
    InkpressError::Configuration(err.to_string())
}
