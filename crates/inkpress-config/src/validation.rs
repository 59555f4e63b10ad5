//! Configuration validation.
//!
//! Every section is checked and all problems are reported together,
//! so a bad deployment fails once with the full list.

use crate::{AppConfig, CacheConfig, DatabaseConfig, ObservabilityConfig, RedisConfig, ServerConfig};
use thiserror::Error;
use url::Url;

/// A single configuration problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    /// Port number is invalid.
    #[error("Invalid port for {name}: {value}")]
    InvalidPort { name: &'static str, value: u16 },

    /// Pool size configuration is invalid (min must be <= max).
    #[error("Invalid pool size: min ({min}) cannot be greater than max ({max})")]
    InvalidPoolSize { min: u32, max: u32 },

    /// URL is missing or malformed.
    #[error("Invalid {url_type} URL: {message}")]
    InvalidUrl { url_type: &'static str, message: String },

    /// A duration or count that must be positive is zero.
    #[error("'{name}' must be positive")]
    NotPositive { name: &'static str },

    /// A value exceeds its allowed maximum.
    #[error("'{name}' must be at most {max}")]
    TooLarge { name: &'static str, max: u64 },

    /// Log level is not recognized.
    #[error("Invalid log level: '{value}' (valid: trace, debug, info, warn, error)")]
    InvalidLogLevel { value: String },
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];
    /// Longest accepted cache entry lifetime (30 days).
    pub const MAX_CACHE_TTL_SECS: u64 = 30 * 24 * 60 * 60;

    /// Validates the entire application configuration.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_server(&config.server, &mut errors);
        Self::validate_database(&config.database, &mut errors);
        Self::validate_redis(&config.redis, &mut errors);
        Self::validate_cache(&config.cache, &mut errors);
        Self::validate_observability(&config.observability, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(config: &ServerConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.port == 0 {
            errors.push(ConfigValidationError::InvalidPort {
                name: "server.port",
                value: config.port,
            });
        }
        if config.request_timeout_secs == 0 {
            errors.push(ConfigValidationError::NotPositive {
                name: "server.request_timeout_secs",
            });
        }
    }

    fn validate_database(config: &DatabaseConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.url.is_empty() {
            errors.push(ConfigValidationError::InvalidUrl {
                url_type: "database",
                message: "URL cannot be empty".to_string(),
            });
        } else if !config.url.starts_with("postgres://") && !config.url.starts_with("postgresql://") {
            errors.push(ConfigValidationError::InvalidUrl {
                url_type: "database",
                message: "URL must start with postgres:// or postgresql://".to_string(),
            });
        }

        if config.min_connections > config.max_connections {
            errors.push(ConfigValidationError::InvalidPoolSize {
                min: config.min_connections,
                max: config.max_connections,
            });
        }
        if config.max_connections == 0 {
            errors.push(ConfigValidationError::NotPositive {
                name: "database.max_connections",
            });
        }
        if config.connect_timeout_secs == 0 {
            errors.push(ConfigValidationError::NotPositive {
                name: "database.connect_timeout_secs",
            });
        }
        if config.retry_attempts == 0 {
            errors.push(ConfigValidationError::NotPositive {
                name: "database.retry_attempts",
            });
        }
    }

    fn validate_redis(config: &RedisConfig, errors: &mut Vec<ConfigValidationError>) {
        if !config.enabled {
            return;
        }

        match Url::parse(&config.url) {
            Ok(url) if matches!(url.scheme(), "redis" | "rediss") => {}
            Ok(_) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "redis",
                message: "URL must start with redis:// or rediss://".to_string(),
            }),
            Err(e) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "redis",
                message: e.to_string(),
            }),
        }

        if config.pool_size == 0 {
            errors.push(ConfigValidationError::NotPositive {
                name: "redis.pool_size",
            });
        }
        if config.timeout_ms == 0 {
            errors.push(ConfigValidationError::NotPositive {
                name: "redis.timeout_ms",
            });
        }
    }

    fn validate_cache(config: &CacheConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.ttl_secs == 0 {
            errors.push(ConfigValidationError::NotPositive { name: "cache.ttl_secs" });
        } else if config.ttl_secs > Self::MAX_CACHE_TTL_SECS {
            errors.push(ConfigValidationError::TooLarge {
                name: "cache.ttl_secs",
                max: Self::MAX_CACHE_TTL_SECS,
            });
        }
        if config.operation_timeout_ms == 0 {
            errors.push(ConfigValidationError::NotPositive {
                name: "cache.operation_timeout_ms",
            });
        }
        if config.lookup_concurrency == 0 {
            errors.push(ConfigValidationError::NotPositive {
                name: "cache.lookup_concurrency",
            });
        }
    }

    fn validate_observability(config: &ObservabilityConfig, errors: &mut Vec<ConfigValidationError>) {
        let level = config.log_level.to_lowercase();
        if !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::InvalidLogLevel {
                value: config.log_level.clone(),
            });
        }
    }
}
