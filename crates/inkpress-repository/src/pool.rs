//! Database connection pool management.

use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use inkpress_config::DatabaseConfig;
use inkpress_core::{HealthCheck, HealthStatus, InkpressError, InkpressResult};
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Interface for database pool operations.
#[async_trait]
pub trait DatabasePoolInterface: Send + Sync {
    /// Returns a reference to the underlying Postgres pool.
    fn inner(&self) -> &PgPool;

    /// Checks if the database connection is healthy.
    async fn health_check(&self) -> InkpressResult<()>;

    /// Applies all pending migrations.
    async fn run_migrations(&self) -> InkpressResult<()>;

    /// Reverts the most recently applied migration, if any.
    async fn revert_last_migration(&self) -> InkpressResult<()>;

    /// Closes the database pool.
    async fn close(&self);
}

/// Database pool wrapper.
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Connects with exponential backoff (200ms doubling up to 2s, with
    /// jitter), giving up after `config.retry_attempts` attempts.
    pub async fn connect(config: &DatabaseConfig) -> InkpressResult<Self> {
        info!("Connecting to PostgreSQL database...");

        let options = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout())
            .idle_timeout(Some(config.idle_timeout()));

        let policy = ExponentialBackoffBuilder::new()
            .with_initial_interval(Duration::from_millis(200))
            .with_max_interval(Duration::from_secs(2))
            .with_multiplier(2.0)
            .with_randomization_factor(0.5)
            .with_max_elapsed_time(None)
            .build();

        let max_attempts = config.retry_attempts.max(1);
        let mut attempt = 0;

        let pool = backoff::future::retry(policy, || {
            attempt += 1;
            let attempt = attempt;
            let options = options.clone();
            async move {
                options.connect(&config.url).await.map_err(|e| {
                    if attempt >= max_attempts {
                        warn!("Database connection attempt {}/{} failed, giving up: {}", attempt, max_attempts, e);
                        backoff::Error::permanent(e)
                    } else {
                        warn!("Database connection attempt {}/{} failed, retrying: {}", attempt, max_attempts, e);
                        backoff::Error::transient(e)
                    }
                })
            }
        })
        .await
        .map_err(|e| InkpressError::Database(format!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }

    /// Wraps an existing pool.
    #[must_use]
    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Spawns a task that pings the database every `interval` and logs pool statistics.
    ///
    /// The task runs until the returned handle is aborted.
    pub fn spawn_health_monitor(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let pool = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                match pool.health_check().await {
                    Ok(()) => debug!(
                        size = pool.pool.size(),
                        idle = pool.pool.num_idle(),
                        "Database ping ok"
                    ),
                    Err(e) => warn!(
                        size = pool.pool.size(),
                        idle = pool.pool.num_idle(),
                        error = %e,
                        "Database ping failed"
                    ),
                }
            }
        })
    }
}

#[async_trait]
impl DatabasePoolInterface for DatabasePool {
    fn inner(&self) -> &PgPool {
        &self.pool
    }

    async fn health_check(&self) -> InkpressResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| InkpressError::Database(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    async fn run_migrations(&self) -> InkpressResult<()> {
        info!("Running database migrations...");
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| InkpressError::Database(format!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    async fn revert_last_migration(&self) -> InkpressResult<()> {
        let applied: Vec<i64> = sqlx::query_scalar(
            "SELECT version FROM _sqlx_migrations WHERE success ORDER BY version DESC LIMIT 2",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| InkpressError::Database(format!("Failed to read migration history: {}", e)))?;

        let Some(latest) = applied.first() else {
            info!("No applied migrations to revert");
            return Ok(());
        };
        let target = applied.get(1).copied().unwrap_or(0);

        info!("Reverting migration {}", latest);
        MIGRATOR
            .undo(&self.pool, target)
            .await
            .map_err(|e| InkpressError::Database(format!("Migration revert failed: {}", e)))?;
        info!("Migration {} reverted", latest);
        Ok(())
    }

    async fn close(&self) {
        info!("Closing database connection pool...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

#[async_trait]
impl HealthCheck for DatabasePool {
    fn name(&self) -> &str {
        "postgres"
    }

    async fn check(&self) -> HealthStatus {
        match self.health_check().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        }
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}

/// Creates a shared database pool.
pub async fn create_pool(config: &DatabaseConfig) -> InkpressResult<Arc<DatabasePool>> {
    Ok(Arc::new(DatabasePool::connect(config).await?))
}
