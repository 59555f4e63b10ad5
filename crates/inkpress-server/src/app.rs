//! Dependency wiring and process lifecycle.

use crate::cli::Direction;
use crate::startup::print_startup_info;
use inkpress_config::AppConfig;
use inkpress_core::{HealthCheck, InkpressError, InkpressResult};
use inkpress_repository::{
    create_pool, ArticleRepositoryImpl, AuthorRepositoryImpl, CacheInterface, CacheSettings, DatabasePool,
    DatabasePoolInterface, PgArticleDaoImpl, PgAuthorDaoImpl, RedisCacheService,
};
use inkpress_rest::{create_router, AppState};
use inkpress_service::{ArticleServiceImpl, AuthorServiceImpl};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

/// Builds the Redis cache. It is disabled only when turned off or when the
/// URL cannot produce a pool; an unreachable server is retried per request.
pub async fn build_cache(config: &AppConfig) -> Arc<RedisCacheService> {
    if !config.redis.enabled {
        info!("Redis cache disabled by configuration");
        return Arc::new(RedisCacheService::disabled());
    }

    match RedisCacheService::connect(&config.redis).await {
        Ok(cache) => Arc::new(cache),
        Err(e) => {
            warn!("Redis misconfigured, continuing without cache: {}", e);
            Arc::new(RedisCacheService::disabled())
        }
    }
}

/// Wires DAOs, repositories and services into the REST state.
pub fn build_state(config: &AppConfig, pool: Arc<DatabasePool>, cache: Arc<RedisCacheService>) -> AppState {
    let settings = CacheSettings::from(&config.cache);
    let db: Arc<dyn DatabasePoolInterface> = pool.clone();
    let cache_handle: Arc<dyn CacheInterface> = cache.clone();

    let article_dao = Arc::new(PgArticleDaoImpl::new(Arc::clone(&db)));
    let author_dao = Arc::new(PgAuthorDaoImpl::new(db));

    let author_repository = Arc::new(AuthorRepositoryImpl::new(
        author_dao.clone(),
        Arc::clone(&cache_handle),
        settings,
    ));
    let article_repository = Arc::new(ArticleRepositoryImpl::new(article_dao, author_dao, cache_handle, settings));

    let article_service = Arc::new(ArticleServiceImpl::new(article_repository, author_repository.clone()));
    let author_service = Arc::new(AuthorServiceImpl::new(author_repository));

    let checks = vec![pool as Arc<dyn HealthCheck>, cache as Arc<dyn HealthCheck>];
    AppState::new(article_service, author_service).with_health_checks(checks)
}

/// Runs the HTTP server until Ctrl-C or SIGTERM.
pub async fn serve(config: AppConfig) -> InkpressResult<()> {
    let pool = create_pool(&config.database).await?;
    pool.run_migrations().await?;

    let monitor = config
        .database
        .ping_interval()
        .map(|interval| pool.spawn_health_monitor(interval));

    let cache = build_cache(&config).await;
    let router = create_router(build_state(&config, Arc::clone(&pool), cache), &config.server);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| InkpressError::Internal(format!("Failed to bind {}: {}", addr, e)))?;
    print_startup_info(&addr);

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| InkpressError::Internal(format!("HTTP server error: {}", e)));

    if let Some(monitor) = monitor {
        monitor.abort();
    }
    pool.close().await;

    served?;
    info!("Server shutdown complete");
    Ok(())
}

/// Applies or reverts migrations and exits.
pub async fn migrate(config: AppConfig, direction: Direction) -> InkpressResult<()> {
    let pool = create_pool(&config.database).await?;
    let result = match direction {
        Direction::Up => pool.run_migrations().await,
        Direction::Down => pool.revert_last_migration().await,
    };
    pool.close().await;
    result
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
