//! Main application router.

use crate::{
    controllers::{article_controller, author_controller, health_controller},
    middleware::{cors_layer, logging_middleware},
    openapi::ApiDoc,
    state::AppState,
};
use axum::{middleware, routing::get, Router};
use inkpress_config::ServerConfig;
use tower_http::{
    compression::CompressionLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Creates the main application router.
pub fn create_router(state: AppState, server_config: &ServerConfig) -> Router {
    let api_router = Router::new()
        .nest("/articles", article_controller::router())
        .nest("/authors", author_controller::router());

    let router = Router::new()
        .merge(health_controller::router())
        .nest("/api/v1", api_router)
        .route("/", get(root))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(logging_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(server_config.request_timeout()))
        .layer(cors_layer(server_config))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    info!("Router created with REST endpoints and Swagger UI at /swagger-ui");
    router
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "Inkpress API v1"
}
