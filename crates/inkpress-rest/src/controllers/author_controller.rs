//! Author controller.

use crate::{
    extractors::JsonBody,
    responses::{created, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use inkpress_service::{AuthorResponse, CreateAuthorRequest};
use tracing::debug;

/// Creates the author router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_author))
        .route("/:id", get(get_author))
}

/// Create an author.
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    request_body = CreateAuthorRequest,
    responses(
        (status = 201, description = "Author created", body = AuthorResponse),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateAuthorRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthorResponse>>), AppError> {
    debug!("Create author request: {}", request.name);

    let response = state.author_service.create_author(request).await?;
    Ok(created("Store Author", response))
}

/// Get an author by ID.
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = String, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author found", body = AuthorResponse),
        (status = 400, description = "Malformed ID"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<AuthorResponse> {
    debug!("Get author request: {}", id);

    let response = state.author_service.get_author(&id).await?;
    ok("Find Author By ID", response)
}
