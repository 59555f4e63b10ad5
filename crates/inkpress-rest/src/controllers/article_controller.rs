//! Article controller.

use crate::{
    extractors::{JsonBody, QueryParams},
    responses::{created, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use inkpress_service::{ArticleQueryParams, ArticleResponse, CreateArticleRequest};
use tracing::debug;

/// Creates the article router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_articles).post(create_article))
}

/// List articles, most recent first.
#[utoipa::path(
    get,
    path = "/articles",
    tag = "articles",
    params(ArticleQueryParams),
    responses(
        (status = 200, description = "Page of articles; `total` counts every match", body = [ArticleResponse]),
        (status = 400, description = "Malformed query string")
    )
)]
pub async fn list_articles(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ArticleQueryParams>,
) -> ApiResult<Vec<ArticleResponse>> {
    debug!("List articles request: {:?}", params);

    let response = state.article_service.list_articles(params).await?;
    Ok(Json(ApiResponse::success("List Article", response.articles).with_total(response.total)))
}

/// Create an article for an existing author.
#[utoipa::path(
    post,
    path = "/articles",
    tag = "articles",
    request_body = CreateArticleRequest,
    responses(
        (status = 201, description = "Article created", body = ArticleResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn create_article(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateArticleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ArticleResponse>>), AppError> {
    debug!("Create article request for author {}", request.author_id);

    let response = state.article_service.create_article(request).await?;
    Ok(created("Store Article", response))
}
