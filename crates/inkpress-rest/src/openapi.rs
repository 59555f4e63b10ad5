//! OpenAPI documentation configuration.

use crate::controllers::health_controller::HealthResponse;
use inkpress_core::{ArticleId, AuthorId, ErrorResponse, FieldError};
use inkpress_service::{ArticleResponse, AuthorResponse, CreateArticleRequest, CreateAuthorRequest};
use utoipa::OpenApi;

/// OpenAPI documentation for the Inkpress API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inkpress API",
        version = "1.0.0",
        description = "Articles and authors",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        crate::controllers::article_controller::list_articles,
        crate::controllers::article_controller::create_article,
        crate::controllers::author_controller::create_author,
        crate::controllers::author_controller::get_author,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            ArticleId,
            AuthorId,
            ErrorResponse,
            FieldError,
            CreateArticleRequest,
            ArticleResponse,
            CreateAuthorRequest,
            AuthorResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "articles", description = "Article endpoints"),
        (name = "authors", description = "Author endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
