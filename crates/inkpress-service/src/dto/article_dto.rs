//! Article-related DTOs.

use chrono::{DateTime, Utc};
use inkpress_core::{ArticleId, ArticleQuery, AuthorId, PageRequest};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Request to create a new article.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateArticleRequest {
    #[validate(custom(function = "inkpress_core::validation::rules::valid_uuid"))]
    #[schema(example = "0190f3b2-8a4c-7d51-9e0a-6c2f4b8d1e3a")]
    pub author_id: String,

    #[validate(length(min = 3, max = 255, message = "Title must be 3-255 characters"))]
    pub title: String,

    #[validate(custom(function = "inkpress_core::validation::rules::not_blank"))]
    pub body: String,
}

impl CreateArticleRequest {
    /// Strips surrounding whitespace from the title so length rules see what gets stored.
    #[must_use]
    pub fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            ..self
        }
    }
}

/// Query string for listing articles.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ArticleQueryParams {
    /// Case-insensitive match against title and body.
    pub query: Option<String>,
    /// Case-insensitive match against the author's name.
    pub author: Option<String>,
    /// Page number, 1-indexed. Values below 1 select the first page.
    pub page: Option<i64>,
    /// Page size. Defaults to 10, capped at 100.
    pub limit: Option<i64>,
}

impl From<ArticleQueryParams> for ArticleQuery {
    fn from(params: ArticleQueryParams) -> Self {
        Self {
            query: params.query,
            author: params.author,
            page: params.page.unwrap_or(1),
            limit: params.limit.unwrap_or(i64::from(PageRequest::DEFAULT_LIMIT)),
        }
    }
}

/// Article response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArticleResponse {
    pub id: ArticleId,
    pub author_id: AuthorId,
    /// The author's display name.
    pub author: String,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Article list response with pagination.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleListResponse {
    pub articles: Vec<ArticleResponse>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}
