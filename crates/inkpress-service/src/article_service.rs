//! Article service trait definition.

use crate::dto::{ArticleListResponse, ArticleQueryParams, ArticleResponse, CreateArticleRequest};
use async_trait::async_trait;
use inkpress_core::InkpressResult;

/// Article service trait.
#[async_trait]
pub trait ArticleService: Send + Sync {
    /// Lists articles, most recent first.
    async fn list_articles(&self, params: ArticleQueryParams) -> InkpressResult<ArticleListResponse>;

    /// Creates an article for an existing author.
    async fn create_article(&self, request: CreateArticleRequest) -> InkpressResult<ArticleResponse>;
}
