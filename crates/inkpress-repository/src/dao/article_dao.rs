//! `ArticleDao` trait: store-level article access.

use async_trait::async_trait;
use inkpress_core::{Article, ArticleId, ArticlePage, AuthorId, InkpressResult, NewArticle, PageRequest};

/// Predicate for an article listing, already resolved to store terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    /// Case-insensitive substring matched against title or body.
    pub text: Option<String>,
    /// Restricts results to these authors. `Some(empty)` matches nothing.
    pub author_ids: Option<Vec<AuthorId>>,
}

/// Low-level article data access object.
#[async_trait]
pub trait ArticleDao: Send + Sync {
    /// Finds an article by ID, joined with its author's name.
    async fn find_by_id(&self, id: ArticleId) -> InkpressResult<Option<Article>>;

    /// Returns one page ordered by creation time (newest first) and the
    /// number of rows matching the filter.
    async fn find_page(&self, filter: &ArticleFilter, page: PageRequest) -> InkpressResult<ArticlePage>;

    /// Inserts an article under the given ID and returns the stored row.
    async fn insert(&self, id: ArticleId, article: &NewArticle) -> InkpressResult<Article>;
}
