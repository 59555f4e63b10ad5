//! Repository traits consumed by the service layer.

use async_trait::async_trait;
use inkpress_core::{Article, ArticleId, ArticlePage, ArticleQuery, Author, AuthorId, InkpressResult, NewArticle, NewAuthor};

/// Repository for articles.
///
/// Implementations own the cache policy for article listings. Cache
/// failures never surface through this trait; only store errors do.
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Lists articles matching the query, most recent first.
    async fn find_all(&self, query: &ArticleQuery) -> InkpressResult<ArticlePage>;

    /// Finds an article by ID. Absence is `Ok(None)`.
    async fn find_by_id(&self, id: ArticleId) -> InkpressResult<Option<Article>>;

    /// Persists a new article and returns it with its assigned ID,
    /// creation time and author name.
    ///
    /// The author is not re-validated here.
    async fn create(&self, article: NewArticle) -> InkpressResult<Article>;
}

/// Repository for authors.
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Finds an author by ID. Absence is `Ok(None)`.
    async fn find_by_id(&self, id: AuthorId) -> InkpressResult<Option<Author>>;

    /// Persists a new author and returns it with its assigned ID.
    async fn create(&self, author: NewAuthor) -> InkpressResult<Author>;
}
