//! Service implementations.

mod article_service_impl;
mod author_service_impl;

pub use article_service_impl::ArticleServiceImpl;
pub use author_service_impl::AuthorServiceImpl;

use inkpress_core::{AuthorId, InkpressError, InkpressResult};

/// Parses an externally supplied author ID.
pub(crate) fn parse_author_id(raw: &str) -> InkpressResult<AuthorId> {
    AuthorId::parse(raw.trim()).map_err(|_| InkpressError::validation("invalid author id format"))
}

#[cfg(test)]
pub(crate) mod mocks {
    use async_trait::async_trait;
    use inkpress_core::{
        Article, ArticleId, ArticlePage, ArticleQuery, Author, AuthorId, InkpressResult, NewArticle, NewAuthor,
    };
    use inkpress_repository::{ArticleRepository, AuthorRepository};
    use mockall::mock;

    mock! {
        pub ArticleRepo {}

        #[async_trait]
        impl ArticleRepository for ArticleRepo {
            async fn find_all(&self, query: &ArticleQuery) -> InkpressResult<ArticlePage>;
            async fn find_by_id(&self, id: ArticleId) -> InkpressResult<Option<Article>>;
            async fn create(&self, article: NewArticle) -> InkpressResult<Article>;
        }
    }

    mock! {
        pub AuthorRepo {}

        #[async_trait]
        impl AuthorRepository for AuthorRepo {
            async fn find_by_id(&self, id: AuthorId) -> InkpressResult<Option<Author>>;
            async fn create(&self, author: NewAuthor) -> InkpressResult<Author>;
        }
    }
}
