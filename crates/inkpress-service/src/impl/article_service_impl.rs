//! Article service implementation.

use super::parse_author_id;
use crate::article_service::ArticleService;
use crate::dto::{ArticleListResponse, ArticleQueryParams, ArticleResponse, CreateArticleRequest};
use async_trait::async_trait;
use inkpress_core::{ArticleQuery, InkpressError, InkpressResult, NewArticle, ValidateExt};
use inkpress_repository::{ArticleRepository, AuthorRepository};
use std::sync::Arc;
use tracing::{debug, info};

/// Article service implementation.
///
/// Article creation checks that the author exists first; the repository
/// does not re-check it.
pub struct ArticleServiceImpl {
    article_repository: Arc<dyn ArticleRepository>,
    author_repository: Arc<dyn AuthorRepository>,
}

impl ArticleServiceImpl {
    /// Creates a new `ArticleServiceImpl`.
    pub fn new(article_repository: Arc<dyn ArticleRepository>, author_repository: Arc<dyn AuthorRepository>) -> Self {
        Self {
            article_repository,
            author_repository,
        }
    }
}

#[async_trait]
impl ArticleService for ArticleServiceImpl {
    async fn list_articles(&self, params: ArticleQueryParams) -> InkpressResult<ArticleListResponse> {
        let query = ArticleQuery::from(params);
        let page = query.page_request();
        debug!(page = page.page, limit = page.limit, "Listing articles");

        let result = self.article_repository.find_all(&query).await?;
        if result.is_empty() {
            return Ok(ArticleListResponse {
                articles: Vec::new(),
                page: page.page,
                limit: page.limit,
                total: 0,
            });
        }

        Ok(ArticleListResponse::from_page(result, page))
    }

    async fn create_article(&self, request: CreateArticleRequest) -> InkpressResult<ArticleResponse> {
        let request = request.trimmed();
        request.validate_request()?;
        let author_id = parse_author_id(&request.author_id)?;

        if self.author_repository.find_by_id(author_id).await?.is_none() {
            return Err(InkpressError::not_found("Author", author_id));
        }

        let article = self
            .article_repository
            .create(NewArticle::new(author_id, request.title, request.body))
            .await?;

        info!("Article created: {} by author {}", article.id, author_id);
        Ok(article.into())
    }
}

impl std::fmt::Debug for ArticleServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticleServiceImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#impl::mocks::{MockArticleRepo, MockAuthorRepo};
    use chrono::Utc;
    use inkpress_core::{Article, ArticleId, ArticlePage, Author, AuthorId};

    fn article(author_id: AuthorId, title: &str) -> Article {
        Article {
            id: ArticleId::new(),
            author_id,
            author: "Jane Doe".to_string(),
            title: title.to_string(),
            body: "Test Body".to_string(),
            created_at: Utc::now(),
        }
    }

    fn request(author_id: &str) -> CreateArticleRequest {
        CreateArticleRequest {
            author_id: author_id.to_string(),
            title: "Test Title".to_string(),
            body: "Test Body".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_articles_maps_page() {
        let author_id = AuthorId::new();
        let mut articles = MockArticleRepo::new();
        articles
            .expect_find_all()
            .withf(|query| query.page == 2 && query.limit == 5 && query.text() == Some("rust"))
            .returning(move |_| Ok(ArticlePage::new(vec![article(author_id, "Rust")], 6)));

        let service = ArticleServiceImpl::new(Arc::new(articles), Arc::new(MockAuthorRepo::new()));
        let response = service
            .list_articles(ArticleQueryParams {
                query: Some("rust".to_string()),
                page: Some(2),
                limit: Some(5),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(response.total, 6);
        assert_eq!((response.page, response.limit), (2, 5));
        assert_eq!(response.articles[0].author, "Jane Doe");
    }

    #[tokio::test]
    async fn test_list_articles_empty_page_reports_zero_total() {
        let mut articles = MockArticleRepo::new();
        articles.expect_find_all().returning(|_| Ok(ArticlePage::new(Vec::new(), 42)));

        let service = ArticleServiceImpl::new(Arc::new(articles), Arc::new(MockAuthorRepo::new()));
        let response = service
            .list_articles(ArticleQueryParams {
                page: Some(99),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(response.articles.is_empty());
        assert_eq!(response.total, 0);
    }

    #[tokio::test]
    async fn test_create_article_requires_existing_author() {
        let mut authors = MockAuthorRepo::new();
        authors.expect_find_by_id().returning(|_| Ok(None));
        let mut articles = MockArticleRepo::new();
        articles.expect_create().never();

        let service = ArticleServiceImpl::new(Arc::new(articles), Arc::new(authors));
        let err = service
            .create_article(request(&AuthorId::new().to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, InkpressError::NotFound { resource_type: "Author", .. }));
    }

    #[tokio::test]
    async fn test_create_article_for_known_author() {
        let author_id = AuthorId::new();
        let mut authors = MockAuthorRepo::new();
        authors.expect_find_by_id().times(1).returning(|id| {
            Ok(Some(Author {
                id,
                name: "Jane Doe".to_string(),
            }))
        });
        let mut articles = MockArticleRepo::new();
        articles
            .expect_create()
            .withf(move |new| new.author_id == author_id && new.title == "Test Title")
            .times(1)
            .returning(|new| {
                let mut created = article(new.author_id, &new.title);
                created.body = new.body;
                Ok(created)
            });

        let service = ArticleServiceImpl::new(Arc::new(articles), Arc::new(authors));
        let response = service.create_article(request(&author_id.to_string())).await.unwrap();

        assert_eq!(response.author_id, author_id);
        assert_eq!(response.title, "Test Title");
        assert_eq!(response.body, "Test Body");
    }

    #[tokio::test]
    async fn test_create_article_rejects_malformed_author_id() {
        let mut authors = MockAuthorRepo::new();
        authors.expect_find_by_id().never();

        let service = ArticleServiceImpl::new(Arc::new(MockArticleRepo::new()), Arc::new(authors));
        let err = service.create_article(request("abc")).await.unwrap_err();

        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_create_article_rejects_padded_short_title() {
        let mut authors = MockAuthorRepo::new();
        authors.expect_find_by_id().never();
        let mut articles = MockArticleRepo::new();
        articles.expect_create().never();

        let service = ArticleServiceImpl::new(Arc::new(articles), Arc::new(authors));
        let mut padded = request(&AuthorId::new().to_string());
        padded.title = "  ab  ".to_string();

        let err = service.create_article(padded).await.unwrap_err();
        assert!(matches!(err, InkpressError::Validation(ref msg) if msg.contains("title")));
    }

    #[tokio::test]
    async fn test_create_article_stores_trimmed_title() {
        let mut authors = MockAuthorRepo::new();
        authors.expect_find_by_id().returning(|id| {
            Ok(Some(Author {
                id,
                name: "Jane Doe".to_string(),
            }))
        });
        let mut articles = MockArticleRepo::new();
        articles
            .expect_create()
            .withf(|new| new.title == "Test Title")
            .times(1)
            .returning(|new| Ok(article(new.author_id, &new.title)));

        let service = ArticleServiceImpl::new(Arc::new(articles), Arc::new(authors));
        let mut padded = request(&AuthorId::new().to_string());
        padded.title = "   Test Title \t".to_string();

        let response = service.create_article(padded).await.unwrap();
        assert_eq!(response.title, "Test Title");
    }

    #[tokio::test]
    async fn test_create_article_rejects_blank_body() {
        let service = ArticleServiceImpl::new(Arc::new(MockArticleRepo::new()), Arc::new(MockAuthorRepo::new()));
        let mut invalid = request(&AuthorId::new().to_string());
        invalid.body = "   ".to_string();

        let err = service.create_article(invalid).await.unwrap_err();
        assert!(matches!(err, InkpressError::Validation(ref msg) if msg.contains("body")));
    }
}
