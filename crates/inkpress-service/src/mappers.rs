//! Entity-DTO mappers.

use crate::dto::{ArticleListResponse, ArticleResponse, AuthorResponse};
use inkpress_core::{Article, ArticlePage, Author, PageRequest};

impl From<Article> for ArticleResponse {
    fn from(article: Article) -> Self {
        Self {
            id: article.id,
            author_id: article.author_id,
            author: article.author,
            title: article.title,
            body: article.body,
            created_at: article.created_at,
        }
    }
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            name: author.name,
        }
    }
}

impl ArticleListResponse {
    /// Builds a list response for the given page request.
    #[must_use]
    pub fn from_page(result: ArticlePage, page: PageRequest) -> Self {
        Self {
            articles: result.articles.into_iter().map(ArticleResponse::from).collect(),
            page: page.page,
            limit: page.limit,
            total: result.total,
        }
    }
}
