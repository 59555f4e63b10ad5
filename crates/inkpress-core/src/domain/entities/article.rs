//! Article entity and listing filter.

use crate::{ArticleId, AuthorId, PageRequest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A published article.
///
/// `author` is the author's display name. It is joined in at read time
/// and never stored on the article row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub author_id: AuthorId,
    pub author: String,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// An article that has not been persisted yet.
///
/// The referenced author must exist; the service layer checks this
/// before handing the draft to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    pub author_id: AuthorId,
    pub title: String,
    pub body: String,
}

impl NewArticle {
    /// Creates a new article draft.
    #[must_use]
    pub fn new(author_id: AuthorId, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            author_id,
            title: title.into(),
            body: body.into(),
        }
    }
}

/// One page of a listing together with the filter-wide total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticlePage {
    /// Articles on this page, most recent first.
    pub articles: Vec<Article>,
    /// Number of articles matching the filter, ignoring pagination.
    pub total: u64,
}

impl ArticlePage {
    /// Creates a page.
    #[must_use]
    pub fn new(articles: Vec<Article>, total: u64) -> Self {
        Self { articles, total }
    }

    /// A page with no articles and a zero total.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if the page holds no articles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// Filter for listing articles.
///
/// `page` and `limit` hold the raw caller input; use [`ArticleQuery::page_request`]
/// for the normalized values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleQuery {
    /// Free-text match against title and body.
    pub query: Option<String>,
    /// Match against the author's name.
    pub author: Option<String>,
    /// Page number (1-indexed).
    pub page: i64,
    /// Page size.
    pub limit: i64,
}

impl ArticleQuery {
    /// Creates an unfiltered listing for the given page.
    #[must_use]
    pub fn page(page: i64, limit: i64) -> Self {
        Self {
            page,
            limit,
            ..Self::default()
        }
    }

    /// Sets the free-text query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Sets the author-name filter.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Returns the normalized page request.
    #[must_use]
    pub fn page_request(&self) -> PageRequest {
        PageRequest::normalize(self.page, self.limit)
    }

    /// Returns the trimmed free-text query, if one was given.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        non_blank(self.query.as_deref())
    }

    /// Returns the trimmed author-name filter, if one was given.
    #[must_use]
    pub fn author_name(&self) -> Option<&str> {
        non_blank(self.author.as_deref())
    }

    /// A listing is cacheable only when it carries no filters at all.
    #[must_use]
    pub fn is_cacheable(&self) -> bool {
        self.text().is_none() && self.author_name().is_none()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
