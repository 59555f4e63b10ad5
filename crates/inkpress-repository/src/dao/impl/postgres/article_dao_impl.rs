//! PostgreSQL article DAO.

use super::contains_pattern;
use crate::{dao::ArticleDao, dao::ArticleFilter, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use inkpress_core::{Article, ArticleId, ArticlePage, InkpressResult, NewArticle, PageRequest};
use sqlx::{FromRow, Postgres, QueryBuilder};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

const SELECT_ARTICLES: &str = r#"
    SELECT a.id, a.author_id, au.name AS author, a.title, a.body, a.created_at
    FROM articles a
    JOIN authors au ON au.id = a.author_id
"#;

/// Article DAO backed by PostgreSQL.
#[derive(Clone)]
pub struct PgArticleDaoImpl {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgArticleDaoImpl {
    /// Creates a new article DAO.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

impl std::fmt::Debug for PgArticleDaoImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgArticleDaoImpl").finish_non_exhaustive()
    }
}

/// Database row representation of an article joined with its author.
#[derive(Debug, FromRow)]
struct ArticleRow {
    id: Uuid,
    author_id: Uuid,
    author: String,
    title: String,
    body: String,
    created_at: DateTime<Utc>,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        Self {
            id: row.id.into(),
            author_id: row.author_id.into(),
            author: row.author,
            title: row.title,
            body: row.body,
            created_at: row.created_at,
        }
    }
}

/// Appends the `WHERE` clause for `filter`. Both listing and count share it.
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &ArticleFilter) {
    let mut separator = " WHERE ";

    if let Some(text) = &filter.text {
        let pattern = contains_pattern(text);
        qb.push(separator)
            .push("(a.title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR a.body ILIKE ")
            .push_bind(pattern)
            .push(")");
        separator = " AND ";
    }

    if let Some(author_ids) = &filter.author_ids {
        let ids: Vec<Uuid> = author_ids.iter().map(|id| id.into_inner()).collect();
        qb.push(separator).push("a.author_id = ANY(").push_bind(ids).push(")");
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl ArticleDao for PgArticleDaoImpl {
    async fn find_by_id(&self, id: ArticleId) -> InkpressResult<Option<Article>> {
        debug!("Finding article by id: {}", id);

        let row = sqlx::query_as::<_, ArticleRow>(&format!("{SELECT_ARTICLES} WHERE a.id = $1"))
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.map(Article::from))
    }

    async fn find_page(&self, filter: &ArticleFilter, page: PageRequest) -> InkpressResult<ArticlePage> {
        debug!(?filter, page = page.page, limit = page.limit, "Querying articles");

        let mut select = QueryBuilder::<Postgres>::new(SELECT_ARTICLES);
        push_filter(&mut select, filter);
        select
            .push(" ORDER BY a.created_at DESC, a.id DESC LIMIT ")
            .push_bind(to_i64(page.limit()))
            .push(" OFFSET ")
            .push_bind(to_i64(page.offset()));

        let rows = select
            .build_query_as::<ArticleRow>()
            .fetch_all(self.pool.inner())
            .await?;

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM articles a");
        push_filter(&mut count, filter);
        let total: i64 = count.build_query_scalar().fetch_one(self.pool.inner()).await?;

        Ok(ArticlePage::new(
            rows.into_iter().map(Article::from).collect(),
            u64::try_from(total).unwrap_or_default(),
        ))
    }

    async fn insert(&self, id: ArticleId, article: &NewArticle) -> InkpressResult<Article> {
        debug!("Inserting article {} for author {}", id, article.author_id);

        let row = sqlx::query_as::<_, ArticleRow>(
            r#"
            WITH inserted AS (
                INSERT INTO articles (id, author_id, title, body)
                VALUES ($1, $2, $3, $4)
                RETURNING id, author_id, title, body, created_at
            )
            SELECT i.id, i.author_id, au.name AS author, i.title, i.body, i.created_at
            FROM inserted i
            JOIN authors au ON au.id = i.author_id
            "#,
        )
        .bind(id.into_inner())
        .bind(article.author_id.into_inner())
        .bind(&article.title)
        .bind(&article.body)
        .fetch_one(self.pool.inner())
        .await?;

        Ok(row.into())
    }
}
