//! PostgreSQL author DAO.

use super::contains_pattern;
use crate::{dao::AuthorDao, DatabasePoolInterface};
use async_trait::async_trait;
use inkpress_core::{Author, AuthorId, InkpressResult};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Author DAO backed by PostgreSQL.
#[derive(Clone)]
pub struct PgAuthorDaoImpl {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgAuthorDaoImpl {
    /// Creates a new author DAO.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

impl std::fmt::Debug for PgAuthorDaoImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgAuthorDaoImpl").finish_non_exhaustive()
    }
}

#[derive(Debug, FromRow)]
struct AuthorRow {
    id: Uuid,
    name: String,
}

impl From<AuthorRow> for Author {
    fn from(row: AuthorRow) -> Self {
        Self {
            id: row.id.into(),
            name: row.name,
        }
    }
}

#[async_trait]
impl AuthorDao for PgAuthorDaoImpl {
    async fn find_by_id(&self, id: AuthorId) -> InkpressResult<Option<Author>> {
        debug!("Finding author by id: {}", id);

        let row = sqlx::query_as::<_, AuthorRow>("SELECT id, name FROM authors WHERE id = $1")
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.map(Author::from))
    }

    async fn find_ids_by_name(&self, name: &str) -> InkpressResult<Vec<AuthorId>> {
        debug!("Finding author ids by name: {}", name);

        let ids: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM authors WHERE name ILIKE $1")
            .bind(contains_pattern(name))
            .fetch_all(self.pool.inner())
            .await?;

        Ok(ids.into_iter().map(AuthorId::from).collect())
    }

    async fn insert(&self, author: &Author) -> InkpressResult<Author> {
        debug!("Inserting author {}", author.id);

        let row = sqlx::query_as::<_, AuthorRow>(
            "INSERT INTO authors (id, name) VALUES ($1, $2) RETURNING id, name",
        )
        .bind(author.id.into_inner())
        .bind(&author.name)
        .fetch_one(self.pool.inner())
        .await?;

        Ok(row.into())
    }
}
