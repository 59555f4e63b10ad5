//! `AuthorDao` trait: store-level author access.

use async_trait::async_trait;
use inkpress_core::{Author, AuthorId, InkpressResult};

/// Low-level author data access object.
#[async_trait]
pub trait AuthorDao: Send + Sync {
    /// Finds an author by ID.
    async fn find_by_id(&self, id: AuthorId) -> InkpressResult<Option<Author>>;

    /// Returns the IDs of authors whose name contains `name`, ignoring case.
    async fn find_ids_by_name(&self, name: &str) -> InkpressResult<Vec<AuthorId>>;

    /// Inserts an author.
    async fn insert(&self, author: &Author) -> InkpressResult<Author>;
}
