//! Author service trait definition.

use crate::dto::{AuthorResponse, CreateAuthorRequest};
use async_trait::async_trait;
use inkpress_core::InkpressResult;

/// Author service trait.
#[async_trait]
pub trait AuthorService: Send + Sync {
    /// Gets an author by its string ID.
    async fn get_author(&self, id: &str) -> InkpressResult<AuthorResponse>;

    /// Creates a new author.
    async fn create_author(&self, request: CreateAuthorRequest) -> InkpressResult<AuthorResponse>;
}
