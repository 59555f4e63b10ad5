//! Author service implementation.

use super::parse_author_id;
use crate::author_service::AuthorService;
use crate::dto::{AuthorResponse, CreateAuthorRequest};
use async_trait::async_trait;
use inkpress_core::{InkpressError, InkpressResult, NewAuthor, ValidateExt};
use inkpress_repository::AuthorRepository;
use std::sync::Arc;
use tracing::{debug, info};

/// Author service implementation.
pub struct AuthorServiceImpl {
    author_repository: Arc<dyn AuthorRepository>,
}

impl AuthorServiceImpl {
    /// Creates a new `AuthorServiceImpl`.
    pub fn new(author_repository: Arc<dyn AuthorRepository>) -> Self {
        Self { author_repository }
    }
}

#[async_trait]
impl AuthorService for AuthorServiceImpl {
    async fn get_author(&self, id: &str) -> InkpressResult<AuthorResponse> {
        debug!("Getting author by id: {}", id);
        let author_id = parse_author_id(id)?;

        self.author_repository
            .find_by_id(author_id)
            .await?
            .map(AuthorResponse::from)
            .ok_or_else(|| InkpressError::not_found("Author", author_id))
    }

    async fn create_author(&self, request: CreateAuthorRequest) -> InkpressResult<AuthorResponse> {
        let request = request.trimmed();
        request.validate_request()?;

        let author = self.author_repository.create(NewAuthor::new(request.name)).await?;
        info!("Author created: {}", author.id);
        Ok(author.into())
    }
}

impl std::fmt::Debug for AuthorServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorServiceImpl").finish_non_exhaustive()
    }
}
