//! `AuthorRepositoryImpl`: author lookups behind a read-through cache.

use crate::cache::{self, cache_keys, CacheInterface, CacheSettings};
use crate::dao::AuthorDao;
use crate::traits::AuthorRepository;
use async_trait::async_trait;
use inkpress_core::{Author, AuthorId, InkpressResult, NewAuthor};
use std::sync::Arc;
use tracing::{debug, info};

/// Repository implementation caching authors under `author:<id>`.
///
/// Authors never change after creation, so nothing is invalidated.
pub struct AuthorRepositoryImpl {
    author_dao: Arc<dyn AuthorDao>,
    cache: Arc<dyn CacheInterface>,
    settings: CacheSettings,
}

impl AuthorRepositoryImpl {
    /// Creates a new `AuthorRepositoryImpl`.
    #[must_use]
    pub fn new(author_dao: Arc<dyn AuthorDao>, cache: Arc<dyn CacheInterface>, settings: CacheSettings) -> Self {
        Self {
            author_dao,
            cache,
            settings,
        }
    }
}

#[async_trait]
impl AuthorRepository for AuthorRepositoryImpl {
    async fn find_by_id(&self, id: AuthorId) -> InkpressResult<Option<Author>> {
        let key = cache_keys::author(id);
        let limit = self.settings.operation_timeout;
        if let Some(author) = cache::read::<Author>(&*self.cache, &key, limit).await {
            return Ok(Some(author));
        }

        let found = self.author_dao.find_by_id(id).await?;
        match &found {
            Some(author) => cache::write(&*self.cache, &key, author, self.settings.ttl, limit).await,
            None => debug!("Author {} not found", id),
        }
        Ok(found)
    }

    async fn create(&self, author: NewAuthor) -> InkpressResult<Author> {
        let created = self.author_dao.insert(&author.into_author(AuthorId::new())).await?;
        info!(author_id = %created.id, "Author created");
        Ok(created)
    }
}

impl std::fmt::Debug for AuthorRepositoryImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorRepositoryImpl").finish_non_exhaustive()
    }
}
