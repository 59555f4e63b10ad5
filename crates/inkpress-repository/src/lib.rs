//! # Inkpress Repository
//!
//! Four-layer data access hierarchy with a cache in front of the store:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn ArticleRepository>   (domain interface)
//! ArticleRepositoryImpl             (cache policy, coordinates DAOs)
//!   ↓  Arc<dyn CacheInterface>      ↓  Arc<dyn ArticleDao>
//! Redis / in-memory                 PgArticleDaoImpl
//!                                     ↓
//!                                   PostgreSQL
//! ```
//!
//! Repositories are the only components that build cache keys or
//! invalidate them. A failing cache degrades to a database round-trip
//! and never surfaces as an error.

pub mod cache;
pub mod dao;
pub mod pool;
pub mod traits;
pub mod r#impl;

pub use cache::{CacheExt, CacheInterface, CacheSettings, InMemoryCache, RedisCacheService};
pub use dao::{ArticleDao, ArticleFilter, AuthorDao, PgArticleDaoImpl, PgAuthorDaoImpl};
pub use pool::*;
pub use r#impl::{ArticleRepositoryImpl, AuthorRepositoryImpl};
pub use traits::*;
