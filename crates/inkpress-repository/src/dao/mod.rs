//! DAO (Data Access Object) layer.
//!
//! DAOs provide low-level, single-source data access with no caching.
//!
//! Hierarchy:
//! ```text
//! Service → Repository (interface + impl) → DAO (interface + impl) → DB
//! ```

pub mod article_dao;
pub mod author_dao;
pub mod r#impl;

pub use article_dao::{ArticleDao, ArticleFilter};
pub use author_dao::AuthorDao;
pub use r#impl::{PgArticleDaoImpl, PgAuthorDaoImpl};
