//! # Inkpress Service
//!
//! Business rules on top of the repositories: request validation, ID
//! parsing, the author-must-exist check, and mapping absence to
//! `NotFound`.

pub mod article_service;
pub mod author_service;
pub mod dto;
pub mod r#impl;
pub mod mappers;

pub use article_service::*;
pub use author_service::*;
pub use dto::*;
pub use r#impl::{ArticleServiceImpl, AuthorServiceImpl};
