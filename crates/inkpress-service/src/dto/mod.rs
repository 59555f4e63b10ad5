//! Data Transfer Objects (DTOs).

mod article_dto;
mod author_dto;

pub use article_dto::*;
pub use author_dto::*;
