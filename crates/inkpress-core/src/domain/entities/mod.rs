//! Domain entities.

mod article;
mod author;

pub use article::*;
pub use author::*;
