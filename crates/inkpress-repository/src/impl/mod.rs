//! Repository layer implementations.
//!
//! Trait definitions live in `traits.rs`. These structs apply the cache
//! policy and coordinate the DAOs.

pub mod article_repository_impl;
pub mod author_repository_impl;

#[cfg(test)]
mod test_support;

pub use article_repository_impl::ArticleRepositoryImpl;
pub use author_repository_impl::AuthorRepositoryImpl;
