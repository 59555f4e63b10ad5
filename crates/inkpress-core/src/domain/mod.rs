//! Domain layer: entities and the article listing filter.

pub mod entities;

pub use entities::*;
