//! # Inkpress Config
//!
//! Layered configuration for Inkpress: built-in defaults, TOML files
//! under `config/`, and `INKPRESS__*` environment variables.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;
