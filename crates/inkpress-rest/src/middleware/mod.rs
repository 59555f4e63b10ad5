//! HTTP middleware.

mod cors;
mod logging;

pub use cors::*;
pub use logging::*;
