//! REST API controllers.

pub mod article_controller;
pub mod author_controller;
pub mod health_controller;
