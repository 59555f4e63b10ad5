//! # Inkpress Server Library
//!
//! Command-line interface, logging setup, and dependency wiring for the
//! `inkpress-server` binary.

pub mod app;
pub mod cli;
pub mod logging;
pub mod startup;
