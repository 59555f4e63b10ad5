//! Command-line interface.

use clap::{Parser, Subcommand, ValueEnum};
use inkpress_config::{ConfigLoader, ENVIRONMENT_VAR};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "inkpress-server", version, about = "Inkpress article and author API", long_about = None)]
pub struct Cli {
    /// Directory holding `default.toml` and the per-environment files
    #[arg(long, env = "INKPRESS_CONFIG_DIR", default_value = "./config", global = true)]
    pub config_dir: PathBuf,

    /// Environment name, selects `{config_dir}/{environment}.toml`
    #[arg(long, env = ENVIRONMENT_VAR, global = true)]
    pub environment: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server
    #[command(alias = "s")]
    Server,
    /// Apply or revert database migrations
    Migrate {
        #[arg(long, short, value_enum, default_value_t = Direction::Up)]
        direction: Direction,
    },
}

/// Migration direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    /// Apply every pending migration.
    Up,
    /// Revert the most recently applied migration.
    Down,
}

impl Cli {
    /// Builds the config loader selected by the flags.
    #[must_use]
    pub fn config_loader(&self) -> ConfigLoader {
        let loader = ConfigLoader::new(&self.config_dir);
        match &self.environment {
            Some(environment) => loader.with_environment(environment),
            None => loader,
        }
    }
}
