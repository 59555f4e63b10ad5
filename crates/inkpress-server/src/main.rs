//! # Inkpress Server
//!
//! `inkpress-server server` runs the API; `inkpress-server migrate`
//! applies or reverts database migrations.

use clap::Parser;
use inkpress_server::{
    app,
    cli::{Cli, Commands},
    logging::init_logging,
};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match cli.config_loader().load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.observability) {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }

    info!("Starting {} v{}", config.app.name, env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    let result = match cli.command {
        Commands::Server => app::serve(config).await,
        Commands::Migrate { direction } => app::migrate(config, direction).await,
    };

    if let Err(e) = result {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}
