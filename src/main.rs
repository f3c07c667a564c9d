mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use revangeapi::config::Config;
use revangeapi::observability;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    observability::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Server(args) => {
            info!("Loading configuration");
            let config = match args.config {
                Some(path) => Config::load_with_path(path),
                None => Config::load(),
            }
            .map_err(|e| format!("Failed to load config: {}", e))?;

            revangeapi::api::run(config, args.address).await?
        }
    }

    Ok(())
}
