mod cli;
mod commands;

use browserselect::config::Config;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // stdout is reserved for results
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Classify(args) => commands::classify_input(args)?,
        Commands::Resolve(args) => commands::resolve_input(&config, args).await?,
        Commands::ShowConfig => commands::show_config(&config)?,
    }

    Ok(())
}
