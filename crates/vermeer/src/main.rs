//! Vermeer CLI binary.
//!
//! This binary provides command-line access to the mirroring pipeline:
//! - Mirror image references for one or all configured collections
//! - Classify a URL the way the pipeline would

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{handle_classify, handle_mirror, Cli, Commands};

    // Credentials and collection ids come from the environment; a local
    // .env file is honored when present.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Mirror { collection } => {
            handle_mirror(collection.as_deref()).await?;
        }

        Commands::Classify { url } => {
            handle_classify(&url)?;
        }
    }

    Ok(())
}
