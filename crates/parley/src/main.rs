//! Parley CLI binary.
//!
//! This binary provides command-line access to Parley:
//! - Serve the HTTP API and editor backend
//! - List and create conversations
//! - Play a conversation in the terminal

use clap::Parser;
use parley::{ParleyConfig, init_tracing};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{
        Cli, Commands, create_conversation, list_conversations, play_conversation, run_server,
    };

    // Pick up ACCESS_PASSWORD and PARLEY__* from .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ParleyConfig::from_file(path)?,
        None => ParleyConfig::load()?,
    };

    let default_filter = if cli.verbose { "debug" } else { "info" };
    init_tracing(default_filter, config.logging.json)?;

    match cli.command {
        Commands::Serve {
            host,
            port,
            data_dir,
        } => {
            run_server(config, host, port, data_dir).await?;
        }

        Commands::List => {
            list_conversations(&config).await?;
        }

        Commands::Create { name } => {
            create_conversation(&config, &name).await?;
        }

        Commands::Play { conversation_id } => {
            play_conversation(&config, &conversation_id).await?;
        }
    }

    Ok(())
}
