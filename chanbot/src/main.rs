//! chanbot binary: runs the bot on the console channel. Config from env and optional CLI args.

use anyhow::Result;
use chanbot::{load_config, run_bot, Cli, Commands};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { nick } => {
            let config = load_config(nick)?;
            run_bot(config).await
        }
    }
}
