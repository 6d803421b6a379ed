//! CLI parser.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chanbot")]
#[command(about = "Channel bot CLI", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot on the console channel (config from env; nick can override BOT_NICK).
    Run {
        #[arg(short, long)]
        nick: Option<String>,
    },
}
