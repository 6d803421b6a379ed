//! # chanbot
//!
//! Application crate: env config, CLI, console transport and the runner that wires plugins into
//! the handler chain.

pub mod cli;
pub mod config;
pub mod console;
pub mod runner;

pub use cli::{Cli, Commands};
pub use config::{BaseConfig, BotConfig, PluginsConfig};
pub use console::{parse_console_line, run_console, ConsoleBot};
pub use runner::{run_bot, ChanBot};

/// Load BotConfig from environment. If `nick` is provided it overrides BOT_NICK.
pub fn load_config(nick: Option<String>) -> anyhow::Result<BotConfig> {
    BotConfig::load(nick)
}
