//! Base config: bot identity, command prefix, admins, transport limit and log file. Loaded from env.

use anyhow::Result;
use std::env;

/// Base config shared by every plugin.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_NICK (or the `--nick` override)
    pub nick: String,
    /// BOT_CHANNEL
    pub channel: String,
    /// COMMAND_PREFIX
    pub command_prefix: String,
    /// BOT_ADMINS, comma separated
    pub admins: Vec<String>,
    /// MAX_MESSAGE_LENGTH, in bytes
    pub max_message_length: usize,
    /// LOG_FILE
    pub log_file: String,
}

impl BaseConfig {
    /// Load from environment variables. `nick` overrides BOT_NICK if provided.
    pub fn load(nick: Option<String>) -> Result<Self> {
        let nick = nick
            .or_else(|| env::var("BOT_NICK").ok())
            .unwrap_or_else(|| "chanbot".to_string());
        let channel = env::var("BOT_CHANNEL").unwrap_or_else(|_| "#chanbot".to_string());
        let command_prefix = env::var("COMMAND_PREFIX").unwrap_or_else(|_| "!".to_string());
        let admins = env::var("BOT_ADMINS")
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|a| !a.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let max_message_length = env::var("MAX_MESSAGE_LENGTH")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(400);
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/chanbot.log".to_string());

        Ok(Self {
            nick,
            channel,
            command_prefix,
            admins,
            max_message_length,
            log_file,
        })
    }

    /// Validate config (non-empty nick and prefix, non-zero message length).
    pub fn validate(&self) -> Result<()> {
        if self.nick.trim().is_empty() {
            anyhow::bail!("BOT_NICK must not be empty");
        }
        if self.command_prefix.is_empty() || self.command_prefix.chars().any(char::is_whitespace) {
            anyhow::bail!(
                "COMMAND_PREFIX must be non-empty and contain no whitespace: {:?}",
                self.command_prefix
            );
        }
        if self.max_message_length == 0 {
            anyhow::bail!("MAX_MESSAGE_LENGTH must be greater than zero");
        }
        Ok(())
    }
}
