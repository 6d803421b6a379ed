//! Shared context injected into every plugin.

use std::collections::{BTreeSet, HashSet};
use std::sync::{Arc, RwLock};

use chanbot_core::{Bot, Result};
use tokio::sync::Mutex;

/// Transport handle plus the bot-wide settings plugins need.
pub struct BotContext {
    bot: Arc<dyn Bot>,
    command_prefix: String,
    admins: HashSet<String>,
    fixed_command: Mutex<Option<String>>,
    command_names: RwLock<BTreeSet<String>>,
}

impl BotContext {
    pub fn new(bot: Arc<dyn Bot>, command_prefix: &str, admins: impl IntoIterator<Item = String>) -> Self {
        Self {
            bot,
            command_prefix: command_prefix.to_string(),
            admins: admins.into_iter().collect(),
            fixed_command: Mutex::new(None),
            command_names: RwLock::new(BTreeSet::new()),
        }
    }

    pub fn bot(&self) -> &Arc<dyn Bot> {
        &self.bot
    }

    pub fn command_prefix(&self) -> &str {
        &self.command_prefix
    }

    pub fn is_admin(&self, nick: &str) -> bool {
        self.admins.contains(nick)
    }

    pub async fn say(&self, channel: &str, text: &str) -> Result<()> {
        self.bot.say(channel, text).await
    }

    pub async fn say_ok(&self, channel: &str) -> Result<()> {
        self.bot.say(channel, "ok").await
    }

    pub async fn say_err(&self, channel: &str) -> Result<()> {
        self.bot.say(channel, "error").await
    }

    /// Remembers a prefix-less command line (e.g. `get faq`) that `fix` will run next.
    pub async fn register_fixed_command(&self, line: &str) {
        *self.fixed_command.lock().await = Some(line.to_string());
    }

    /// Takes the remembered command, leaving none behind.
    pub async fn take_fixed_command(&self) -> Option<String> {
        self.fixed_command.lock().await.take()
    }

    /// Whether a command with this name is registered.
    pub fn has_command(&self, name: &str) -> bool {
        self.command_names
            .read()
            .map(|names| names.contains(name))
            .unwrap_or_else(|poisoned| poisoned.into_inner().contains(name))
    }

    pub(crate) fn set_command_names(&self, names: impl IntoIterator<Item = String>) {
        let mut guard = self
            .command_names
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = names.into_iter().collect();
    }
}
