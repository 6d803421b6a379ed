//! Kicks senders of banned words. Words are regular expressions.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chanbot_core::{Handler, Message, Result};
use handler_chain::{command_fn, BotContext, CommandCall, CommandRegistry, CommandSpec, Plugin};
use regex::Regex;
use tracing::{info, instrument, warn};

pub const KICK_REASON: &str = "watch your language!";

pub struct WordsBlacklistPlugin {
    ctx: Arc<BotContext>,
    blacklist: RwLock<BTreeMap<String, Regex>>,
}

impl WordsBlacklistPlugin {
    pub fn new(ctx: Arc<BotContext>) -> Self {
        Self {
            ctx,
            blacklist: RwLock::new(BTreeMap::new()),
        }
    }

    /// Banned patterns, ascending.
    pub fn banned(&self) -> Vec<String> {
        self.blacklist
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .keys()
            .cloned()
            .collect()
    }

    fn first_match(&self, text: &str) -> Option<String> {
        self.blacklist
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .find(|(_, pattern)| pattern.is_match(text))
            .map(|(word, _)| word.clone())
    }

    async fn ban_word(&self, call: CommandCall) -> Result<()> {
        if call.args.is_empty() {
            return Ok(());
        }

        let mut compiled = Vec::new();
        for word in &call.args {
            match Regex::new(word) {
                Ok(pattern) => compiled.push((word.clone(), pattern)),
                Err(e) => {
                    warn!(word = %word, error = %e, "Invalid banned word pattern");
                    self.ctx
                        .say(&call.channel, &format!("invalid pattern: {word}"))
                        .await?;
                }
            }
        }
        if compiled.is_empty() {
            return Ok(());
        }

        let words: Vec<String> = compiled.iter().map(|(w, _)| w.clone()).collect();
        self.blacklist
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .extend(compiled);

        let suffix = if self.ctx.bot().am_i_channel_operator(&call.channel).await {
            ""
        } else {
            ", but I need operator privileges to kick ;("
        };
        let text = format!("[{}] banned{suffix}", words.join(", "));
        self.ctx.say(&call.channel, &text).await?;
        info!(sender = %call.sender, words = ?words, "Words banned");
        Ok(())
    }

    async fn unban_word(&self, call: CommandCall) -> Result<()> {
        let removed: Vec<String> = {
            let mut blacklist = self
                .blacklist
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            call.args
                .iter()
                .filter(|word| blacklist.remove(word.as_str()).is_some())
                .cloned()
                .collect()
        };
        if removed.is_empty() {
            return Ok(());
        }

        let text = format!("[{}] unbanned", removed.join(", "));
        self.ctx.say(&call.channel, &text).await?;
        info!(sender = %call.sender, words = ?removed, "Words unbanned");
        Ok(())
    }
}

#[async_trait]
impl Handler for WordsBlacklistPlugin {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        let Some(word) = self.first_match(&message.content) else {
            return Ok(true);
        };

        let bot = self.ctx.bot();
        let channel = &message.channel.name;
        let nick = &message.sender.nick;
        if bot.is_user_op(channel, nick).await {
            return Ok(true);
        }

        if bot.am_i_channel_operator(channel).await {
            bot.kick(channel, nick, KICK_REASON).await?;
            info!("{} kicked [{}]", nick, word);
        } else {
            warn!("{} cannot be kicked [{}], operator privileges needed", nick, word);
        }
        Ok(true)
    }
}

#[async_trait]
impl Plugin for WordsBlacklistPlugin {
    fn name(&self) -> &'static str {
        "words_blacklist"
    }

    fn register(self: Arc<Self>, registry: &mut CommandRegistry) -> Result<()> {
        registry.register(
            CommandSpec::new("ban_word")
                .doc("ban_word <word>...: ban <word> words. when one of them appears on chat, bot will kick its sender")
                .admin(),
            command_fn(self.clone(), |p, call| Box::pin(async move { p.ban_word(call).await })),
        )?;
        registry.register(
            CommandSpec::new("unban_word")
                .doc("unban_word <word>...: unban <word> words")
                .admin(),
            command_fn(self, |p, call| Box::pin(async move { p.unban_word(call).await })),
        )
    }

    fn message_handler(self: Arc<Self>) -> Option<Arc<dyn Handler>> {
        Some(self)
    }

    async fn unload(&self) {
        self.blacklist
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}
