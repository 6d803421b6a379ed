//! `get` plugin: saved channel answers keyed by a short entry name.

use std::sync::Arc;

use chanbot_core::style::cyan;
use chanbot_core::{BotError, Result};
use handler_chain::{command_fn, BotContext, CommandCall, CommandRegistry, CommandSpec, Plugin};
use storage::{normalize_entry, parse_set_args, EntryStore, EntryStoreConfig, StorageError};
use tracing::{info, instrument};

/// Settings of the `get` plugin.
#[derive(Debug, Clone)]
pub struct EntryConfig {
    pub store: EntryStoreConfig,
    /// Offer a did-you-mean suggestion on a miss.
    pub try_autocorrect: bool,
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            store: EntryStoreConfig::default(),
            try_autocorrect: true,
        }
    }
}

fn storage_error(e: StorageError) -> BotError {
    BotError::Storage(e.to_string())
}

pub struct EntryPlugin {
    ctx: Arc<BotContext>,
    store: EntryStore,
    try_autocorrect: bool,
}

impl EntryPlugin {
    pub fn new(ctx: Arc<BotContext>, store: EntryStore, try_autocorrect: bool) -> Self {
        Self {
            ctx,
            store,
            try_autocorrect,
        }
    }

    /// Opens the configured store and builds the plugin.
    pub async fn open(ctx: Arc<BotContext>, config: &EntryConfig) -> Result<Self> {
        let store = EntryStore::open(&config.store).await.map_err(storage_error)?;
        Ok(Self::new(ctx, store, config.try_autocorrect))
    }

    #[instrument(skip(self, call), fields(sender = %call.sender))]
    async fn get(&self, call: CommandCall) -> Result<()> {
        let Some(entry) = normalize_entry(&call.raw_args) else {
            return Ok(());
        };

        let value = self.store.get(entry).await.map_err(storage_error)?;
        info!(entry = %entry, found = value.is_some(), "Entry requested");

        if let Some(value) = value {
            let text = format!("{}{}", cyan(&format!("[{entry}] ")), value);
            return self.ctx.say(&call.channel, &text).await;
        }

        let suggestion = if self.try_autocorrect {
            self.store
                .suggest_closest(entry)
                .await
                .map_err(storage_error)?
        } else {
            None
        };

        match suggestion {
            Some(candidate) => {
                self.ctx
                    .register_fixed_command(&format!("get {candidate}"))
                    .await;
                let text = format!("no such entry, did you mean {candidate}?");
                self.ctx.say(&call.channel, &text).await
            }
            None => self.ctx.say(&call.channel, "no such entry").await,
        }
    }

    async fn get_list(&self, call: CommandCall) -> Result<()> {
        info!(sender = %call.sender, "Entry list requested");
        let keys = self.store.list().await.map_err(storage_error)?;
        let text = if keys.is_empty() {
            "no saved entries".to_string()
        } else {
            format!("saved entries: {}", keys.join(", "))
        };
        self.ctx.say(&call.channel, &text).await
    }

    async fn set(&self, call: CommandCall) -> Result<()> {
        let Some((entry, value)) = parse_set_args(&call.raw_args) else {
            return Ok(());
        };

        match self.store.set(entry, value).await {
            Ok(()) => {
                info!(sender = %call.sender, entry = %entry, value = %value, "Entry set");
                self.ctx.say_ok(&call.channel).await
            }
            Err(e @ StorageError::DuplicateKey(_)) => {
                self.ctx.say(&call.channel, &e.to_string()).await
            }
            Err(e) => Err(storage_error(e)),
        }
    }

    async fn unset(&self, call: CommandCall) -> Result<()> {
        let Some(entry) = normalize_entry(&call.raw_args) else {
            return Ok(());
        };

        self.store.unset(entry).await.map_err(storage_error)?;
        self.ctx.say_ok(&call.channel).await?;
        info!(sender = %call.sender, entry = %entry, "Entry removed");
        Ok(())
    }
}

impl Plugin for EntryPlugin {
    fn name(&self) -> &'static str {
        "get"
    }

    fn register(self: Arc<Self>, registry: &mut CommandRegistry) -> Result<()> {
        registry.register(
            CommandSpec::new("get").doc("get <entry>: get saved message for <entry>"),
            command_fn(self.clone(), |p, call| Box::pin(async move { p.get(call).await })),
        )?;
        registry.register(
            CommandSpec::new("get_list").doc("get_list: get all saved entries"),
            command_fn(self.clone(), |p, call| Box::pin(async move { p.get_list(call).await })),
        )?;
        registry.register(
            CommandSpec::new("get_all").doc("get_all: get all saved entries"),
            command_fn(self.clone(), |p, call| Box::pin(async move { p.get_list(call).await })),
        )?;
        registry.register(
            CommandSpec::new("set")
                .doc("set <entry> <message>: save <message> for <entry>")
                .admin(),
            command_fn(self.clone(), |p, call| Box::pin(async move { p.set(call).await })),
        )?;
        registry.register(
            CommandSpec::new("unset").doc("unset <entry>: remove <entry> entry").admin(),
            command_fn(self, |p, call| Box::pin(async move { p.unset(call).await })),
        )
    }
}
