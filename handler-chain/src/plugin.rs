//! Plugin lifecycle: explicit registration at load, explicit teardown at unload.

use std::sync::Arc;

use async_trait::async_trait;
use chanbot_core::{Handler, Result};
use tracing::info;

use crate::context::BotContext;
use crate::dispatcher::CommandDispatcher;
use crate::registry::CommandRegistry;
use crate::HandlerChain;

/// A bot feature: a set of commands and optionally a filter on public messages.
#[async_trait]
pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;

    /// Adds this plugin's commands to the registry.
    fn register(self: Arc<Self>, registry: &mut CommandRegistry) -> Result<()>;

    /// Handler run on every public message, before command dispatch.
    fn message_handler(self: Arc<Self>) -> Option<Arc<dyn Handler>> {
        None
    }

    /// Stops background tasks and releases plugin state.
    async fn unload(&self) {}
}

/// Owns the loaded plugins and the registry they fill.
pub struct PluginHost {
    ctx: Arc<BotContext>,
    plugins: Vec<Arc<dyn Plugin>>,
    registry: CommandRegistry,
}

impl PluginHost {
    pub fn new(ctx: Arc<BotContext>) -> Self {
        Self {
            ctx,
            plugins: Vec::new(),
            registry: CommandRegistry::new(),
        }
    }

    pub fn context(&self) -> &Arc<BotContext> {
        &self.ctx
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Registers the plugin's commands. A name clash fails the load and leaves no command of
    /// this plugin registered.
    pub fn load(&mut self, plugin: Arc<dyn Plugin>) -> Result<()> {
        let mut staged = self.registry.clone();
        plugin.clone().register(&mut staged)?;
        self.registry = staged;
        self.ctx.set_command_names(self.registry.names());
        info!(plugin = plugin.name(), commands = self.registry.len(), "Plugin loaded");
        self.plugins.push(plugin);
        Ok(())
    }

    /// Appends the message filters in load order, then the command dispatcher, to `chain`.
    pub fn build_chain(&self, mut chain: HandlerChain) -> HandlerChain {
        for plugin in &self.plugins {
            if let Some(handler) = plugin.clone().message_handler() {
                chain = chain.add_handler(handler);
            }
        }
        chain.add_handler(Arc::new(CommandDispatcher::new(
            self.ctx.clone(),
            Arc::new(self.registry.clone()),
        )))
    }

    /// Unloads every plugin, last loaded first.
    pub async fn unload_all(&mut self) {
        for plugin in self.plugins.iter().rev() {
            plugin.unload().await;
            info!(plugin = plugin.name(), "Plugin unloaded");
        }
        self.plugins.clear();
        self.registry = CommandRegistry::new();
        self.ctx.set_command_names(Vec::new());
    }
}
