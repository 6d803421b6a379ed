//! `plh` plugin: lets admins subscribe to the bot's own log via private messages.

use std::sync::{Arc, Mutex};

use chanbot_core::{deliver, level_name, parse_level, ForwardedLine, LogRecipients, Result};
use handler_chain::{command_fn, BotContext, CommandCall, CommandRegistry, CommandSpec, Plugin};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub struct LogForwardPlugin {
    ctx: Arc<BotContext>,
    recipients: LogRecipients,
    delivery: Mutex<Option<JoinHandle<()>>>,
}

impl LogForwardPlugin {
    /// Starts the delivery task draining `lines`. `recipients` must be the map the installed
    /// `ForwardLayer` reads.
    pub fn start(
        ctx: Arc<BotContext>,
        recipients: LogRecipients,
        lines: mpsc::UnboundedReceiver<ForwardedLine>,
    ) -> Self {
        let delivery = tokio::spawn(deliver(ctx.bot().clone(), lines));
        Self {
            ctx,
            recipients,
            delivery: Mutex::new(Some(delivery)),
        }
    }

    async fn add_plh(&self, call: CommandCall) -> Result<()> {
        let Some(level) = call.args.first().and_then(|l| parse_level(l)) else {
            return Ok(());
        };

        warn!("plh added: {} at {}", call.sender, level_name(level));
        self.recipients.insert(&call.sender, level);
        let text = format!("plh added: {} at {}", call.sender, level_name(level));
        self.ctx.say(&call.channel, &text).await
    }

    async fn rm_plh(&self, call: CommandCall) -> Result<()> {
        if !self.recipients.remove(&call.sender) {
            return Ok(());
        }
        info!("plh for {} removed", call.sender);
        self.ctx.say(&call.channel, "plh removed").await
    }

    async fn get_plhs(&self, call: CommandCall) -> Result<()> {
        let listed = self
            .recipients
            .snapshot()
            .into_iter()
            .map(|(nick, level)| format!("{nick}: {}", level_name(level)))
            .collect::<Vec<_>>()
            .join(", ");
        let text = format!("privmsg logger handlers registered: {{{listed}}}");
        self.ctx.say(&call.channel, &text).await?;
        info!(sender = %call.sender, "plhs listed: {{{}}}", listed);
        Ok(())
    }
}

#[async_trait::async_trait]
impl Plugin for LogForwardPlugin {
    fn name(&self) -> &'static str {
        "privmsg_logger_handler"
    }

    fn register(self: Arc<Self>, registry: &mut CommandRegistry) -> Result<()> {
        registry.register(
            CommandSpec::new("add_plh")
                .doc("add_plh <level>: send me the bot log at <level> and above")
                .admin(),
            command_fn(self.clone(), |p, call| Box::pin(async move { p.add_plh(call).await })),
        )?;
        registry.register(
            CommandSpec::new("rm_plh").doc("rm_plh: stop sending me the bot log").admin(),
            command_fn(self.clone(), |p, call| Box::pin(async move { p.rm_plh(call).await })),
        )?;
        registry.register(
            CommandSpec::new("get_plhs").doc("get_plhs: list log subscribers"),
            command_fn(self, |p, call| Box::pin(async move { p.get_plhs(call).await })),
        )
    }

    async fn unload(&self) {
        self.recipients.clear();
        let handle = self
            .delivery
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(handle) = handle {
            handle.abort();
        }
    }
}
