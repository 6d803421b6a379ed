use std::sync::Arc;

use anyhow::{Context, Result};
use chanbot_core::{init_tracing, Bot, ForwardLayer, ForwardedLine, LogRecipients};
use handler_chain::{BotContext, HandlerChain, PluginHost};
use plugins::{EntryPlugin, LogForwardPlugin, LoggingHandler, WolframPlugin, WordsBlacklistPlugin};
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::{info, instrument};

use crate::config::BotConfig;
use crate::console::{run_console, ConsoleBot};

/// Loaded plugins plus the chain that drives them.
pub struct ChanBot {
    pub host: PluginHost,
    pub chain: Arc<HandlerChain>,
}

impl ChanBot {
    /// Loads every configured plugin against `bot` and builds the handler chain:
    /// logging, then plugin message filters, then command dispatch.
    #[instrument(skip_all)]
    pub async fn build(
        config: &BotConfig,
        bot: Arc<dyn Bot>,
        recipients: LogRecipients,
        forwarded: mpsc::UnboundedReceiver<ForwardedLine>,
    ) -> Result<Self> {
        let base = config.base();
        let ctx = Arc::new(BotContext::new(
            bot,
            &base.command_prefix,
            base.admins.iter().cloned(),
        ));
        let mut host = PluginHost::new(ctx.clone());

        let entry = EntryPlugin::open(ctx.clone(), &config.plugins().entry)
            .await
            .context("Failed to open entry store")?;
        host.load(Arc::new(entry))?;
        host.load(Arc::new(LogForwardPlugin::start(ctx.clone(), recipients, forwarded)))?;
        host.load(Arc::new(WordsBlacklistPlugin::new(ctx.clone())))?;

        match &config.plugins().wolfram {
            Some(wolfram) => host.load(Arc::new(WolframPlugin::start(ctx.clone(), wolfram)?))?,
            None => info!("WOLFRAM_API_KEY not set, Wolfram|Alpha plugin disabled"),
        }

        let chain = host.build_chain(HandlerChain::new().add_handler(Arc::new(LoggingHandler)));
        info!(commands = host.registry().len(), "Plugins loaded");

        Ok(Self {
            host,
            chain: Arc::new(chain),
        })
    }

    /// Unloads every plugin.
    pub async fn shutdown(mut self) {
        self.host.unload_all().await;
    }
}

/// Main entry: validate config, init logging with log forwarding, load plugins, then read the
/// console until EOF or Ctrl-C.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;

    let recipients = LogRecipients::new();
    let (forward_layer, forwarded) = ForwardLayer::new(recipients.clone());
    init_tracing(config.log_file(), Some(forward_layer))?;

    let base = config.base();
    info!(
        nick = %base.nick,
        channel = %base.channel,
        db_location = %config.plugins().entry.store.db_location,
        "Initializing bot"
    );

    let bot = Arc::new(ConsoleBot::new(
        &base.nick,
        base.max_message_length,
        base.admins.iter().cloned(),
    ));
    let chanbot = ChanBot::build(&config, bot, recipients, forwarded).await?;

    info!("Bot started successfully");

    let console_user = base.admins.first().map(String::as_str).unwrap_or("console");
    let stdin = BufReader::new(tokio::io::stdin());
    tokio::select! {
        result = run_console(chanbot.chain.clone(), &base.channel, console_user, stdin) => result?,
        _ = tokio::signal::ctrl_c() => info!("Interrupted"),
    }

    chanbot.shutdown().await;
    info!("Bot stopped");
    Ok(())
}
