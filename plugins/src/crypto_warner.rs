//! Warns when a Wolfram|Alpha ask looks like a cryptocurrency conversion.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chanbot_core::style::orange;
use chanbot_core::{KnownCurrencies, Result};
use handler_chain::BotContext;
use regex::Regex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use wolfram_client::WaClient;

/// How often the known currency list is downloaded again.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(60 * 60);

const CONVERSION_PATTERN: &str = r"^([0-9]*\.?[0-9]*)\W*([A-Za-z]+)\W+(to|in)\W+([A-Za-z]+)$";

pub struct CryptoWarner {
    ctx: Arc<BotContext>,
    known: KnownCurrencies,
    conversion: Regex,
    refresh: Mutex<Option<JoinHandle<()>>>,
}

impl CryptoWarner {
    pub fn new(ctx: Arc<BotContext>) -> Self {
        Self {
            ctx,
            known: KnownCurrencies::new(),
            conversion: Regex::new(CONVERSION_PATTERN).expect("conversion pattern is valid"),
            refresh: Mutex::new(None),
        }
    }

    pub fn known(&self) -> &KnownCurrencies {
        &self.known
    }

    /// Downloads the currency list now and then every [`REFRESH_INTERVAL`] until [`stop`](Self::stop).
    pub fn start_refresh(self: &Arc<Self>, client: WaClient, url: String) {
        let warner = Arc::downgrade(self);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(REFRESH_INTERVAL);
            loop {
                ticker.tick().await;
                let Some(warner) = warner.upgrade() else {
                    break;
                };
                debug!("Updating known cryptocurrencies");
                match client.fetch_known_currencies(&url).await {
                    Ok(currencies) => warner.known.replace(currencies),
                    Err(e) => warn!(error = %e, "Failed to update known cryptocurrencies"),
                }
            }
        });

        let previous = self
            .refresh
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .replace(task);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    pub fn stop(&self) {
        let task = self
            .refresh
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(task) = task {
            task.abort();
        }
    }

    /// `from` and `to` currency names of a conversion ask like `1.5 btc to eur`.
    pub fn conversion_aliases<'a>(&self, ask: &'a str) -> Option<(&'a str, &'a str)> {
        let caps = self.conversion.captures(ask)?;
        Some((caps.get(2)?.as_str(), caps.get(4)?.as_str()))
    }

    /// Says a warning on `channel` if `ask` mentions a known cryptocurrency. Returns whether it did.
    pub async fn check(&self, channel: &str, ask: &str) -> Result<bool> {
        let ask = ask.trim();
        let mut aliases = vec![ask];
        if let Some((from, to)) = self.conversion_aliases(ask) {
            aliases.extend([from, to]);
        }
        aliases.retain(|a| !a.is_empty());

        if !self.known.is_any_known(&aliases) {
            return Ok(false);
        }

        let mut suffix = String::new();
        if self.ctx.has_command("crypto") {
            let fixed = format!("crypto {ask}");
            suffix = format!(", you may try {}{}", self.ctx.command_prefix(), fixed);
            self.ctx.register_fixed_command(&fixed).await;
        }

        let text = format!(
            "{}Wolfram-Alpha seems not to handle cryptocurrencies properly{}",
            orange("[WARNING] "),
            suffix
        );
        self.ctx.say(channel, &text).await?;
        Ok(true)
    }
}

impl Drop for CryptoWarner {
    fn drop(&mut self) {
        self.stop();
    }
}
