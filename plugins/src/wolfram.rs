//! `wa` plugin: asks Wolfram|Alpha and says the plaintext answer.

use std::sync::Arc;
use std::time::Duration;

use chanbot_core::style::orange;
use chanbot_core::{paginate_with, BotError, Result};
use handler_chain::{command_fn, BotContext, CommandCall, CommandRegistry, CommandSpec, Plugin};
use tracing::{error, info, warn};
use wolfram_client::{
    answer_pods, mask_token, WaClient, WaOutcome, DEFAULT_API_URL, DEFAULT_CRYPTO_LIST_URL,
    QUERY_TIMEOUT,
};

use crate::crypto_warner::CryptoWarner;

/// Settings of the `wa` plugin.
#[derive(Clone)]
pub struct WolframConfig {
    pub api_key: String,
    pub nonmetric_units: bool,
    pub warn_crypto_asks: bool,
    pub api_url: String,
    pub crypto_list_url: String,
    pub query_timeout: Duration,
}

impl WolframConfig {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            nonmetric_units: false,
            warn_crypto_asks: true,
            api_url: DEFAULT_API_URL.to_string(),
            crypto_list_url: DEFAULT_CRYPTO_LIST_URL.to_string(),
            query_timeout: QUERY_TIMEOUT,
        }
    }
}

impl std::fmt::Debug for WolframConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WolframConfig")
            .field("api_key", &mask_token(&self.api_key))
            .field("nonmetric_units", &self.nonmetric_units)
            .field("warn_crypto_asks", &self.warn_crypto_asks)
            .field("api_url", &self.api_url)
            .field("crypto_list_url", &self.crypto_list_url)
            .field("query_timeout", &self.query_timeout)
            .finish()
    }
}

pub struct WolframPlugin {
    ctx: Arc<BotContext>,
    client: WaClient,
    warner: Option<Arc<CryptoWarner>>,
}

impl WolframPlugin {
    /// Builds the client and, when crypto warnings are on, starts the currency list refresh.
    pub fn start(ctx: Arc<BotContext>, config: &WolframConfig) -> Result<Self> {
        let client = WaClient::new(&config.api_key, config.nonmetric_units)
            .map_err(|e| BotError::Http(e.to_string()))?
            .with_api_url(&config.api_url)
            .with_query_timeout(config.query_timeout);

        let warner = config.warn_crypto_asks.then(|| {
            let warner = Arc::new(CryptoWarner::new(ctx.clone()));
            warner.start_refresh(client.clone(), config.crypto_list_url.clone());
            warner
        });

        info!(config = ?config, "Wolfram|Alpha plugin started");
        Ok(Self { ctx, client, warner })
    }

    pub fn crypto_warner(&self) -> Option<&Arc<CryptoWarner>> {
        self.warner.as_ref()
    }

    async fn wa(&self, call: CommandCall) -> Result<()> {
        let ask = call.raw_args.as_str();
        if ask.is_empty() {
            return Ok(());
        }
        info!(sender = %call.sender, ask = %ask, "Wolfram|Alpha asked");

        if let Some(warner) = &self.warner {
            warner.check(&call.channel, ask).await?;
        }

        let pods = match self.client.query(ask).await {
            Ok(WaOutcome::Pods(pods)) => pods,
            Ok(WaOutcome::ApiError(msg)) => {
                warn!(error = %msg, "Wolfram|Alpha error");
                return self.ctx.say(&call.channel, &msg).await;
            }
            Ok(WaOutcome::NoResult) => return self.ctx.say_err(&call.channel).await,
            Err(e) => {
                error!(error = %e, ask = %ask, "Wolfram|Alpha request failed");
                return self.ctx.say_err(&call.channel).await;
            }
        };

        let bot = self.ctx.bot().clone();
        for pod in answer_pods(&pods) {
            let pod_prefix = orange(&format!("[{}] ", pod.title));
            for subpod in &pod.subpods {
                let prefix = if subpod.title.is_empty() {
                    pod_prefix.clone()
                } else {
                    format!("{pod_prefix}{}: ", subpod.title)
                };
                let chunks = paginate_with(&prefix, &subpod.plaintext, |text| {
                    bot.is_message_too_long(text)
                })?;
                for chunk in chunks {
                    self.ctx.say(&call.channel, &chunk).await?;
                }
            }
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Plugin for WolframPlugin {
    fn name(&self) -> &'static str {
        "wolfram_alpha"
    }

    fn register(self: Arc<Self>, registry: &mut CommandRegistry) -> Result<()> {
        registry.register(
            CommandSpec::new("wa").doc("wa <ask>: ask Wolfram|Alpha about <ask>"),
            command_fn(self, |p, call| Box::pin(async move { p.wa(call).await })),
        )
    }

    async fn unload(&self) {
        if let Some(warner) = &self.warner {
            warner.stop();
        }
    }
}
