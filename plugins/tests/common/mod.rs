pub mod mock_bot;

use std::sync::Arc;

use chanbot_core::{HandlerResponse, Message};
use handler_chain::{BotContext, HandlerChain, Plugin, PluginHost};
use mock_bot::MockBot;

pub const ADMIN: &str = "root";
pub const CHANNEL: &str = "#chanbot";

/// A bot with some plugins loaded, driven through the full handler chain.
#[allow(dead_code)]
pub struct Harness {
    pub bot: Arc<MockBot>,
    pub ctx: Arc<BotContext>,
    pub host: PluginHost,
    pub chain: HandlerChain,
}

#[allow(dead_code)]
impl Harness {
    pub fn context(bot: &Arc<MockBot>) -> Arc<BotContext> {
        Arc::new(BotContext::new(bot.clone(), "!", vec![ADMIN.to_string()]))
    }

    pub fn new(bot: Arc<MockBot>, ctx: Arc<BotContext>, plugins: Vec<Arc<dyn Plugin>>) -> Self {
        let mut host = PluginHost::new(ctx.clone());
        for plugin in plugins {
            host.load(plugin).unwrap();
        }
        let chain = host.build_chain(HandlerChain::new());
        Self { bot, ctx, host, chain }
    }

    pub async fn send(&self, sender: &str, content: &str) -> HandlerResponse {
        self.chain
            .handle(&Message::new(sender, CHANNEL, content))
            .await
            .unwrap()
    }
}
