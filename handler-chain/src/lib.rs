//! # Handler chain
//!
//! Runs a sequence of handlers for each channel message. Each handler has optional
//! before/handle/after: all before run in order (any false stops the chain); then handle runs
//! until Stop; then all after run in reverse.
//!
//! Commands are not discovered; plugins register them explicitly in a [`CommandRegistry`] and the
//! [`CommandDispatcher`] handler routes `<prefix><name> <args>` messages to them.

mod context;
mod dispatcher;
mod plugin;
mod registry;

pub use context::BotContext;
pub use dispatcher::CommandDispatcher;
pub use plugin::{Plugin, PluginHost};
pub use registry::{
    command_fn, CommandCall, CommandHandler, CommandRegistry, CommandSpec, RegisteredCommand,
    RESERVED_COMMANDS,
};

use chanbot_core::{Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Chain of handlers: before (all) → handle (until Stop) → after (reverse).
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a handler.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Runs all before → handle until Stop → all after in reverse.
    #[instrument(skip(self, message))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let mut final_response = HandlerResponse::Continue;

        debug!(
            sender = %message.sender.nick,
            channel = %message.channel.name,
            message_id = %message.id,
            "step: handler_chain started"
        );

        for h in &self.handlers {
            let name = std::any::type_name_of_val(h.as_ref());
            let should_continue = h.before(message).await?;
            if !should_continue {
                info!(sender = %message.sender.nick, handler = %name, "step: before returned false, chain stopped");
                return Ok(HandlerResponse::Stop);
            }
        }

        for h in &self.handlers {
            let name = std::any::type_name_of_val(h.as_ref());
            let response = h.handle(message).await?;
            debug!(handler = %name, response = ?response, "Handler processed");

            if response == HandlerResponse::Stop {
                debug!(sender = %message.sender.nick, handler = %name, "step: handler chain stopped by handler");
                final_response = response;
                break;
            }
        }

        for h in self.handlers.iter().rev() {
            h.after(message, &final_response).await?;
        }

        debug!(
            sender = %message.sender.nick,
            channel = %message.channel.name,
            message_id = %message.id,
            "step: handler_chain finished"
        );

        Ok(final_response)
    }
}

// Unit/integration tests live in tests/handler_chain_test.rs and tests/dispatcher_test.rs
