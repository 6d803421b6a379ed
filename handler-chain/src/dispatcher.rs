//! Routes `<prefix><name> <args>` messages to registered commands.

use std::sync::Arc;

use async_trait::async_trait;
use chanbot_core::{Handler, HandlerResponse, Message, Result};
use tracing::{debug, error, info, instrument, warn};

use crate::context::BotContext;
use crate::registry::{CommandCall, CommandRegistry, RegisteredCommand};

/// Command routing handler. Unknown names pass through untouched.
pub struct CommandDispatcher {
    ctx: Arc<BotContext>,
    registry: Arc<CommandRegistry>,
}

impl CommandDispatcher {
    pub fn new(ctx: Arc<BotContext>, registry: Arc<CommandRegistry>) -> Self {
        Self { ctx, registry }
    }

    async fn help(&self, call: &CommandCall) -> Result<()> {
        let reply = match call.args.first() {
            None => {
                let mut names = self.registry.names();
                names.extend(["fix".to_string(), "help".to_string()]);
                names.sort();
                format!("available commands: {}", names.join(", "))
            }
            Some(name) => match self.registry.get(name) {
                Some(cmd) if !cmd.spec.doc.is_empty() => {
                    format!("{}{}", self.ctx.command_prefix(), cmd.spec.doc)
                }
                Some(_) => format!("{name}: no help available"),
                None if name == "help" => "help [command]".to_string(),
                None if name == "fix" => "fix: runs the last suggested command".to_string(),
                None => "no such command".to_string(),
            },
        };
        self.ctx.say(&call.channel, &reply).await
    }

    async fn fix(&self, call: &CommandCall) -> Result<HandlerResponse> {
        let Some(line) = self.ctx.take_fixed_command().await else {
            debug!(sender = %call.sender, "fix: nothing to fix");
            return Ok(HandlerResponse::Stop);
        };
        let Some(fixed) = CommandCall::from_line(&line, &call.sender, &call.channel) else {
            return Ok(HandlerResponse::Stop);
        };
        match self.registry.get(&fixed.name) {
            Some(cmd) => {
                info!(sender = %call.sender, command = %line, "Running fixed command");
                self.run(cmd, fixed).await
            }
            None => Ok(HandlerResponse::Stop),
        }
    }

    async fn run(&self, cmd: &RegisteredCommand, call: CommandCall) -> Result<HandlerResponse> {
        if cmd.spec.admin_only && !self.ctx.is_admin(&call.sender) {
            warn!(
                sender = %call.sender,
                command = %call.name,
                "Refusing admin command from non-admin"
            );
            return Ok(HandlerResponse::Stop);
        }

        let channel = call.channel.clone();
        let name = call.name.clone();
        if let Err(e) = cmd.handler.call(call).await {
            error!(command = %name, channel = %channel, error = %e, "Command failed");
            self.ctx.say_err(&channel).await?;
        }
        Ok(HandlerResponse::Stop)
    }
}

#[async_trait]
impl Handler for CommandDispatcher {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(call) = CommandCall::parse(self.ctx.command_prefix(), message) else {
            return Ok(HandlerResponse::Continue);
        };

        let name = call.name.clone();
        match name.as_str() {
            "help" => {
                self.help(&call).await?;
                Ok(HandlerResponse::Stop)
            }
            "fix" => self.fix(&call).await,
            name => match self.registry.get(name) {
                Some(cmd) => {
                    debug!(sender = %call.sender, command = %name, "Dispatching command");
                    self.run(cmd, call).await
                }
                None => Ok(HandlerResponse::Continue),
            },
        }
    }
}
