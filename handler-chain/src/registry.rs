//! Explicit command registry: command name → typed handler.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chanbot_core::{HandlerError, Message, Result};
use futures::future::BoxFuture;

/// Names handled by the dispatcher itself.
pub const RESERVED_COMMANDS: [&str; 2] = ["help", "fix"];

/// Static description of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: String,
    pub doc: String,
    pub admin_only: bool,
}

impl CommandSpec {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            doc: String::new(),
            admin_only: false,
        }
    }

    /// One-line usage text shown by `help <command>`.
    pub fn doc(mut self, doc: &str) -> Self {
        self.doc = doc.to_string();
        self
    }

    /// Restricts the command to bot admins.
    pub fn admin(mut self) -> Self {
        self.admin_only = true;
        self
    }
}

/// One parsed command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCall {
    pub name: String,
    pub sender: String,
    pub channel: String,
    /// Everything after the command name, trimmed.
    pub raw_args: String,
    /// `raw_args` split on whitespace.
    pub args: Vec<String>,
}

impl CommandCall {
    /// Parses `<prefix><name> <args>` from a channel message. `None` if it is not a command.
    pub fn parse(prefix: &str, message: &Message) -> Option<Self> {
        let line = message.content.trim_start().strip_prefix(prefix)?;
        Self::from_line(line, &message.sender.nick, &message.channel.name)
    }

    /// Parses a prefix-less command line, e.g. `get faq`.
    pub fn from_line(line: &str, sender: &str, channel: &str) -> Option<Self> {
        let line = line.trim_start();
        let name = line.split_whitespace().next()?;
        let raw_args = line[name.len()..].trim().to_string();
        let args = raw_args.split_whitespace().map(str::to_string).collect();
        Some(Self {
            name: name.to_string(),
            sender: sender.to_string(),
            channel: channel.to_string(),
            raw_args,
            args,
        })
    }
}

/// Handler of one registered command.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn call(&self, call: CommandCall) -> Result<()>;
}

struct FnCommand<P, F> {
    target: Arc<P>,
    f: F,
}

#[async_trait]
impl<P, F> CommandHandler for FnCommand<P, F>
where
    P: Send + Sync + 'static,
    F: Fn(Arc<P>, CommandCall) -> BoxFuture<'static, Result<()>> + Send + Sync,
{
    async fn call(&self, call: CommandCall) -> Result<()> {
        (self.f)(self.target.clone(), call).await
    }
}

/// Adapts a plugin method into a [`CommandHandler`]:
/// `command_fn(plugin, |p, call| Box::pin(async move { p.get(call).await }))`.
pub fn command_fn<P, F>(target: Arc<P>, f: F) -> Arc<dyn CommandHandler>
where
    P: Send + Sync + 'static,
    F: Fn(Arc<P>, CommandCall) -> BoxFuture<'static, Result<()>> + Send + Sync + 'static,
{
    Arc::new(FnCommand { target, f })
}

/// A command and its handler.
#[derive(Clone)]
pub struct RegisteredCommand {
    pub spec: CommandSpec,
    pub handler: Arc<dyn CommandHandler>,
}

/// Map of command name → handler, filled at startup by `Plugin::register`.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, RegisteredCommand>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command. Names must be unique and not reserved.
    pub fn register(&mut self, spec: CommandSpec, handler: Arc<dyn CommandHandler>) -> Result<()> {
        if spec.name.is_empty()
            || spec.name.chars().any(char::is_whitespace)
            || RESERVED_COMMANDS.contains(&spec.name.as_str())
        {
            return Err(HandlerError::InvalidCommand(spec.name).into());
        }
        if self.commands.contains_key(&spec.name) {
            return Err(HandlerError::DuplicateCommand(spec.name).into());
        }
        self.commands
            .insert(spec.name.clone(), RegisteredCommand { spec, handler });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredCommand> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered names, ascending.
    pub fn names(&self) -> Vec<String> {
        self.commands.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
