//! Console transport: stdin lines are channel messages, channel output goes to stdout.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chanbot_core::style::strip_colors;
use chanbot_core::{Bot, Message, Result};
use handler_chain::HandlerChain;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::{error, info};

/// [`Bot`] printing to a writer (stdout by default). The bot itself and the configured admins are
/// treated as channel operators.
pub struct ConsoleBot {
    nick: String,
    max_message_length: usize,
    ops: HashSet<String>,
    out: Mutex<Box<dyn AsyncWrite + Send + Unpin>>,
}

impl ConsoleBot {
    pub fn new(nick: &str, max_message_length: usize, ops: impl IntoIterator<Item = String>) -> Self {
        Self::with_writer(nick, max_message_length, ops, Box::new(tokio::io::stdout()))
    }

    pub fn with_writer(
        nick: &str,
        max_message_length: usize,
        ops: impl IntoIterator<Item = String>,
        out: Box<dyn AsyncWrite + Send + Unpin>,
    ) -> Self {
        let mut ops: HashSet<String> = ops.into_iter().collect();
        ops.insert(nick.to_string());
        Self {
            nick: nick.to_string(),
            max_message_length,
            ops,
            out: Mutex::new(out),
        }
    }

    async fn print(&self, line: &str) -> Result<()> {
        let mut out = self.out.lock().await;
        out.write_all(strip_colors(line).as_bytes()).await?;
        out.write_all(b"\n").await?;
        out.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl Bot for ConsoleBot {
    async fn say(&self, channel: &str, text: &str) -> Result<()> {
        self.print(&format!("[{channel}] <{}> {text}", self.nick)).await
    }

    async fn send_private(&self, target: &str, text: &str) -> Result<()> {
        self.print(&format!("-> *{target}* {text}")).await
    }

    async fn kick(&self, channel: &str, nick: &str, reason: &str) -> Result<()> {
        self.print(&format!("* {nick} was kicked from {channel} by {} ({reason})", self.nick))
            .await
    }

    async fn is_user_op(&self, _channel: &str, nick: &str) -> bool {
        self.ops.contains(nick)
    }

    fn nickname(&self) -> String {
        self.nick.clone()
    }

    fn is_connected(&self) -> bool {
        true
    }

    fn max_message_length(&self) -> usize {
        self.max_message_length
    }
}

/// Splits a console line into `(sender, text)`. `<alice> hi` speaks as alice; anything else
/// speaks as `default_sender`. Blank lines yield `None`.
pub fn parse_console_line<'a>(line: &'a str, default_sender: &'a str) -> Option<(&'a str, &'a str)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if let Some(rest) = line.strip_prefix('<') {
        if let Some((nick, text)) = rest.split_once('>') {
            let nick = nick.trim();
            let text = text.trim();
            if !nick.is_empty() && !nick.contains(char::is_whitespace) {
                return (!text.is_empty()).then_some((nick, text));
            }
        }
    }
    Some((default_sender, line))
}

/// Feeds every input line through the chain, in order, until EOF.
pub async fn run_console<R>(
    chain: Arc<HandlerChain>,
    channel: &str,
    default_sender: &str,
    input: R,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let Some((sender, text)) = parse_console_line(&line, default_sender) else {
            continue;
        };
        let message = Message::new(sender, channel, text);
        if let Err(e) = chain.handle(&message).await {
            error!(error = %e, sender = %sender, "Handler chain failed");
        }
    }
    info!("Console input closed");
    Ok(())
}
