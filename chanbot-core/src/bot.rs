//! Bot abstraction for talking to a channel.
//!
//! [`Bot`] is transport-agnostic. Connections (IRC, console, test mocks) implement it; plugins only
//! ever see this trait.

use crate::error::Result;
use async_trait::async_trait;

/// Abstraction over the chat transport.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Says `text` on the given channel.
    async fn say(&self, channel: &str, text: &str) -> Result<()>;
    /// Sends a private message to `target`.
    async fn send_private(&self, target: &str, text: &str) -> Result<()>;
    /// Kicks `nick` from `channel` with `reason`. Requires operator privileges.
    async fn kick(&self, channel: &str, nick: &str, reason: &str) -> Result<()>;
    /// Whether `nick` is a channel operator on `channel`.
    async fn is_user_op(&self, channel: &str, nick: &str) -> bool;
    /// Whether the bot itself is a channel operator on `channel`.
    async fn am_i_channel_operator(&self, channel: &str) -> bool {
        let me = self.nickname();
        self.is_user_op(channel, &me).await
    }
    /// Current nickname of the bot.
    fn nickname(&self) -> String;
    /// Whether the transport is connected and can deliver messages.
    fn is_connected(&self) -> bool;
    /// Hard length limit of one outgoing message, in bytes.
    fn max_message_length(&self) -> usize;
    /// Length predicate against the transport's hard limit.
    fn is_message_too_long(&self, text: &str) -> bool {
        text.len() > self.max_message_length()
    }
}
