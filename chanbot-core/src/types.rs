//! Core types: user, channel, message, handler response, and Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Chat participant identity. Nick is the only identity a channel transport exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub nick: String,
}

/// Channel the message was said on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
}

/// A single public message received on a channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender: User,
    pub channel: Channel,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Builds an incoming message with a fresh id and the current time.
    pub fn new(sender: &str, channel: &str, content: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sender: User {
                nick: sender.to_string(),
            },
            channel: Channel {
                name: channel.to_string(),
            },
            content: content.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Handler result for the chain. Replies go out through the [`crate::Bot`] directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the handle phase; `after()` still runs.
    Stop,
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle until Stop → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the message. Return Stop to end the handle phase. Default: Continue.
    async fn handle(&self, _message: &Message) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}
