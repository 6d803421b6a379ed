//! Recording implementation of [`chanbot_core::Bot`] for integration tests.
//!
//! Every `say`, `send_private` and `kick` is appended to an in-memory log so tests can assert on
//! exactly what reached the channel.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chanbot_core::{Bot, Result};

/// One recorded transport call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(dead_code)] // not every test binary inspects every variant
pub enum Sent {
    Say { channel: String, text: String },
    Private { target: String, text: String },
    Kick { channel: String, nick: String, reason: String },
}

/// Mock Bot with a configurable set of channel operators.
pub struct MockBot {
    nick: String,
    max_length: usize,
    ops: Mutex<HashSet<String>>,
    sent: Mutex<Vec<Sent>>,
}

#[allow(dead_code)]
impl MockBot {
    pub fn new(nick: &str) -> Self {
        Self {
            nick: nick.to_string(),
            max_length: 400,
            ops: Mutex::new(HashSet::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Marks `nick` as a channel operator (on every channel).
    pub fn set_op(&self, nick: &str) {
        self.ops.lock().unwrap().insert(nick.to_string());
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Texts said on any channel, in order.
    pub fn said(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Say { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn say(&self, channel: &str, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(Sent::Say {
            channel: channel.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_private(&self, target: &str, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(Sent::Private {
            target: target.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn kick(&self, channel: &str, nick: &str, reason: &str) -> Result<()> {
        self.sent.lock().unwrap().push(Sent::Kick {
            channel: channel.to_string(),
            nick: nick.to_string(),
            reason: reason.to_string(),
        });
        Ok(())
    }

    async fn is_user_op(&self, _channel: &str, nick: &str) -> bool {
        self.ops.lock().unwrap().contains(nick)
    }

    fn nickname(&self) -> String {
        self.nick.clone()
    }

    fn is_connected(&self) -> bool {
        true
    }

    fn max_message_length(&self) -> usize {
        self.max_length
    }
}
