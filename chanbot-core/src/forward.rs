//! Log forwarding: a tracing layer that copies log events to chat recipients as private messages.
//!
//! Each recipient has a minimum level. The layer formats matching events and queues them; a
//! delivery task ([`deliver`]) drains the queue through [`Bot::send_private`]. Events emitted while
//! delivering are never forwarded again.

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::sync::{Arc, RwLock};

use tokio::sync::mpsc;
use tracing::field::{Field, Visit};
use tracing::{warn, Event, Instrument, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

use crate::bot::Bot;

/// Name of the span wrapping every delivery; events inside it are not forwarded.
pub const DELIVERY_SPAN: &str = "log_forward_delivery";

/// Parses a level name as accepted by `add_plh`.
pub fn parse_level(name: &str) -> Option<Level> {
    match name.trim().to_lowercase().as_str() {
        "critical" | "fatal" | "error" => Some(Level::ERROR),
        "warning" | "warn" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "notset" | "all" => Some(Level::TRACE),
        _ => None,
    }
}

/// Display name of a level, the inverse of [`parse_level`].
pub fn level_name(level: Level) -> &'static str {
    match level {
        Level::ERROR => "error",
        Level::WARN => "warning",
        Level::INFO => "info",
        Level::DEBUG => "debug",
        Level::TRACE => "all",
    }
}

/// Shared map of recipient -> minimum level. Cloning shares the map.
#[derive(Debug, Clone, Default)]
pub struct LogRecipients {
    inner: Arc<RwLock<BTreeMap<String, Level>>>,
}

impl LogRecipients {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or updates a recipient.
    pub fn insert(&self, recipient: &str, level: Level) {
        let mut map = self.inner.write().unwrap_or_else(|e| e.into_inner());
        map.insert(recipient.to_string(), level);
    }

    /// Removes a recipient. Returns false if it was not registered.
    pub fn remove(&self, recipient: &str) -> bool {
        let mut map = self.inner.write().unwrap_or_else(|e| e.into_inner());
        map.remove(recipient).is_some()
    }

    pub fn contains(&self, recipient: &str) -> bool {
        let map = self.inner.read().unwrap_or_else(|e| e.into_inner());
        map.contains_key(recipient)
    }

    pub fn clear(&self) {
        let mut map = self.inner.write().unwrap_or_else(|e| e.into_inner());
        map.clear();
    }

    /// Copy of the current map.
    pub fn snapshot(&self) -> BTreeMap<String, Level> {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Recipients whose minimum level admits an event at `level`.
    pub fn recipients_for(&self, level: Level) -> Vec<String> {
        let map = self.inner.read().unwrap_or_else(|e| e.into_inner());
        // tracing orders levels by verbosity: ERROR < WARN < ... < TRACE.
        map.iter()
            .filter(|(_, min)| level <= **min)
            .map(|(name, _)| name.clone())
            .collect()
    }
}

/// One formatted log line addressed to one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardedLine {
    pub recipient: String,
    pub text: String,
}

/// Tracing layer feeding [`ForwardedLine`]s to the delivery queue.
pub struct ForwardLayer {
    recipients: LogRecipients,
    tx: mpsc::UnboundedSender<ForwardedLine>,
}

impl ForwardLayer {
    /// Creates the layer and the receiving end of its queue.
    pub fn new(recipients: LogRecipients) -> (Self, mpsc::UnboundedReceiver<ForwardedLine>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { recipients, tx }, rx)
    }
}

impl<S> Layer<S> for ForwardLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        if let Some(scope) = ctx.event_scope(event) {
            if scope.from_root().any(|span| span.name() == DELIVERY_SPAN) {
                return;
            }
        }

        let meta = event.metadata();
        let targets = self.recipients.recipients_for(*meta.level());
        if targets.is_empty() {
            return;
        }

        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);
        let text = format!(
            "{:<10}{}: {}",
            meta.level().as_str(),
            meta.target(),
            visitor.finish()
        );

        for recipient in targets {
            // The receiver is gone once the plugin is unloaded; nothing left to do then.
            let _ = self.tx.send(ForwardedLine {
                recipient,
                text: text.clone(),
            });
        }
    }
}

#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl LineVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields.trim_start().to_string()
        } else {
            format!("{}{}", self.message, self.fields)
        }
    }
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

/// Drains the queue and sends each line privately while the transport is connected.
pub async fn deliver(bot: Arc<dyn Bot>, mut rx: mpsc::UnboundedReceiver<ForwardedLine>) {
    while let Some(line) = rx.recv().await {
        if !bot.is_connected() {
            continue;
        }
        let span = tracing::info_span!(DELIVERY_SPAN);
        let bot = bot.clone();
        async move {
            if let Err(e) = bot.send_private(&line.recipient, &line.text).await {
                warn!(error = %e, recipient = %line.recipient, "Failed to forward log line");
            }
        }
        .instrument(span)
        .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::Registry;

    #[test]
    fn test_parse_level_names() {
        assert_eq!(parse_level("critical"), Some(Level::ERROR));
        assert_eq!(parse_level("FATAL"), Some(Level::ERROR));
        assert_eq!(parse_level("warn"), Some(Level::WARN));
        assert_eq!(parse_level(" warning "), Some(Level::WARN));
        assert_eq!(parse_level("info"), Some(Level::INFO));
        assert_eq!(parse_level("debug"), Some(Level::DEBUG));
        assert_eq!(parse_level("all"), Some(Level::TRACE));
        assert_eq!(parse_level("notset"), Some(Level::TRACE));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn test_level_name_round_trip() {
        for level in [Level::ERROR, Level::WARN, Level::INFO, Level::DEBUG, Level::TRACE] {
            assert_eq!(parse_level(level_name(level)), Some(level));
        }
    }

    #[test]
    fn test_recipients_for_filters_by_minimum_level() {
        let recipients = LogRecipients::new();
        recipients.insert("alice", Level::WARN);
        recipients.insert("bob", Level::DEBUG);

        assert_eq!(recipients.recipients_for(Level::ERROR), vec!["alice", "bob"]);
        assert_eq!(recipients.recipients_for(Level::INFO), vec!["bob"]);
        assert!(recipients.recipients_for(Level::TRACE).is_empty());

        assert!(recipients.remove("bob"));
        assert!(!recipients.remove("bob"));
        assert!(recipients.recipients_for(Level::INFO).is_empty());
    }

    #[test]
    fn test_layer_forwards_matching_events() {
        let recipients = LogRecipients::new();
        recipients.insert("alice", Level::WARN);
        let (layer, mut rx) = ForwardLayer::new(recipients.clone());
        let subscriber = Registry::default().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("quiet");
            tracing::warn!(entry = "faq", "loud");
        });

        let line = rx.try_recv().unwrap();
        assert_eq!(line.recipient, "alice");
        assert!(line.text.starts_with("WARN"));
        assert!(line.text.ends_with("loud entry=faq"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_layer_skips_delivery_span() {
        let recipients = LogRecipients::new();
        recipients.insert("alice", Level::TRACE);
        let (layer, mut rx) = ForwardLayer::new(recipients);
        let subscriber = Registry::default().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!(DELIVERY_SPAN);
            let _guard = span.enter();
            tracing::error!("send failed");
        });

        assert!(rx.try_recv().is_err());
    }
}
