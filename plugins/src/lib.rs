//! # Plugins for chanbot
//!
//! Channel features built on the handler-chain command framework: saved entries (`get`), log
//! forwarding to private messages (`plh`), Wolfram|Alpha answers (`wa`) and a banned words filter.
//! Also provides the message [`LoggingHandler`].

mod crypto_warner;
mod entry;
mod log_forward;
mod logging;
mod wolfram;
mod words_blacklist;

pub use crypto_warner::{CryptoWarner, REFRESH_INTERVAL};
pub use entry::{EntryConfig, EntryPlugin};
pub use log_forward::LogForwardPlugin;
pub use logging::LoggingHandler;
pub use wolfram::{WolframConfig, WolframPlugin};
pub use words_blacklist::{WordsBlacklistPlugin, KICK_REASON};
