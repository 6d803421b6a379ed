//! # chanbot-core
//!
//! Core types and traits for the channel bot: [`Bot`], [`Handler`], message and user types,
//! tracing initialization with log forwarding, the response paginator and case-folding matcher.
//! Transport-agnostic; used by handler-chain, plugins and the chanbot binary.

pub mod bot;
pub mod casefold;
pub mod error;
pub mod forward;
pub mod logger;
pub mod pagination;
pub mod style;
pub mod types;

pub use bot::Bot;
pub use casefold::{any_alias_known, fold, CurrencyId, KnownCurrencies};
pub use error::{BotError, HandlerError, Result};
pub use forward::{deliver, level_name, parse_level, ForwardLayer, ForwardedLine, LogRecipients};
pub use logger::init_tracing;
pub use pagination::{paginate, paginate_with, PaginationError, JOIN_TOKEN};
pub use types::{Channel, Handler, HandlerResponse, Message, User};
