//! Error types for the bot core.
//!
//! [`BotError`] is the top-level error; [`HandlerError`] is used for handler and dispatch failures.

use thiserror::Error;

use crate::pagination::PaginationError;

/// Top-level error for chanbot (storage, handler, HTTP, pagination, IO).
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Pagination error: {0}")]
    Pagination(#[from] PaginationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced by handlers and the command registry.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Command already registered: {0}")]
    DuplicateCommand(String),
}

/// Result type for core operations; uses [`BotError`].
pub type Result<T> = std::result::Result<T, BotError>;
