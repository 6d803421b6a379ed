//! Storage crate: persistent entry store with fuzzy lookup.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`entry_store`] – EntryStore (SQLite), key parsing helpers
//! - [`fuzzy`] – token-sort similarity used for suggestions
//! - [`sqlite_pool`] – SqlitePoolManager

mod entry_store;
mod error;
pub mod fuzzy;
mod sqlite_pool;


pub use entry_store::{
    is_valid_table_name, normalize_entry, parse_set_args, EntryStore, EntryStoreConfig,
    SUGGESTION_THRESHOLD,
};
pub use error::StorageError;
pub use sqlite_pool::{SqlitePoolManager, IN_MEMORY};
