//! Entry store: persistent `entry -> text` mapping with fuzzy suggestions.
//!
//! Backed by one SQLite table `(entry TEXT PRIMARY KEY NOT NULL, val TEXT)`. Every operation runs
//! under one store-wide mutex, so inserts, deletes and lookups are serialized and a successful
//! `set` is visible to every later `get`/`list`.

use std::path::Path;

use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::error::StorageError;
use crate::fuzzy::best_match;
use crate::sqlite_pool::{SqlitePoolManager, IN_MEMORY};

/// Minimum similarity (exclusive) for a suggestion to be offered.
pub const SUGGESTION_THRESHOLD: u8 = 65;

/// Where and how entries are stored.
#[derive(Debug, Clone)]
pub struct EntryStoreConfig {
    /// SQLite file path, or `:memory:`.
    pub db_location: String,
    /// Table name; must be a plain identifier.
    pub table: String,
    /// When false, keys compare with SQLite `NOCASE` collation.
    pub case_sensitive: bool,
}

impl Default for EntryStoreConfig {
    fn default() -> Self {
        Self {
            db_location: "./data/get.db".to_string(),
            table: "get".to_string(),
            case_sensitive: false,
        }
    }
}

/// Whether `name` can be used as a table name without quoting tricks.
pub fn is_valid_table_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// First whitespace-delimited token of the raw input.
pub fn normalize_entry(raw: &str) -> Option<&str> {
    raw.split_whitespace().next()
}

/// Splits `set` arguments into `(key, value)`: key is the first token, value the trimmed rest.
/// `None` when either part is empty.
pub fn parse_set_args(raw: &str) -> Option<(&str, &str)> {
    let raw = raw.trim_start();
    let key = raw.split_whitespace().next()?;
    let value = raw[key.len()..].trim();
    if value.is_empty() {
        None
    } else {
        Some((key, value))
    }
}

struct Statements {
    create: String,
    select: String,
    insert: String,
    delete: String,
    list: String,
}

impl Statements {
    fn new(table: &str, case_sensitive: bool) -> Self {
        let collate = if case_sensitive { "" } else { " COLLATE NOCASE" };
        Self {
            create: format!(
                "CREATE TABLE IF NOT EXISTS \"{table}\" (entry TEXT PRIMARY KEY NOT NULL{collate}, val TEXT)"
            ),
            select: format!("SELECT val FROM \"{table}\" WHERE entry = ?{collate}"),
            insert: format!("INSERT INTO \"{table}\" (entry, val) VALUES (?, ?)"),
            delete: format!("DELETE FROM \"{table}\" WHERE entry = ?{collate}"),
            list: format!("SELECT entry FROM \"{table}\""),
        }
    }
}

/// Concurrency-safe persistent entry store.
pub struct EntryStore {
    pool_manager: SqlitePoolManager,
    statements: Statements,
    case_sensitive: bool,
    lock: Mutex<()>,
}

impl EntryStore {
    /// Opens (creating if needed) the database and the entry table.
    #[instrument(skip(config), fields(db_location = %config.db_location, table = %config.table))]
    pub async fn open(config: &EntryStoreConfig) -> Result<Self, StorageError> {
        if !is_valid_table_name(&config.table) {
            return Err(StorageError::InvalidTable(config.table.clone()));
        }

        if config.db_location != IN_MEMORY {
            if let Some(parent) = Path::new(&config.db_location).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }

        let pool_manager = SqlitePoolManager::new(&config.db_location).await?;
        let statements = Statements::new(&config.table, config.case_sensitive);

        info!("Creating entry table if not exist");
        sqlx::query(&statements.create)
            .execute(pool_manager.pool())
            .await?;

        Ok(Self {
            pool_manager,
            statements,
            case_sensitive: config.case_sensitive,
            lock: Mutex::new(()),
        })
    }

    /// Opens a private in-memory store, mostly for tests.
    pub async fn in_memory(case_sensitive: bool) -> Result<Self, StorageError> {
        Self::open(&EntryStoreConfig {
            db_location: IN_MEMORY.to_string(),
            table: "get".to_string(),
            case_sensitive,
        })
        .await
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Stored text for `key`, if any.
    pub async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().await;
        let value = sqlx::query_scalar::<_, Option<String>>(&self.statements.select)
            .bind(key)
            .fetch_optional(self.pool_manager.pool())
            .await?;
        Ok(value.flatten())
    }

    /// Inserts a new entry. Fails with [`StorageError::DuplicateKey`] if `key` already exists; the
    /// existing entry is left untouched.
    pub async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let result = sqlx::query(&self.statements.insert)
            .bind(key)
            .bind(value)
            .execute(self.pool_manager.pool())
            .await;

        match result {
            Ok(_) => {
                debug!(entry = %key, "Entry inserted");
                Ok(())
            }
            Err(sqlx::Error::Database(e)) if is_unique_violation(e.as_ref()) => {
                Err(StorageError::DuplicateKey(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes `key` if present. Deleting a missing key is not an error.
    pub async fn unset(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let result = sqlx::query(&self.statements.delete)
            .bind(key)
            .execute(self.pool_manager.pool())
            .await?;
        debug!(entry = %key, removed = result.rows_affected(), "Entry delete");
        Ok(())
    }

    /// All keys, ascending.
    pub async fn list(&self) -> Result<Vec<String>, StorageError> {
        let mut keys = {
            let _guard = self.lock.lock().await;
            sqlx::query_scalar::<_, String>(&self.statements.list)
                .fetch_all(self.pool_manager.pool())
                .await?
        };
        keys.sort();
        Ok(keys)
    }

    /// Closest existing key to `key`, if it is similar enough.
    ///
    /// Underscores count as spaces on both sides, so `new_york` and `york new` compare as the same
    /// two tokens. Candidates are scanned in ascending key order and the first best score wins.
    pub async fn suggest_closest(&self, key: &str) -> Result<Option<String>, StorageError> {
        let keys = self.list().await?;
        let query = key.replace('_', " ");
        let spaced: Vec<String> = keys.iter().map(|k| k.replace('_', " ")).collect();

        let best = best_match(&query, spaced.iter().map(String::as_str));
        Ok(match best {
            Some((candidate, score)) if score > SUGGESTION_THRESHOLD => {
                debug!(query = %key, candidate = %candidate, score, "Entry suggestion");
                Some(candidate.replace(' ', "_"))
            }
            _ => None,
        })
    }
}

fn is_unique_violation(e: &dyn sqlx::error::DatabaseError) -> bool {
    // 1555: SQLITE_CONSTRAINT_PRIMARYKEY, 2067: SQLITE_CONSTRAINT_UNIQUE
    e.is_unique_violation() || matches!(e.code().as_deref(), Some("1555") | Some("2067"))
}
