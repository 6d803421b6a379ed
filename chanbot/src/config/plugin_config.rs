//! Plugin configs: entry store and Wolfram|Alpha. Loaded from env.

use anyhow::Result;
use plugins::{EntryConfig, WolframConfig};
use std::env;
use std::time::Duration;
use storage::{is_valid_table_name, EntryStoreConfig};
use wolfram_client::{DEFAULT_API_URL, DEFAULT_CRYPTO_LIST_URL, QUERY_TIMEOUT};

/// Reads a boolean variable; unset or unrecognized values fall back to `default`.
pub(crate) fn env_flag(name: &str, default: bool) -> bool {
    match env::var(name).map(|v| v.trim().to_lowercase()) {
        Ok(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
        Ok(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
        _ => default,
    }
}

/// Reads a whole number of seconds; unset, unparsable or zero values fall back to `default`.
fn env_secs(name: &str, default: Duration) -> Duration {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .unwrap_or(default)
}

/// Per-plugin settings. The `wa` plugin is only enabled when WOLFRAM_API_KEY is set.
#[derive(Debug, Clone)]
pub struct PluginsConfig {
    pub entry: EntryConfig,
    pub wolfram: Option<WolframConfig>,
}

impl PluginsConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = EntryStoreConfig::default();
        let entry = EntryConfig {
            store: EntryStoreConfig {
                db_location: env::var("ENTRY_DB_LOCATION").unwrap_or(defaults.db_location),
                table: env::var("ENTRY_TABLE").unwrap_or(defaults.table),
                case_sensitive: env_flag("ENTRY_CASE_SENSITIVE", defaults.case_sensitive),
            },
            try_autocorrect: env_flag("ENTRY_TRY_AUTOCORRECT", true),
        };

        let wolfram = env::var("WOLFRAM_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(|key| WolframConfig {
                api_key: key.trim().to_string(),
                nonmetric_units: env_flag("WOLFRAM_NONMETRIC_UNITS", false),
                warn_crypto_asks: env_flag("WOLFRAM_WARN_CRYPTO_ASKS", true),
                api_url: env::var("WOLFRAM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
                crypto_list_url: env::var("CRYPTO_LIST_URL")
                    .unwrap_or_else(|_| DEFAULT_CRYPTO_LIST_URL.to_string()),
                query_timeout: env_secs("WOLFRAM_QUERY_TIMEOUT_SECS", QUERY_TIMEOUT),
            });

        Ok(Self { entry, wolfram })
    }

    /// Validate config (table name is a plain identifier, endpoint URLs parse).
    pub fn validate(&self) -> Result<()> {
        if !is_valid_table_name(&self.entry.store.table) {
            anyhow::bail!("ENTRY_TABLE is not a valid table name: {}", self.entry.store.table);
        }
        if let Some(wolfram) = &self.wolfram {
            if reqwest::Url::parse(&wolfram.api_url).is_err() {
                anyhow::bail!("WOLFRAM_API_URL is not a valid URL: {}", wolfram.api_url);
            }
            if reqwest::Url::parse(&wolfram.crypto_list_url).is_err() {
                anyhow::bail!("CRYPTO_LIST_URL is not a valid URL: {}", wolfram.crypto_list_url);
            }
        }
        Ok(())
    }
}
