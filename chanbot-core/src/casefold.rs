//! Case-insensitive "is this alias known" matching against `{id, name, symbol}` triples.
//!
//! Uses Unicode default case folding rather than lower-casing, so `"STRASSE"` and `"straße"`
//! compare equal.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

/// One known currency (or any other named thing) identified three ways.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyId {
    pub id: String,
    pub name: String,
    pub symbol: String,
}

impl CurrencyId {
    pub fn new(id: &str, name: &str, symbol: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
        }
    }
}

/// Unicode default case fold of `s`.
pub fn fold(s: &str) -> String {
    caseless::default_case_fold_str(s)
}

/// True if any alias equals (after folding) the id, name or symbol of any entry.
pub fn any_alias_known<S: AsRef<str>>(aliases: &[S], entries: &[CurrencyId]) -> bool {
    let aliases: Vec<String> = aliases.iter().map(|a| fold(a.as_ref())).collect();
    aliases.iter().any(|alias| {
        entries.iter().any(|entry| {
            fold(&entry.id) == *alias || fold(&entry.name) == *alias || fold(&entry.symbol) == *alias
        })
    })
}

/// Periodically refreshed snapshot of known entries.
///
/// `replace` swaps the whole collection under the lock, so readers see either the old or the new
/// snapshot, never a mix.
#[derive(Debug, Default)]
pub struct KnownCurrencies {
    entries: RwLock<Vec<CurrencyId>>,
}

impl KnownCurrencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the snapshot.
    pub fn replace(&self, entries: Vec<CurrencyId>) {
        let mut guard = self.entries.write().unwrap_or_else(|e| e.into_inner());
        *guard = entries;
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether any alias names a known entry. An empty snapshot knows nothing.
    pub fn is_any_known<S: AsRef<str>>(&self, aliases: &[S]) -> bool {
        let guard = self.entries.read().unwrap_or_else(|e| e.into_inner());
        any_alias_known(aliases, &guard)
    }
}
