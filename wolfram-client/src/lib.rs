//! # Wolfram|Alpha client
//!
//! Thin wrapper around [reqwest] for the v2 query API (plaintext pods) and the cryptocurrency
//! ticker list used to warn about currency conversions. Provides key masking for safe logging.

mod client;
mod error;
mod response;

pub use client::{
    WaClient, DEFAULT_API_URL, DEFAULT_CRYPTO_LIST_URL, EXCLUDED_POD_IDS, QUERY_TIMEOUT,
};
pub use error::WaError;
pub use response::{answer_pods, normalize_plaintext, Pod, Subpod, WaOutcome};

/// Masks an API key for safe logging: first 7 chars + "***" + last 4 chars.
/// Keys of 11 chars or fewer become "***" so no part leaks.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_char_boundary(7) || !token.is_char_boundary(len - 4) {
        return "***".to_string();
    }
    format!("{}***{}", &token[..7], &token[len - 4..])
}
