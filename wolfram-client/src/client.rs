//! HTTP client for the Wolfram|Alpha v2 query API and the cryptocurrency ticker list.

use std::time::Duration;

use chanbot_core::CurrencyId;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::WaError;
use crate::mask_token;
use crate::response::WaOutcome;

pub const DEFAULT_API_URL: &str = "http://api.wolframalpha.com/v2/query";
pub const DEFAULT_CRYPTO_LIST_URL: &str = "https://api.coinmarketcap.com/v1/ticker/?limit=0";

/// Pod ids the bot never shows.
pub const EXCLUDED_POD_IDS: [&str; 7] = [
    "SeriesRepresentations:*",
    "Illustration",
    "TypicalHumanComputationTimes",
    "NumberLine",
    "NumberName",
    "Input",
    "Sequence",
];

/// Upper bound for one query. The API's own scan/pod/format/parse timeouts add up to 20s.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(30);

const CRYPTO_LIST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct TickerEntry {
    id: String,
    name: String,
    symbol: String,
}

/// Wolfram|Alpha client. Cheap to clone.
#[derive(Clone)]
pub struct WaClient {
    http: Client,
    api_url: String,
    api_key: String,
    nonmetric_units: bool,
    query_timeout: Duration,
}

impl std::fmt::Debug for WaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WaClient")
            .field("api_url", &self.api_url)
            .field("api_key", &mask_token(&self.api_key))
            .field("nonmetric_units", &self.nonmetric_units)
            .field("query_timeout", &self.query_timeout)
            .finish()
    }
}

impl WaClient {
    pub fn new(api_key: &str, nonmetric_units: bool) -> Result<Self, WaError> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            api_url: DEFAULT_API_URL.to_string(),
            api_key: api_key.to_string(),
            nonmetric_units,
            query_timeout: QUERY_TIMEOUT,
        })
    }

    /// Overrides the query endpoint (tests, proxies).
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.to_string();
        self
    }

    /// Overrides [`QUERY_TIMEOUT`]. A query running longer fails with [`WaError::Http`].
    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Query string for `input`, in request order.
    pub fn query_params(&self, input: &str) -> Vec<(&'static str, String)> {
        let units = if self.nonmetric_units { "nonmetric" } else { "metric" };
        let mut params = vec![
            ("input", input.to_string()),
            ("appid", self.api_key.clone()),
            ("format", "plaintext".to_string()),
            ("scantimeout", "3.0".to_string()),
            ("podtimeout", "4.0".to_string()),
            ("formattimeout", "8.0".to_string()),
            ("parsetimeout", "5.0".to_string()),
            ("units", units.to_string()),
        ];
        params.extend(EXCLUDED_POD_IDS.iter().map(|id| ("excludepodid", id.to_string())));
        params
    }

    /// Asks Wolfram|Alpha and parses the answer.
    #[instrument(skip(self), fields(api_key = %mask_token(&self.api_key)))]
    pub async fn query(&self, input: &str) -> Result<WaOutcome, WaError> {
        let body = self
            .http
            .get(&self.api_url)
            .query(&self.query_params(input))
            .timeout(self.query_timeout)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        debug!(bytes = body.len(), "Wolfram|Alpha response received");
        WaOutcome::parse(&body)
    }

    /// Downloads the `[{id, name, symbol}]` ticker list.
    #[instrument(skip(self))]
    pub async fn fetch_known_currencies(&self, url: &str) -> Result<Vec<CurrencyId>, WaError> {
        let body = self
            .http
            .get(url)
            .timeout(CRYPTO_LIST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let entries: Vec<TickerEntry> = serde_json::from_str(&body)?;
        debug!(count = entries.len(), "Known cryptocurrencies fetched");
        Ok(entries
            .into_iter()
            .map(|e| CurrencyId::new(&e.id, &e.name, &e.symbol))
            .collect())
    }
}
