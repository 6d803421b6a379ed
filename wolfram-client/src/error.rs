use thiserror::Error;

/// Failures talking to Wolfram|Alpha or the currency list endpoint.
#[derive(Error, Debug)]
pub enum WaError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing or invalid attribute `{attribute}` on <{element}>")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
}
