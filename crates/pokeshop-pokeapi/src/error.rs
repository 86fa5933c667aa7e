use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the PokéAPI client and the harvest writer.
#[derive(Debug, Error)]
pub enum PokeApiError {
    /// Network or TLS failure, or a non-2xx status, from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type,
    /// typically because a required key is missing.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to serialize harvested records: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
