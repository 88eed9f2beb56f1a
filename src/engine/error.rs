use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error payload returned by the Meilisearch HTTP API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub message: String,
    pub code: String,
    #[serde(rename = "type")]
    pub error_type: String,
    pub link: String,
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("cannot reach Meilisearch at {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Meilisearch error {status}: {} ({})", .error.message, .error.code)]
    Api { status: u16, error: ApiError },

    #[error("unexpected status {status} from Meilisearch: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("cannot decode Meilisearch response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("cannot build Meilisearch request: {0}")]
    Request(#[source] reqwest::Error),

    #[error("cannot initialize HTTP client: {0}")]
    Init(#[source] reqwest::Error),

    #[error("API key is not a valid header value: {0}")]
    ApiKey(#[from] reqwest::header::InvalidHeaderValue),
}

pub type EngineResult<T> = Result<T, EngineError>;
