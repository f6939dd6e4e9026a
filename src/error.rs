//! Error types for vidbrief.

use thiserror::Error;

/// Library-level error type for vidbrief operations.
#[derive(Error, Debug)]
pub enum VidbriefError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Index not found: {0}")]
    IndexNotFound(String),

    #[error("Index {0} has no videos")]
    NoVideos(String),

    #[error("No summary for {0}; request /summary/{0} first")]
    SummaryMissing(String),

    #[error("Indexing failed with status {status}")]
    IndexingFailed { status: String },

    #[error("Twelve Labs API returned {status}: {body}")]
    Vendor { status: u16, body: String },

    #[error("Unexpected vendor response: {0}")]
    VendorResponse(String),

    #[error("Chat completion error: {0}")]
    Chat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for vidbrief operations.
pub type Result<T> = std::result::Result<T, VidbriefError>;
