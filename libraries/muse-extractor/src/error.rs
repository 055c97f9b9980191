/// Extraction error types
use thiserror::Error;

/// Result type alias using `ExtractError`
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors from the external extraction providers
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Video does not exist, is private, or was taken down
    #[error("Video not found: {0}")]
    NotFound(String),

    /// Video exists but exposes no audio format we can play
    #[error("No playable audio format for video: {0}")]
    NoAudio(String),

    /// The extractor subprocess failed
    #[error("Extractor tool error: {0}")]
    Tool(String),

    /// Upstream HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response did not have the shape we expect
    #[error("Unexpected response: {0}")]
    Parse(String),

    /// JSON decoding failure
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// I/O error spawning or reading the subprocess
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<ExtractError> for muse_core::MuseError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::NotFound(id) => muse_core::MuseError::not_found("Video", id),
            other => muse_core::MuseError::extraction(other.to_string()),
        }
    }
}
