/// Search and stream-resolution types
use serde::{Deserialize, Serialize};

/// One entry of a YouTube search, as surfaced to the browser client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// YouTube video identifier
    pub id: String,

    /// Video title
    pub title: String,

    /// Channel / uploader name
    pub channel: Option<String>,

    /// Duration in seconds, when known
    pub duration: Option<i64>,

    /// Thumbnail URL
    pub thumbnail: Option<String>,
}

/// A resolved, directly playable audio stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamSource {
    /// Direct media URL suitable for an HTML audio element
    pub url: String,

    /// MIME type of the stream, when the provider reports one
    pub mime_type: Option<String>,

    /// Average audio bitrate in bits per second, when known
    pub bitrate: Option<f64>,
}
