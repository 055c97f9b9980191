/// Ephemeral playback queue types
use serde::{Deserialize, Serialize};

/// One entry of the browser's current playback queue.
///
/// The queue is never persisted in the database; it travels in a cookie so
/// it survives page reloads but dies with the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    /// YouTube video identifier
    pub id: String,

    /// Video title
    pub title: String,

    /// Thumbnail URL
    #[serde(default)]
    pub thumbnail: Option<String>,

    /// Channel / uploader name
    #[serde(default)]
    pub channel: Option<String>,

    /// Duration in seconds, when known
    #[serde(default)]
    pub duration: Option<i64>,
}
