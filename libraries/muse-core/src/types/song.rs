/// Song domain types
use crate::error::{MuseError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest YouTube video ID we accept. Current IDs are 11 characters but
/// the format is not contractual, so leave headroom.
const MAX_VIDEO_ID_LEN: usize = 50;

/// A song persisted inside a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Unique song row identifier
    pub id: i64,

    /// YouTube video identifier
    pub youtube_id: String,

    /// Video title
    pub title: String,

    /// Duration in seconds, when known
    pub duration: Option<i64>,

    /// Thumbnail URL
    pub thumbnail: Option<String>,

    /// Channel / uploader name
    pub channel: Option<String>,

    /// Zero-based position within the playlist
    pub position: i64,

    /// When the song was added to the playlist
    pub added_at: DateTime<Utc>,
}

/// Payload for adding a song to a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSong {
    /// YouTube video identifier
    pub youtube_id: String,

    /// Video title
    pub title: String,

    /// Duration in seconds, when known
    #[serde(default)]
    pub duration: Option<i64>,

    /// Thumbnail URL
    #[serde(default)]
    pub thumbnail: Option<String>,

    /// Channel / uploader name
    #[serde(default)]
    pub channel: Option<String>,
}

impl NewSong {
    /// Validate required fields before hitting storage.
    pub fn validate(&self) -> Result<()> {
        if self.youtube_id.trim().is_empty() {
            return Err(MuseError::invalid_input("youtube_id is required"));
        }
        if self.youtube_id.len() > MAX_VIDEO_ID_LEN {
            return Err(MuseError::invalid_input("youtube_id is too long"));
        }
        if self.title.trim().is_empty() {
            return Err(MuseError::invalid_input("title is required"));
        }
        if self.duration.is_some_and(|d| d < 0) {
            return Err(MuseError::invalid_input("duration must be non-negative"));
        }
        Ok(())
    }
}
