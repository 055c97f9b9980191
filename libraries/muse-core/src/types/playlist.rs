/// Playlist domain types
use crate::types::Song;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Named ordered collection of songs owned by a user session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: i64,

    /// Owner user ID
    pub user_id: i64,

    /// Playlist name
    pub name: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Songs in playlist order; `None` when not loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub songs: Option<Vec<Song>>,
}

/// Playlist listing entry with its song count, as returned by the
/// playlist index endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    /// Unique playlist identifier
    pub id: i64,

    /// Playlist name
    pub name: String,

    /// Number of songs currently in the playlist
    pub song_count: i64,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
