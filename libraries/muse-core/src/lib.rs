//! Muse Core
//!
//! Shared domain types and error handling for the Muse streaming server.
//!
//! This crate defines:
//! - **Domain Types**: `User`, `Playlist`, `Song`, `SearchResult`, `StreamSource`
//! - **Error Handling**: Unified `MuseError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use muse_core::types::NewSong;
//!
//! let song = NewSong {
//!     youtube_id: "dQw4w9WgXcQ".to_string(),
//!     title: "Never Gonna Give You Up".to_string(),
//!     duration: Some(213),
//!     thumbnail: None,
//!     channel: Some("Rick Astley".to_string()),
//! };
//! assert!(song.validate().is_ok());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{MuseError, Result};
pub use types::{
    NewSong, Playlist, PlaylistSummary, QueueEntry, SearchResult, Song, StreamSource, User,
};
