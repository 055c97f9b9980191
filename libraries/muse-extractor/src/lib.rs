//! Muse Extractor
//!
//! Adapters around external YouTube extraction logic. The actual
//! stream-resolution smarts live outside this codebase; this crate only
//! shells out or scrapes and normalizes the answers into core types.
//!
//! Two interchangeable providers exist:
//!
//! - [`YtDlpProvider`] drives the `yt-dlp` binary as a subprocess
//! - [`InnertubeProvider`] talks to YouTube's public `youtubei` JSON API
//!
//! Both implement [`VideoProvider`], which is what the server consumes.

#![forbid(unsafe_code)]

mod error;
mod format;

pub mod innertube;
pub mod ytdlp;

pub use error::{ExtractError, Result};
pub use innertube::InnertubeProvider;
pub use ytdlp::YtDlpProvider;

use async_trait::async_trait;
use muse_core::types::{SearchResult, StreamSource};

/// External video-info provider.
///
/// Implementations resolve free-text searches into result lists and video
/// IDs into directly playable audio stream URLs.
#[async_trait]
pub trait VideoProvider: Send + Sync {
    /// Human-readable provider name, used in logs.
    fn name(&self) -> &'static str;

    /// Search YouTube by free-text query.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>>;

    /// Resolve a video ID to its best audio stream.
    ///
    /// Picks the highest-bitrate audio-only format, falling back to any
    /// format that carries an audio codec.
    async fn resolve(&self, video_id: &str) -> Result<StreamSource>;
}
