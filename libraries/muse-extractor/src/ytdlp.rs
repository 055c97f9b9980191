//! yt-dlp subprocess provider
//!
//! Drives the `yt-dlp` binary with `-J` (single-line JSON dump) and
//! normalizes its output. Search uses the `ytsearchN:` pseudo-URL with
//! `--flat-playlist` so no format extraction happens per result.

use crate::error::{ExtractError, Result};
use crate::format::{select_best_audio, RawFormat};
use crate::VideoProvider;
use async_trait::async_trait;
use muse_core::types::{SearchResult, StreamSource};
use serde::Deserialize;
use std::path::PathBuf;
use tokio::process::Command;

/// Provider that shells out to the `yt-dlp` binary.
pub struct YtDlpProvider {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct SearchDump {
    #[serde(default)]
    entries: Vec<SearchEntry>,
}

#[derive(Debug, Deserialize)]
struct SearchEntry {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    uploader: Option<String>,
    #[serde(default)]
    thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct VideoDump {
    #[serde(default)]
    formats: Vec<RawFormat>,
}

impl YtDlpProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Run yt-dlp and return its stdout, mapping the well-known stderr
    /// markers to typed errors.
    async fn run(&self, args: &[String], subject: &str) -> Result<String> {
        let output = Command::new(&self.path)
            .arg("-J")
            .arg("--no-warnings")
            .args(args)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::debug!(subject, stderr = %stderr.trim(), "yt-dlp failed");
            if stderr.contains("Video unavailable")
                || stderr.contains("Incomplete YouTube ID")
                || stderr.contains("Private video")
            {
                return Err(ExtractError::NotFound(subject.to_string()));
            }
            let first_line = stderr.lines().next().unwrap_or("unknown error");
            return Err(ExtractError::Tool(first_line.to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl VideoProvider for YtDlpProvider {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let args = vec![
            "--flat-playlist".to_string(),
            format!("ytsearch{limit}:{query}"),
        ];
        let stdout = self.run(&args, query).await?;

        let dump: SearchDump = serde_json::from_str(&stdout)?;
        Ok(dump.entries.into_iter().map(entry_to_result).collect())
    }

    async fn resolve(&self, video_id: &str) -> Result<StreamSource> {
        let args = vec![
            "--no-playlist".to_string(),
            format!("https://www.youtube.com/watch?v={video_id}"),
        ];
        let stdout = self.run(&args, video_id).await?;

        let dump: VideoDump = serde_json::from_str(&stdout)?;
        let best = select_best_audio(&dump.formats)
            .ok_or_else(|| ExtractError::NoAudio(video_id.to_string()))?;

        Ok(StreamSource {
            // select_best_audio only returns formats with a URL
            url: best.url.clone().unwrap_or_default(),
            mime_type: best.mime_type(),
            bitrate: best.abr.or(best.tbr),
        })
    }
}

fn entry_to_result(entry: SearchEntry) -> SearchResult {
    // Flat-playlist entries frequently carry no thumbnails; the predictable
    // i.ytimg.com URL works for every public video.
    let thumbnail = entry
        .thumbnails
        .into_iter()
        .last()
        .map(|t| t.url)
        .or_else(|| {
            Some(format!(
                "https://i.ytimg.com/vi/{}/hqdefault.jpg",
                entry.id
            ))
        });

    SearchResult {
        title: entry.title.unwrap_or_else(|| entry.id.clone()),
        channel: entry.channel.or(entry.uploader),
        duration: entry.duration.map(|d| d as i64),
        thumbnail,
        id: entry.id,
    }
}
