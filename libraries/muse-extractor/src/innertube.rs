//! Innertube scraping provider
//!
//! Talks to YouTube's public `youtubei/v1` JSON API with the Android
//! client context (the Android player responses carry direct stream URLs
//! instead of ciphered signatures). Response trees are deep and change
//! shape regularly, so search results are collected by walking the JSON
//! for `videoRenderer` objects instead of mirroring the full structure.

use crate::error::{ExtractError, Result};
use crate::VideoProvider;
use async_trait::async_trait;
use muse_core::types::{SearchResult, StreamSource};
use serde_json::{json, Value};
use std::time::Duration;

const API_BASE: &str = "https://www.youtube.com/youtubei/v1";

// Android client identity; the player endpoint rejects unknown clients.
const CLIENT_NAME: &str = "ANDROID";
const CLIENT_VERSION: &str = "19.09.37";
const ANDROID_SDK_VERSION: u32 = 30;

/// Provider that scrapes YouTube's Innertube JSON API directly.
pub struct InnertubeProvider {
    client: reqwest::Client,
    api_base: String,
}

impl InnertubeProvider {
    pub fn new() -> Result<Self> {
        Self::with_base(API_BASE)
    }

    /// Construct against a different endpoint (used by tests).
    pub fn with_base(api_base: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent(format!(
                "com.google.android.youtube/{CLIENT_VERSION} (Linux; U; Android 11)"
            ))
            .build()?;

        Ok(Self {
            client,
            api_base: api_base.into(),
        })
    }

    fn context() -> Value {
        json!({
            "client": {
                "clientName": CLIENT_NAME,
                "clientVersion": CLIENT_VERSION,
                "androidSdkVersion": ANDROID_SDK_VERSION,
                "hl": "en",
            }
        })
    }

    async fn post(&self, endpoint: &str, body: Value) -> Result<Value> {
        let url = format!("{}/{endpoint}", self.api_base);
        let response = self.client.post(&url).json(&body).send().await?;
        let response = response.error_for_status()?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl VideoProvider for InnertubeProvider {
    fn name(&self) -> &'static str {
        "innertube"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let body = json!({
            "context": Self::context(),
            "query": query,
        });

        let response = self.post("search", body).await?;

        let mut renderers = Vec::new();
        collect_video_renderers(&response, &mut renderers);

        Ok(renderers
            .into_iter()
            .filter_map(parse_video_renderer)
            .take(limit)
            .collect())
    }

    async fn resolve(&self, video_id: &str) -> Result<StreamSource> {
        let body = json!({
            "context": Self::context(),
            "videoId": video_id,
        });

        let response = self.post("player", body).await?;

        let status = response
            .pointer("/playabilityStatus/status")
            .and_then(Value::as_str)
            .unwrap_or("ERROR");
        if status != "OK" {
            return Err(ExtractError::NotFound(video_id.to_string()));
        }

        let formats = response
            .pointer("/streamingData/adaptiveFormats")
            .and_then(Value::as_array)
            .ok_or_else(|| ExtractError::Parse("missing streamingData".to_string()))?;

        select_adaptive_audio(formats)
            .ok_or_else(|| ExtractError::NoAudio(video_id.to_string()))
    }
}

/// Recursively collect every `videoRenderer` object in the response tree.
fn collect_video_renderers<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if key == "videoRenderer" || key == "compactVideoRenderer" {
                    out.push(child);
                } else {
                    collect_video_renderers(child, out);
                }
            }
        }
        Value::Array(items) => {
            for child in items {
                collect_video_renderers(child, out);
            }
        }
        _ => {}
    }
}

fn parse_video_renderer(renderer: &Value) -> Option<SearchResult> {
    let id = renderer.get("videoId")?.as_str()?.to_string();

    let title = text_of(renderer.get("title")?)?;

    let channel = renderer
        .get("ownerText")
        .or_else(|| renderer.get("longBylineText"))
        .and_then(text_of);

    let duration = renderer
        .pointer("/lengthText/simpleText")
        .and_then(Value::as_str)
        .and_then(parse_duration);

    let thumbnail = renderer
        .pointer("/thumbnail/thumbnails")
        .and_then(Value::as_array)
        .and_then(|t| t.last())
        .and_then(|t| t.get("url"))
        .and_then(Value::as_str)
        .map(String::from);

    Some(SearchResult {
        id,
        title,
        channel,
        duration,
        thumbnail,
    })
}

/// Pull the text out of either a `{"runs": [{"text": ...}]}` or a
/// `{"simpleText": ...}` node.
fn text_of(node: &Value) -> Option<String> {
    if let Some(simple) = node.get("simpleText").and_then(Value::as_str) {
        return Some(simple.to_string());
    }
    let runs = node.get("runs")?.as_array()?;
    let text: String = runs
        .iter()
        .filter_map(|run| run.get("text").and_then(Value::as_str))
        .collect();
    (!text.is_empty()).then_some(text)
}

/// Parse a "1:02:03" / "3:33" length label into seconds.
fn parse_duration(label: &str) -> Option<i64> {
    let mut seconds: i64 = 0;
    for part in label.split(':') {
        seconds = seconds * 60 + part.trim().parse::<i64>().ok()?;
    }
    Some(seconds)
}

/// Pick the highest-bitrate audio stream out of `adaptiveFormats`,
/// falling back to any entry that advertises an audio channel.
fn select_adaptive_audio(formats: &[Value]) -> Option<StreamSource> {
    let bitrate_of = |f: &Value| {
        f.get("averageBitrate")
            .or_else(|| f.get("bitrate"))
            .and_then(Value::as_f64)
    };
    let is_audio = |f: &&Value| {
        f.pointer("/mimeType")
            .and_then(Value::as_str)
            .is_some_and(|m| m.starts_with("audio/"))
    };
    let has_audio = |f: &&Value| f.get("audioQuality").is_some() || is_audio(f);
    let has_url = |f: &&Value| f.get("url").and_then(Value::as_str).is_some();

    let rank = |f: &&Value| bitrate_of(f).unwrap_or(0.0);

    let best = formats
        .iter()
        .filter(is_audio)
        .filter(has_url)
        .max_by(|a, b| rank(a).total_cmp(&rank(b)))
        .or_else(|| {
            formats
                .iter()
                .filter(has_audio)
                .filter(has_url)
                .max_by(|a, b| rank(a).total_cmp(&rank(b)))
        })?;

    Some(StreamSource {
        url: best.get("url")?.as_str()?.to_string(),
        mime_type: best
            .get("mimeType")
            .and_then(Value::as_str)
            .map(String::from),
        bitrate: bitrate_of(best),
    })
}
