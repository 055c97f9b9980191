//! Format selection shared by both providers.

use serde::Deserialize;

/// One entry of a yt-dlp `formats` array. Only the fields we select on.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawFormat {
    pub url: Option<String>,
    pub ext: Option<String>,
    pub acodec: Option<String>,
    pub vcodec: Option<String>,
    /// Average audio bitrate in kbit/s
    pub abr: Option<f64>,
    /// Total bitrate in kbit/s, present when abr is not
    pub tbr: Option<f64>,
}

impl RawFormat {
    fn has_audio(&self) -> bool {
        self.acodec.as_deref().is_some_and(|c| c != "none")
    }

    fn is_audio_only(&self) -> bool {
        self.has_audio() && self.vcodec.as_deref().map_or(true, |c| c == "none")
    }

    fn bitrate(&self) -> f64 {
        self.abr.or(self.tbr).unwrap_or(0.0)
    }

    /// MIME type for the container extension, when recognizable.
    pub fn mime_type(&self) -> Option<String> {
        let mime = match self.ext.as_deref()? {
            "m4a" | "mp4" => "audio/mp4",
            "webm" => "audio/webm",
            "opus" | "ogg" => "audio/ogg",
            "mp3" => "audio/mpeg",
            _ => return None,
        };
        Some(mime.to_string())
    }
}

/// Pick the best playable audio format.
///
/// Preference order: highest-bitrate audio-only format, then any format
/// that carries an audio codec at all (muxed video as a last resort).
pub(crate) fn select_best_audio(formats: &[RawFormat]) -> Option<&RawFormat> {
    let playable = |f: &&RawFormat| f.url.is_some();

    formats
        .iter()
        .filter(|f| f.is_audio_only())
        .filter(playable)
        .max_by(|a, b| a.bitrate().total_cmp(&b.bitrate()))
        .or_else(|| {
            formats
                .iter()
                .filter(|f| f.has_audio())
                .filter(playable)
                .max_by(|a, b| a.bitrate().total_cmp(&b.bitrate()))
        })
}
