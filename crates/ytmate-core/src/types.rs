//! Core data types for the ytmate proxy
//!
//! Field names on the wire follow what the upstream-facing JSON API
//! has always returned to browser clients.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field names that may carry the final URL in a conversion payload,
/// checked in order.
///
/// The upstream has returned the link under `url` on some deployments
/// and under `result` on others. This list is a compatibility shim for
/// that drift, not a contract.
pub const RESULT_URL_FIELDS: [&str; 2] = ["url", "result"];

/// Parameters that must be replayed verbatim to the convert endpoint
///
/// Captured from the inline `download(...)` handler of one results row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionParams {
    /// Source video URL as echoed by the upstream
    #[serde(rename = "youtubeUrl", default)]
    pub youtube_url: String,

    /// Video title from the analysis page
    #[serde(default)]
    pub title: String,

    /// Upstream-assigned identifier, required for conversion
    #[serde(default)]
    pub id: String,

    /// Target extension (e.g. "mp3")
    #[serde(default)]
    pub ext: String,

    /// Opaque note token, also sent as the `x-note` header
    #[serde(default)]
    pub note: String,

    /// Upstream format code
    #[serde(default)]
    pub format: String,
}

/// What a results row offers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DownloadKind {
    /// Ready-to-use media URL
    Direct { url: String },

    /// Needs a second round trip through the convert endpoint
    #[serde(rename = "conversion")]
    ConversionRequired { conversion_params: ConversionParams },
}

/// One row's worth of extracted metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadOption {
    #[serde(flatten)]
    pub kind: DownloadKind,

    /// Quality label with whitespace collapsed (e.g. "1080p (.mp4) full-HD")
    pub quality: String,

    /// Approximate size as shown upstream, unit-less string
    pub size: String,

    /// Inferred from the absence of the `noaudio` row class
    pub has_audio: bool,
}

impl DownloadOption {
    pub fn is_direct(&self) -> bool {
        matches!(self.kind, DownloadKind::Direct { .. })
    }

    /// Conversion parameters, if this option needs conversion
    pub fn conversion_params(&self) -> Option<&ConversionParams> {
        match &self.kind {
            DownloadKind::ConversionRequired { conversion_params } => Some(conversion_params),
            DownloadKind::Direct { .. } => None,
        }
    }
}

/// Structured result of one analyze call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub video_title: String,
    pub thumbnail: Option<String>,
    pub downloads: Vec<DownloadOption>,
}

/// Raw conversion payload from the upstream
///
/// Serialized transparently, so handing it back to a client returns the
/// upstream JSON unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversionResult(pub Value);

impl ConversionResult {
    /// Locate a usable download URL using [`RESULT_URL_FIELDS`]
    ///
    /// Returns the first candidate field holding a string that starts
    /// with `http`.
    pub fn download_url(&self) -> Option<&str> {
        RESULT_URL_FIELDS.iter().find_map(|field| {
            self.0
                .get(field)
                .and_then(Value::as_str)
                .filter(|value| value.starts_with("http"))
        })
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}
