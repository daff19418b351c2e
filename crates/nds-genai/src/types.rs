//! Request/response types for the generative-AI REST API.

use std::fmt;

use serde::{Deserialize, Serialize};

/// API key used to authorize calls. Debug output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns `None` for blank keys.
    pub fn parse(key: &str) -> Option<Self> {
        let key = key.trim();
        (!key.is_empty()).then(|| Self(key.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Output resolution of a generated video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Resolution {
    #[serde(rename = "720p")]
    P720,
    #[default]
    #[serde(rename = "1080p")]
    P1080,
}

/// Frame aspect ratio of a generated video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
}

/// Fixed generation settings sent with every render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoConfig {
    #[serde(rename = "sampleCount")]
    pub number_of_videos: u32,
    pub resolution: Resolution,
    pub aspect_ratio: AspectRatio,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            number_of_videos: 1,
            resolution: Resolution::P1080,
            aspect_ratio: AspectRatio::Landscape,
        }
    }
}

/// One video render request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRequest {
    pub prompt: String,
    pub config: VideoConfig,
}

impl VideoRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            config: VideoConfig::default(),
        }
    }
}

/// A finished render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedVideo {
    /// Fetchable URI as returned by the service (no credential attached)
    pub uri: String,
    pub prompt: String,
}

// ---------------------------------------------------------------------------
// Text generation wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Part {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate; `None` when there is none.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    pub content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponsePart {
    pub text: Option<String>,
}

// ---------------------------------------------------------------------------
// Video generation wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct PredictLongRunningRequest<'a> {
    pub instances: Vec<VideoInstance<'a>>,
    pub parameters: &'a VideoConfig,
}

#[derive(Debug, Serialize)]
pub(crate) struct VideoInstance<'a> {
    pub prompt: &'a str,
}

/// Long-running operation handle.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Operation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    pub error: Option<ServiceErrorBody>,
    pub response: Option<VideoOperationResponse>,
}

impl Operation {
    /// URI of the first generated sample, if any.
    pub fn video_uri(&self) -> Option<&str> {
        self.response
            .as_ref()?
            .generate_video_response
            .as_ref()?
            .generated_samples
            .first()?
            .video
            .as_ref()?
            .uri
            .as_deref()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoOperationResponse {
    pub generate_video_response: Option<GenerateVideoResponse>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateVideoResponse {
    #[serde(default)]
    pub generated_samples: Vec<GeneratedSample>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GeneratedSample {
    pub video: Option<VideoFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct VideoFile {
    pub uri: Option<String>,
}

/// Error payload, both top-level (`{"error": {...}}`) and inside operations.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ServiceErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ServiceErrorEnvelope {
    pub error: ServiceErrorBody,
}
