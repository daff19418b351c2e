//! Client configuration.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_VIDEO_MODEL: &str = "veo-3.1-fast-generate-preview";

/// Configuration for the generative-AI client.
#[derive(Debug, Clone)]
pub struct GenAiConfig {
    /// Base URL of the REST API (no trailing slash)
    pub base_url: String,
    /// Text models, tried in order
    pub text_models: Vec<String>,
    /// Video model
    pub video_model: String,
    /// Delay between operation polls
    pub poll_interval: Duration,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            text_models: vec![DEFAULT_TEXT_MODEL.to_string()],
            video_model: DEFAULT_VIDEO_MODEL.to_string(),
            poll_interval: Duration::from_secs(5),
            timeout: Duration::from_secs(60),
        }
    }
}

impl GenAiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("GENAI_BASE_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            text_models: std::env::var("GENAI_TEXT_MODELS")
                .ok()
                .map(|s| parse_model_list(&s))
                .filter(|models| !models.is_empty())
                .unwrap_or(defaults.text_models),
            video_model: std::env::var("GENAI_VIDEO_MODEL").unwrap_or(defaults.video_model),
            poll_interval: Duration::from_secs(
                std::env::var("GENAI_POLL_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
            timeout: Duration::from_secs(
                std::env::var("GENAI_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
        }
    }

    /// Point the client at another base URL (used against mock servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_text_models(mut self, models: Vec<String>) -> Self {
        self.text_models = models;
        self
    }
}

fn parse_model_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
