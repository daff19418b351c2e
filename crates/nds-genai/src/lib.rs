//! Client for the generative-AI service behind NightDrive Studio.
//!
//! Two capabilities are exposed through [`GenerativeBackend`]:
//! - text generation (scene descriptions)
//! - video generation, a long-running job this client polls until it is done

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::{GenAiClient, GenerativeBackend};
pub use config::GenAiConfig;
pub use error::{GenAiError, GenAiResult, ENTITY_NOT_FOUND};
pub use types::{ApiKey, AspectRatio, GeneratedVideo, Resolution, VideoConfig, VideoRequest};
