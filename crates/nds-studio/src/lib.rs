//! NightDrive Studio: scene, timeline and render controller.
//!
//! This crate provides:
//! - Prompt construction from the scene and timeline
//! - The studio session controller (state record + intents)
//! - Credential selection and transient toasts
//! - An axum HTTP surface for the browser front-end

pub mod config;
pub mod credentials;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod notice;
pub mod prompt;
pub mod routes;
pub mod state;
pub mod studio;

pub use config::StudioConfig;
pub use credentials::{CredentialSelector, CredentialStatus, CredentialStore};
pub use error::{RenderError, StudioError, StudioResult};
pub use prompt::{build_description_prompt, build_video_prompt};
pub use routes::create_router;
pub use state::AppState;
pub use studio::{Intent, RenderState, RenderStatus, Studio, StudioState};
