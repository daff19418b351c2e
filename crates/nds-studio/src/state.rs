//! Application state.

use std::sync::Arc;

use nds_genai::{GenAiClient, GenAiConfig, GenerativeBackend};

use crate::config::StudioConfig;
use crate::credentials::{CredentialSelector, CredentialStore};
use crate::error::StudioResult;
use crate::studio::Studio;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: StudioConfig,
    pub studio: Arc<Studio>,
    pub credentials: Arc<CredentialStore>,
}

impl AppState {
    /// Create application state backed by the real generative service.
    pub fn new(config: StudioConfig, genai: GenAiConfig) -> StudioResult<Self> {
        let client = GenAiClient::new(genai)?;
        let credentials = Arc::new(CredentialStore::from_env());
        Ok(Self::with_backend(config, Arc::new(client), credentials))
    }

    /// Create application state around any backend.
    pub fn with_backend(
        config: StudioConfig,
        backend: Arc<dyn GenerativeBackend>,
        credentials: Arc<CredentialStore>,
    ) -> Self {
        let selector: Option<Arc<dyn CredentialSelector>> = if config.key_selection {
            Some(credentials.clone() as Arc<dyn CredentialSelector>)
        } else {
            None
        };

        let studio = Studio::new(backend, Arc::clone(&credentials), selector);

        Self {
            config,
            studio: Arc::new(studio),
            credentials,
        }
    }
}
