//! API key storage and the credential selection hook.
//!
//! The selection hook is optional. When it is absent the studio skips both the
//! proactive "has a key been selected?" check and the re-select prompt, and a
//! missing key surfaces as the outbound call's own failure.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use nds_genai::ApiKey;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;

/// Best-effort capability to query and request key selection.
#[async_trait]
pub trait CredentialSelector: Send + Sync {
    /// Has the user selected a key?
    async fn has_selected_key(&self) -> bool;

    /// Ask the user to select a key.
    async fn open_select_key(&self);
}

/// Selection status reported to the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CredentialStatus {
    pub selected: bool,
    pub prompt_requested: bool,
}

/// Holds the currently selected key.
#[derive(Debug, Default)]
pub struct CredentialStore {
    key: RwLock<Option<ApiKey>>,
    prompt_requested: AtomicBool,
}

impl CredentialStore {
    pub fn new(initial: Option<ApiKey>) -> Self {
        Self {
            key: RwLock::new(initial),
            prompt_requested: AtomicBool::new(false),
        }
    }

    /// Seed from `API_KEY`, falling back to `GEMINI_API_KEY`.
    pub fn from_env() -> Self {
        let key = ["API_KEY", "GEMINI_API_KEY"]
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find_map(|value| ApiKey::parse(&value));
        Self::new(key)
    }

    pub async fn current(&self) -> Option<ApiKey> {
        self.key.read().await.clone()
    }

    /// Replace the selected key and clear any pending prompt.
    pub async fn select(&self, key: ApiKey) {
        *self.key.write().await = Some(key);
        self.prompt_requested.store(false, Ordering::SeqCst);
        info!("API key selected");
    }

    pub fn prompt_requested(&self) -> bool {
        self.prompt_requested.load(Ordering::SeqCst)
    }

    pub async fn status(&self) -> CredentialStatus {
        CredentialStatus {
            selected: self.key.read().await.is_some(),
            prompt_requested: self.prompt_requested(),
        }
    }
}

#[async_trait]
impl CredentialSelector for CredentialStore {
    async fn has_selected_key(&self) -> bool {
        self.key.read().await.is_some()
    }

    async fn open_select_key(&self) {
        self.prompt_requested.store(true, Ordering::SeqCst);
        info!("Key selection requested");
    }
}
