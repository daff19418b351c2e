//! Credential selection handlers.

use axum::extract::State;
use axum::Json;
use nds_genai::ApiKey;
use serde::Deserialize;

use crate::credentials::CredentialStatus;
use crate::error::{StudioError, StudioResult};
use crate::state::AppState;

/// Whether a key is selected and whether the studio asked for one.
pub async fn get_credentials(State(state): State<AppState>) -> Json<CredentialStatus> {
    Json(state.credentials.status().await)
}

#[derive(Deserialize)]
pub struct SelectKeyRequest {
    pub api_key: String,
}

/// Select the key used for outbound calls.
pub async fn select_key(
    State(state): State<AppState>,
    Json(request): Json<SelectKeyRequest>,
) -> StudioResult<Json<CredentialStatus>> {
    let key = ApiKey::parse(&request.api_key)
        .ok_or_else(|| StudioError::bad_request("api_key must not be empty"))?;
    state.credentials.select(key).await;
    Ok(Json(state.credentials.status().await))
}
