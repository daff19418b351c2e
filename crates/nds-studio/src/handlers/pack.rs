//! Production pack export.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use crate::error::{StudioError, StudioResult};
use crate::state::AppState;

/// Scene and timeline as a pretty-printed JSON document.
pub async fn export_pack(State(state): State<AppState>) -> StudioResult<impl IntoResponse> {
    let pack = state.studio.export_pack().await;
    let body = pack
        .to_json_pretty()
        .map_err(|e| StudioError::internal(format!("Failed to serialize pack: {}", e)))?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}
