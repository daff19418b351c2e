//! Whole-session handlers.

use axum::extract::State;
use axum::Json;
use nds_models::Tab;
use serde::Deserialize;

use crate::state::AppState;
use crate::studio::StudioState;

/// Full studio snapshot.
pub async fn get_studio(State(state): State<AppState>) -> Json<StudioState> {
    Json(state.studio.snapshot().await)
}

#[derive(Debug, Deserialize)]
pub struct SetTabRequest {
    pub tab: Tab,
}

/// Switch the active tab.
pub async fn set_tab(
    State(state): State<AppState>,
    Json(request): Json<SetTabRequest>,
) -> Json<StudioState> {
    Json(state.studio.set_tab(request.tab).await)
}
