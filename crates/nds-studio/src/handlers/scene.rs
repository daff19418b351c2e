//! Scene handlers.

use axum::extract::State;
use axum::Json;
use nds_models::Scene;
use tracing::info;

use crate::error::StudioResult;
use crate::state::AppState;

/// Current scene.
pub async fn get_scene(State(state): State<AppState>) -> Json<Scene> {
    Json(state.studio.snapshot().await.scene)
}

/// Replace the scene with the submitted record.
pub async fn put_scene(
    State(state): State<AppState>,
    Json(scene): Json<Scene>,
) -> StudioResult<Json<Scene>> {
    let scene = state.studio.set_scene(scene).await?;
    info!(route = %scene.route, vibe = %scene.vibe, weather = %scene.weather, "Scene updated");
    Ok(Json(scene))
}

/// Rewrite the description with the text model. Always answers with a scene.
pub async fn describe_scene(State(state): State<AppState>) -> Json<Scene> {
    Json(state.studio.describe_scene().await)
}
