//! Render handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::error::StudioResult;
use crate::state::AppState;
use crate::studio::RenderState;

/// Start a render in the background.
///
/// Answers 202 immediately; poll `GET /api/render` for the outcome.
pub async fn start_render(
    State(state): State<AppState>,
) -> StudioResult<(StatusCode, Json<RenderState>)> {
    let job = state.studio.begin_render().await?;

    let studio = state.studio.clone();
    tokio::spawn(async move {
        studio.run_render(job).await;
    });

    Ok((StatusCode::ACCEPTED, Json(state.studio.snapshot().await.render)))
}

/// Render status, video URI and prompt.
pub async fn get_render(State(state): State<AppState>) -> Json<RenderState> {
    Json(state.studio.snapshot().await.render)
}
