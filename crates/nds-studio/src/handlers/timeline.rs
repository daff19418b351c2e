//! Timeline handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use nds_models::{InstanceId, MomentId, Timeline, TimelineItem, TimelineSummary};
use serde::{Deserialize, Serialize};

use crate::error::StudioResult;
use crate::state::AppState;

#[derive(Serialize)]
pub struct TimelineResponse {
    pub items: Timeline,
    pub summary: TimelineSummary,
}

impl From<Timeline> for TimelineResponse {
    fn from(timeline: Timeline) -> Self {
        Self {
            summary: timeline.summary(),
            items: timeline,
        }
    }
}

/// Current timeline with totals.
pub async fn get_timeline(State(state): State<AppState>) -> Json<TimelineResponse> {
    Json(state.studio.snapshot().await.timeline.into())
}

#[derive(Debug, Deserialize)]
pub struct AddMomentRequest {
    pub moment_id: MomentId,
}

/// Append a catalog moment.
pub async fn add_moment(
    State(state): State<AppState>,
    Json(request): Json<AddMomentRequest>,
) -> StudioResult<(StatusCode, Json<TimelineItem>)> {
    let item = state.studio.add_moment(&request.moment_id).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Remove a placement. Unknown IDs are a no-op.
pub async fn remove_moment(
    State(state): State<AppState>,
    Path(instance_id): Path<String>,
) -> Json<TimelineResponse> {
    let snapshot = state
        .studio
        .remove_moment(&InstanceId::from_string(instance_id))
        .await;
    Json(snapshot.timeline.into())
}
