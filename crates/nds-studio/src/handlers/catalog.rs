//! Moment library and command palette handlers.

use axum::extract::Query;
use axum::Json;
use nds_models::{command_search, search_moments, CommandItem, Moment};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct MomentListResponse {
    pub moments: Vec<Moment>,
    pub count: usize,
}

/// Catalog moments whose title matches `q`.
pub async fn list_moments(Query(query): Query<SearchQuery>) -> Json<MomentListResponse> {
    let moments: Vec<Moment> = search_moments(&query.q).into_iter().cloned().collect();
    let count = moments.len();
    Json(MomentListResponse { moments, count })
}

#[derive(Serialize)]
pub struct CommandListResponse {
    pub items: Vec<CommandItem>,
}

/// Command palette results for `q`.
pub async fn search_commands(Query(query): Query<SearchQuery>) -> Json<CommandListResponse> {
    Json(CommandListResponse {
        items: command_search(&query.q),
    })
}
