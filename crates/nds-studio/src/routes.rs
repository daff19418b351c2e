//! HTTP routes.

use axum::middleware;
use axum::routing::{delete, get, post, put};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::{
    add_moment, describe_scene, export_pack, get_credentials, get_render, get_scene, get_studio,
    get_timeline, health, list_moments, put_scene, remove_moment, search_commands, select_key,
    set_tab, start_render,
};
use crate::metrics::metrics_middleware;
use crate::middleware::{cors_layer, request_id, request_logging, security_headers};
use crate::state::AppState;

/// Create the studio router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let studio_routes = Router::new()
        .route("/studio", get(get_studio))
        .route("/studio/tab", put(set_tab));

    let catalog_routes = Router::new()
        .route("/moments", get(list_moments))
        .route("/commands", get(search_commands));

    let scene_routes = Router::new()
        .route("/scene", get(get_scene).put(put_scene))
        .route("/scene/describe", post(describe_scene));

    let timeline_routes = Router::new()
        .route("/timeline", get(get_timeline).post(add_moment))
        .route("/timeline/:instance_id", delete(remove_moment));

    let render_routes = Router::new()
        .route("/render", get(get_render).post(start_render))
        .route("/pack", get(export_pack));

    let credential_routes =
        Router::new().route("/credentials", get(get_credentials).put(select_key));

    let api_routes = Router::new()
        .merge(studio_routes)
        .merge(catalog_routes)
        .merge(scene_routes)
        .merge(timeline_routes)
        .merge(render_routes)
        .merge(credential_routes);

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health));

    // Metrics endpoint (if enabled)
    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
