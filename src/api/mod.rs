use axum::{
    Router,
    http::HeaderValue,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::SharedState;

mod episodes;
mod error;
mod system;
mod types;
mod videos;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

/// Build the app state straight from a config. Test entry point.
pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let config = state.shared.config().await;

    let cors = build_cors_layer(&config);

    let api_router = Router::new()
        .route("/episodes", get(episodes::list_episodes))
        .route("/episodes", post(episodes::create_episode))
        .route("/episodes/{id}", get(episodes::get_episode))
        .route("/episodes/{id}", delete(episodes::delete_episode))
        .route("/episodes/{id}/publish", post(episodes::publish_episode))
        .route("/episodes/{id}/script", post(episodes::generate_script))
        .route("/episodes/{id}/cuts", get(episodes::list_cuts))
        .route("/episodes/{id}/cuts", post(episodes::generate_cuts))
        .route("/episodes/{id}/assets", get(episodes::list_assets))
        .route(
            "/episodes/{id}/asset-prompts",
            post(episodes::generate_asset_prompts),
        )
        .route("/video/render/sora", post(videos::render_sora))
        .route("/video/render/heygen", post(videos::render_heygen))
        .route("/video/status/{job_id}", get(videos::video_status))
        .route("/system/config", get(system::get_config));

    Router::new()
        .nest("/api", api_router)
        .route("/health", get(system::health))
        .route("/metrics", get(system::metrics))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
