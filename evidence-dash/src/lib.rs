//! evidence-dash library - Evidence review dashboard
//!
//! Read-only HTTP service over the tag and detection files produced by the
//! capture and evidence processing tools.

use axum::Router;
use evidence_common::EvidenceStore;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod view;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Data aggregator over tags.json and the detections directory
    pub store: Arc<EvidenceStore>,
    /// Directory served under `/data`
    pub static_dir: PathBuf,
    /// Upper bound on a single request
    pub request_timeout: Duration,
}

impl AppState {
    /// Create new application state
    pub fn new(store: EvidenceStore, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            store: Arc::new(store),
            static_dir: static_dir.into(),
            request_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let data_routes = Router::new()
        .route("/api/tags", get(api::list_tags))
        .route("/api/detections", get(api::list_detections))
        .route("/api/detections/:tag_id", get(api::get_detection))
        .route("/api/summary/:tag_id", get(api::get_summary))
        .route("/api/all-data", get(api::get_all_data))
        .route("/api/buildinfo", get(api::get_build_info));

    let ui_routes = Router::new()
        .route("/", get(api::serve_dashboard))
        .route("/static/app.js", get(api::serve_app_js))
        .route("/static/dashboard.css", get(api::serve_dashboard_css))
        .route("/static/placeholder.svg", get(api::serve_placeholder))
        .nest_service("/data", ServeDir::new(&state.static_dir))
        .merge(api::health_routes());

    let timeout = state.request_timeout;

    Router::new()
        .merge(data_routes)
        .merge(ui_routes)
        .with_state(state)
        .layer(TimeoutLayer::new(timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
