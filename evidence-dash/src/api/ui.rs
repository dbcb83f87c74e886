//! UI serving routes
//!
//! The dashboard page is rendered on each request from a fresh snapshot of
//! the evidence data. The script and stylesheet are embedded assets.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use evidence_common::Snapshot;
use tracing::info;

use super::ApiError;
use crate::view;
use crate::AppState;

const APP_JS: &str = include_str!("../ui/app.js");
const DASHBOARD_CSS: &str = include_str!("../ui/dashboard.css");
const PLACEHOLDER_SVG: &str = include_str!("../ui/placeholder.svg");

/// GET /
///
/// Loads the combined data once and renders every view from that snapshot.
/// A load failure still produces a page, carrying the error banner.
pub async fn serve_dashboard(State(state): State<AppState>) -> Html<String> {
    let loaded = match state.store.get_all_data().await {
        Ok(items) => {
            info!("Rendering dashboard for {} tags", items.len());
            Ok(Snapshot::new(items))
        }
        Err(e) => Err(format!(
            "Failed to load evidence data: {}",
            ApiError::from(e).message()
        )),
    };

    Html(view::render_dashboard(&loaded))
}

/// GET /static/app.js
pub async fn serve_app_js() -> Response {
    asset("application/javascript", APP_JS)
}

/// GET /static/dashboard.css
pub async fn serve_dashboard_css() -> Response {
    asset("text/css", DASHBOARD_CSS)
}

/// GET /static/placeholder.svg
///
/// Shown in place of any evidence photo that fails to load.
pub async fn serve_placeholder() -> Response {
    asset("image/svg+xml", PLACEHOLDER_SVG)
}

fn asset(content_type: &'static str, body: &'static str) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], body).into_response()
}
