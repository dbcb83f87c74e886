//! HTTP API handlers for evidence-dash

pub mod buildinfo;
pub mod data;
pub mod error;
pub mod health;
pub mod ui;

pub use buildinfo::get_build_info;
pub use data::{get_all_data, get_detection, get_summary, list_detections, list_tags};
pub use error::ApiError;
pub use health::health_routes;
pub use ui::{serve_app_js, serve_dashboard, serve_dashboard_css, serve_placeholder};
