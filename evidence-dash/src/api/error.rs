//! HTTP mapping of aggregator errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use evidence_common::Error;
use serde_json::json;
use tracing::error;

/// Error returned by the JSON endpoints
///
/// `NotFound` becomes a 404 carrying the aggregator's message. Anything else
/// is logged in full and reported as a 500 with a fixed message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let message = match &err {
            Error::NotFound(message) => {
                return Self {
                    status: StatusCode::NOT_FOUND,
                    message: message.clone(),
                }
            }
            Error::Read { .. } => "Failed to read evidence data",
            Error::Parse { .. } => "Evidence data is not valid JSON",
            Error::Config(_) => "Internal server error",
        };

        // Paths and parser detail stay in the log
        error!("{}", err);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
        }));

        (self.status, body).into_response()
    }
}
