use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Request-time failure returned as a JSON body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error: &'static str,
    message: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, error: &'static str, message: Option<String>) -> Self {
        Self {
            status,
            error,
            message,
        }
    }

    pub fn quota_exceeded() -> Self {
        Self::new(
            StatusCode::TOO_MANY_REQUESTS,
            "Daily quota exceeded. Upgrade to premium for unlimited quotes.",
            None,
        )
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "Invalid request body",
            Some(message.into()),
        )
    }

    pub fn render_failed(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to generate quote image",
            Some(message.into()),
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, message = ?self.message, "{}", self.error);
        } else {
            tracing::debug!(status = %self.status, message = ?self.message, "{}", self.error);
        }
        let body = ErrorBody {
            error: self.error,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
