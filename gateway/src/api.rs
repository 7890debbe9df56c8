use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use footprint_core::EstimateError;

// Output: a successful estimate in kg CO2e
#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub value: f64,
}

// Output: every failure, with `details` only where we choose to expose them
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: &'static str) -> Self {
        Self { error, details: None }
    }

    pub fn server_error(details: impl ToString) -> Self {
        Self {
            error: "Server error",
            details: Some(details.to_string()),
        }
    }
}

/// A failed estimate request, already classified by status.
#[derive(Debug)]
pub enum ApiError {
    MethodNotAllowed,
    ActivityRequired,
    /// Anything we did not anticipate; the message goes back to the caller.
    Unexpected(String),
    Estimate(EstimateError),
}

impl From<EstimateError> for ApiError {
    fn from(e: EstimateError) -> Self {
        ApiError::Estimate(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                ErrorResponse::new("Method not allowed"),
            ),
            ApiError::ActivityRequired => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new("Activity is required"))
            }
            ApiError::Unexpected(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::server_error(msg))
            }
            ApiError::Estimate(EstimateError::Upstream(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Failed to estimate carbon footprint"),
            ),
            ApiError::Estimate(EstimateError::InvalidResult(_)) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Invalid estimation result"),
            ),
            ApiError::Estimate(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::server_error(e))
            }
        };
        (status, Json(body)).into_response()
    }
}
