pub mod api;

use std::sync::Arc;

use axum::{
    body::to_bytes,
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde_json::Value;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::api::{ApiError, EstimateResponse};
use footprint_core::{Activity, Estimator};

// Bodies past this are a 500 with details, never a 413
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

// Shared, read-only per process
#[derive(Clone)]
pub struct AppState {
    pub estimator: Arc<Estimator>,
}

impl AppState {
    pub fn new(estimator: Estimator) -> Self {
        Self {
            estimator: Arc::new(estimator),
        }
    }
}

/// Routes for the estimate endpoint, also reachable under the Netlify
/// function path browser clients already call.
pub fn app(state: AppState) -> Router {
    let estimate_routes = Router::new()
        .route("/estimate", any(estimate))
        .route("/.netlify/functions/estimate", any(estimate))
        .layer(cors_header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .layer(cors_header(header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"))
        .layer(cors_header(header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"))
        .layer(cors_header(header::CONTENT_TYPE, "application/json"));

    Router::new()
        .route("/health", get(health_check))
        .merge(estimate_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_header(
    name: header::HeaderName,
    value: &'static str,
) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
}

// --- HANDLERS ---

async fn health_check() -> &'static str {
    "Footprint Gateway: Operational"
}

async fn estimate(State(state): State<AppState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();

    // Drain before replying so the client finishes its upload.
    let body = to_bytes(body, MAX_BODY_BYTES).await;

    if parts.method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    if parts.method != Method::POST {
        return ApiError::MethodNotAllowed.into_response();
    }

    let result = match body {
        Ok(body) => run_estimate(&state.estimator, &body).await,
        Err(e) => Err(ApiError::Unexpected(format!(
            "failed to read request body: {}",
            e
        ))),
    };

    match result {
        Ok(value) => (StatusCode::OK, Json(EstimateResponse { value })).into_response(),
        Err(e) => {
            log_failure(&e);
            e.into_response()
        }
    }
}

async fn run_estimate(estimator: &Estimator, body: &[u8]) -> Result<f64, ApiError> {
    let payload: Value =
        serde_json::from_slice(body).map_err(|e| ApiError::Unexpected(e.to_string()))?;
    if payload.is_null() {
        return Err(ApiError::Unexpected("request body is null".to_string()));
    }

    let activity =
        Activity::from_field(payload.get("activity")).ok_or(ApiError::ActivityRequired)?;
    info!("Estimating activity: {}", activity.as_str());

    let estimate = estimator.estimate(&activity).await?;
    info!("Estimate: {} kg CO2e", estimate.value);
    Ok(estimate.value)
}

fn log_failure(e: &ApiError) {
    match e {
        ApiError::Unexpected(msg) => error!("Function error: {}", msg),
        // already logged with the upstream payload by the estimator
        ApiError::Estimate(footprint_core::EstimateError::Upstream(_)) => {}
        ApiError::Estimate(err) if err.exposes_details() => error!("Function error: {}", err),
        ApiError::Estimate(err) => info!("Rejected estimate: {}", err),
        ApiError::MethodNotAllowed | ApiError::ActivityRequired => {}
    }
}
