//! HTTP API handlers.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::debug;

use crate::metrics;

/// Banner returned by the root route.
pub const ROOT_BANNER: &str = "CareerAgent AI Server is running!";

/// Placeholder prediction returned until a real model is integrated.
pub const DUMMY_PREDICTION: &str = "dummy prediction";

/// Application state shared with handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Whether the server finished startup.
    pub ready: Arc<AtomicBool>,
    /// Number of predictions served since startup.
    pub predictions_served: Arc<AtomicU64>,
    /// When the server started.
    pub started_at: OffsetDateTime,
}

impl AppState {
    /// Create new app state.
    pub fn new() -> Self {
        Self {
            ready: Arc::new(AtomicBool::new(false)),
            predictions_served: Arc::new(AtomicU64::new(0)),
            started_at: OffsetDateTime::now_utc(),
        }
    }

    /// Set ready state.
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Check if ready.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Seconds elapsed since startup.
    pub fn uptime_seconds(&self) -> i64 {
        (OffsetDateTime::now_utc() - self.started_at).whole_seconds()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Prediction response.
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    /// Model output. Fixed placeholder until a model is integrated.
    pub prediction: &'static str,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    /// Whether service is ready.
    pub ready: bool,
}

/// Status response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Service status.
    pub status: &'static str,
    /// Startup timestamp (RFC 3339), if it could be formatted.
    pub started_at: Option<String>,
    /// Uptime in whole seconds.
    pub uptime_seconds: i64,
    /// Predictions served since startup.
    pub predictions_served: u64,
}

/// Root handler - returns the plain text service banner.
pub async fn root() -> impl IntoResponse {
    ROOT_BANNER
}

/// Prediction handler - returns the fixed placeholder for any JSON input.
///
/// The body is parsed and then discarded; there is no model behind this
/// endpoint yet. Non-JSON bodies never reach the handler: the extractor
/// rejects a malformed body with 400 and a missing `application/json`
/// content type with 415.
pub async fn predict(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> impl IntoResponse {
    let _timer = metrics::timer_predict();

    state.predictions_served.fetch_add(1, Ordering::SeqCst);
    metrics::inc_predictions_served();

    debug!(
        fields = payload.as_object().map_or(0, |object| object.len()),
        "prediction requested"
    );

    Json(PredictionResponse {
        prediction: DUMMY_PREDICTION,
    })
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    metrics::inc_health_checks();
    Json(HealthResponse { status: "ok" })
}

/// Readiness check handler - returns 200 if ready, 503 otherwise.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let is_ready = state.is_ready();

    let response = ReadyResponse { ready: is_ready };

    if is_ready {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}

/// Status handler - returns service status and counters.
pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    let status = if state.is_ready() { "running" } else { "starting" };

    Json(StatusResponse {
        status,
        started_at: state.started_at.format(&Rfc3339).ok(),
        uptime_seconds: state.uptime_seconds(),
        predictions_served: state.predictions_served.load(Ordering::SeqCst),
    })
}

/// Metrics handler - renders the Prometheus text exposition.
pub async fn metrics_text() -> impl IntoResponse {
    metrics::render()
}
