//! # HTTP API
//!
//! - `GET /tide-timings` - scrape and return `{"data": [TideMonth, ...]}`,
//!   or `502 {"error": "..."}` when the upstream page can't be used
//! - `GET /check-health` - service status and uptime

use crate::tide_data::TimingsSource;
use crate::TideMonth;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared handler state.
#[derive(Clone)]
pub struct ApiState {
    pub source: Arc<dyn TimingsSource>,
    pub started_at: Instant,
}

impl ApiState {
    pub fn new(source: Arc<dyn TimingsSource>) -> Self {
        Self {
            source,
            started_at: Instant::now(),
        }
    }
}

/// Successful `/tide-timings` body
#[derive(Debug, Serialize)]
pub struct TimingsResponse {
    pub data: Vec<TideMonth>,
}

/// Failure body for any endpoint
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// `/check-health` body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub service: ServiceStatus,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub status: &'static str,
    /// Time since startup, e.g. "1h2m3s"
    pub uptime: String,
}

/// Build the application router with request tracing and panic recovery.
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/tide-timings", get(get_tide_timings))
        .route("/check-health", get(check_health))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .with_state(state)
}

/// GET /tide-timings
async fn get_tide_timings(State(state): State<ApiState>) -> Response {
    match state.source.tide_timings().await {
        Ok(data) => {
            info!(months = data.len(), "Served tide timings");
            (StatusCode::OK, Json(TimingsResponse { data })).into_response()
        }
        Err(e) => {
            warn!(error = %e, "Tide timings unavailable");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /check-health
async fn check_health(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        service: ServiceStatus {
            status: "ok",
            uptime: format_uptime(state.started_at.elapsed()),
        },
        timestamp: Utc::now(),
    })
}

/// Compact duration such as `"3s"`, `"4m0s"` or `"1h2m3s"`.
pub fn format_uptime(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
