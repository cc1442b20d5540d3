use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::error::InferError;
use crate::normalize;
use crate::score::{self, ScoreResult};
use crate::telemetry::{RequestStats, StatsSnapshot};
use crate::util;
use crate::window::{IntervalWindow, KeystrokeEvent};

#[derive(Clone)]
pub struct ApiState {
    pub stats: Arc<RequestStats>,
    pub server_mode_delay_ms: u64,
    pub log_requests: bool,
}

/// Body of `POST /api/infer`. `mode` is optional; "server" asks for the
/// artificial processing delay, "simple" (or absent) does not.
#[derive(Debug, Clone, Deserialize)]
pub struct InferRequest {
    pub events: Vec<KeystrokeEvent>,
    pub mode: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub stats: StatsSnapshot,
}

impl IntoResponse for InferError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

pub fn router(state: ApiState, cors_origin: &str) -> Router {
    Router::new()
        .route("/api/infer", post(infer))
        .route("/api/health", get(health))
        .with_state(state)
        .layer(cors_layer(cors_origin))
}

pub async fn serve(
    addr: String,
    state: ApiState,
    cors_origin: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = router(state, &cors_origin);

    let addr: SocketAddr = addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Run the full extractor → normalizer → scorer pipeline for one request.
///
/// Pure apart from a diagnostic log line; shared by the handler and the
/// integration tests.
pub fn score_events(request: &InferRequest) -> Result<ScoreResult, InferError> {
    validate(request)?;

    let window = IntervalWindow::from_events(&request.events)?;
    if let Some(summary) = util::summarize(window.as_slice()) {
        debug!(
            "cadence mean {:.1}ms, std dev {:.1}ms",
            summary.mean_ms, summary.std_dev_ms
        );
    }

    let normalized = normalize::min_max(window.as_slice());
    Ok(score::analyze(&normalized))
}

fn validate(request: &InferRequest) -> Result<(), InferError> {
    if request.events.is_empty() {
        return Err(InferError::Validation(
            "events must be a non-empty array".to_string(),
        ));
    }

    for event in &request.events {
        if !event.timestamp.is_finite() {
            return Err(InferError::Validation(
                "event timestamps must be finite numbers".to_string(),
            ));
        }
    }

    match request.mode.as_deref() {
        None | Some("simple") | Some("server") => Ok(()),
        Some(other) => Err(InferError::Validation(format!(
            "mode must be \"simple\" or \"server\", got \"{other}\""
        ))),
    }
}

pub async fn infer(
    State(state): State<ApiState>,
    payload: Result<Json<InferRequest>, JsonRejection>,
) -> Result<Json<ScoreResult>, InferError> {
    let started = Instant::now();

    // Bodies that fail to deserialize belong to the same closed taxonomy as
    // post-parse validation failures: 400 with a JSON error body, counted as
    // rejected.
    let Json(payload) = payload.map_err(|rejection| {
        state.stats.record_rejected();
        warn!("request rejected: malformed body: {rejection}");
        InferError::Validation(format!("malformed request body: {}", rejection.body_text()))
    })?;

    let result = match score_events(&payload) {
        Ok(result) => result,
        Err(err) => {
            state.stats.record_rejected();
            warn!("request rejected: {err}");
            return Err(err);
        }
    };

    // Artificial load simulation, requested per-call. No scheduling
    // consequence beyond this one await.
    if payload.mode.as_deref() == Some("server") && state.server_mode_delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(state.server_mode_delay_ms)).await;
    }

    state.stats.record_scored();
    if state.log_requests {
        debug!(
            "scored {} events as {:?} ({:.4}) in {}ms",
            payload.events.len(),
            result.suggested_tone,
            result.score,
            started.elapsed().as_millis()
        );
    }

    Ok(Json(result))
}

pub async fn health(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        stats: state.stats.snapshot(),
    })
}

fn cors_layer(origin: &str) -> CorsLayer {
    let cors = if origin.trim() == "*" {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = origin
            .split(',')
            .filter_map(|entry| {
                let entry = entry.trim();
                match entry.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!("ignoring unparseable CORS origin {entry:?}");
                        None
                    }
                }
            })
            .collect::<Vec<_>>();
        if origins.is_empty() {
            warn!("no usable CORS origins configured; cross-origin requests will be blocked");
        }
        CorsLayer::new().allow_origin(AllowOrigin::list(origins))
    };

    cors.allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}
