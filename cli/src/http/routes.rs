//! HTTP route handlers.

use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;

use crate::http::{models::*, state::AppState, validation::validate_task};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/run", post(run_handler))
        .route("/read", get(read_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// POST /run?task=... - classify and execute one chore
async fn run_handler(
    State(state): State<AppState>,
    Query(query): Query<RunQuery>,
) -> Result<Json<RunResponse>, HttpServerError> {
    state.record_request("/run");

    if let Err(err) = validate_task(&query.task) {
        state.record_error();
        return Err(err);
    }

    match state.agent.run_task(&query.task).await {
        Ok(_) => Ok(Json(RunResponse::success())),
        Err(err) => {
            state.record_error();
            Err(err.into())
        }
    }
}

/// GET /read?path=... - return a file verbatim as text
async fn read_handler(
    State(state): State<AppState>,
    Query(query): Query<ReadQuery>,
) -> Result<String, HttpServerError> {
    state.record_request("/read");

    state.agent.read_file(&query.path).await.map_err(|err| {
        state.record_error();
        HttpServerError::from(err)
    })
}

/// GET /health
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let (uptime_seconds, requests_handled, requests_by_endpoint, errors_total) =
        match state.stats.read() {
            Ok(stats) => (
                stats.uptime_seconds(),
                stats.requests_total,
                stats.requests_by_endpoint.clone(),
                stats.errors_total,
            ),
            Err(_) => (0.0, 0, BTreeMap::new(), 0),
        };

    Json(HealthResponse {
        status: "healthy".to_string(),
        session_id: state.session_id.clone(),
        uptime_seconds,
        requests_handled,
        requests_by_endpoint,
        errors_total,
        timestamp: Local::now().to_rfc3339(),
    })
}
