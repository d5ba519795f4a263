//! Request and response bodies for the HTTP API.

use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use datachore_core::api::TaskError;
use serde::{Deserialize, Serialize};

pub const RUN_SUCCESS_MESSAGE: &str = "Task executed successfully.";

// ============= Run =============

#[derive(Debug, Deserialize)]
pub struct RunQuery {
    #[serde(default)]
    pub task: String,
}

#[derive(Debug, Serialize)]
pub struct RunResponse {
    pub message: String,
}

impl RunResponse {
    pub fn success() -> Self {
        Self {
            message: RUN_SUCCESS_MESSAGE.to_string(),
        }
    }
}

// ============= Read =============

#[derive(Debug, Deserialize)]
pub struct ReadQuery {
    #[serde(default)]
    pub path: String,
}

// ============= Health =============

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub session_id: String,
    pub uptime_seconds: f64,
    pub requests_handled: u64,
    pub requests_by_endpoint: BTreeMap<String, u64>,
    pub errors_total: u64,
    pub timestamp: String,
}

// ============= Error Handling =============

#[derive(Debug)]
pub enum HttpServerError {
    InvalidRequest(String),
    Task(TaskError),
    Internal(String),
}

impl From<TaskError> for HttpServerError {
    fn from(err: TaskError) -> Self {
        Self::Task(err)
    }
}

impl HttpServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Task(TaskError::NotRecognized) => StatusCode::BAD_REQUEST,
            Self::Task(TaskError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_code, detail) = match self {
            Self::InvalidRequest(msg) => ("INVALID_REQUEST", msg),
            Self::Task(err) => (err.code(), err.to_string()),
            Self::Internal(msg) => ("INTERNAL_ERROR", msg),
        };

        let body = serde_json::json!({
            "detail": detail,
            "error_code": error_code,
        });

        (status, Json(body)).into_response()
    }
}
