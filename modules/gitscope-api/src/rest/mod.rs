use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use tracing::{info, warn};

use gitscope_common::AnalyzeError;

use crate::AppState;

// --- Request bodies ---

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    username: Option<String>,
}

// --- Helpers ---

pub fn error_response(err: &AnalyzeError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(serde_json::json!({ "error": err.public_message() })),
    )
        .into_response()
}

async fn analyze(state: &AppState, username: &str) -> Response {
    match state.aggregator.aggregate(username).await {
        Ok(record) => {
            info!(
                username = %record.identifier,
                narrative = record.narrative.status(),
                "Analysis served"
            );
            Json(record).into_response()
        }
        Err(e) => error_response(&e),
    }
}

// --- Handlers ---

/// `GET /analyze/{username}`
pub async fn api_analyze_path(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> impl IntoResponse {
    analyze(&state, &username).await
}

/// `POST /analyze` with `{"username": "..."}`
pub async fn api_analyze_body(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected analyze body");
            return error_response(&AnalyzeError::InvalidInput(
                "Request body must be JSON with a username field".to_string(),
            ));
        }
    };

    let username = body.username.unwrap_or_default();
    analyze(&state, &username).await
}

/// `GET /analyze` with no username segment.
pub async fn api_analyze_missing() -> impl IntoResponse {
    error_response(&AnalyzeError::InvalidInput("Username is required".to_string()))
}
