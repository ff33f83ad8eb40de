//! API handlers

use crate::core::hit::Hit;
use crate::core::stats;
use crate::router::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use serde_json::json;

fn server_error() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "success": false, "message": "internal server error" })),
    )
}

pub async fn ping_handler() -> impl IntoResponse {
    "pong"
}

/// POST /api/collect - validate one hit submission and persist it
pub async fn collect_handler(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let payload: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!("unreadable collect payload: {}", e);
            return server_error();
        }
    };

    match Hit::from_payload(&payload) {
        Ok(hit) => {
            state.store.append(hit);
            (StatusCode::OK, Json(json!({ "success": true })))
        }
        Err(msg) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "message": msg })),
        ),
    }
}

#[derive(Debug, Deserialize)]
pub struct StatsParams {
    pub grouped: Option<String>,
}

/// GET /api/stats - full hit list, plus grouped analytics on request
pub async fn stats_handler(
    State(state): State<AppState>,
    Query(params): Query<StatsParams>,
) -> impl IntoResponse {
    let hits = state.store.read_all();
    let grouped = params.grouped.as_deref() == Some("true");

    let analytics = if grouped && !hits.is_empty() {
        Some(stats::compute(&hits))
    } else {
        None
    };

    let mut body = json!({
        "totalHits": hits.len(),
        "hits": hits,
    });

    if let Some(analytics) = analytics {
        match serde_json::to_value(analytics) {
            Ok(value) => body["analytics"] = value,
            Err(e) => {
                tracing::error!("failed to serialize analytics: {}", e);
                return server_error();
            }
        }
    }

    (StatusCode::OK, Json(body))
}
