//! Statistics endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tokio::sync::RwLock;

use super::{bad_request, not_found, strip_json};
use crate::mock_server::state::MockState;

/// Query parameters for the by-date endpoint.
#[derive(Debug, Deserialize)]
pub struct ByDateParams {
    pub start_date: String,
    pub end_date: String,
}

/// GET /stats/account.json
pub async fn account_stats(State(state): State<Arc<RwLock<MockState>>>) -> impl IntoResponse {
    let state = state.read().await;
    (StatusCode::OK, Json(serde_json::json!(state.account_stats))).into_response()
}

/// GET /stats/account/by_date.json
pub async fn account_stats_by_date(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(params): Query<ByDateParams>,
) -> impl IntoResponse {
    let parse = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d");
    let (Ok(start), Ok(end)) = (parse(&params.start_date), parse(&params.end_date)) else {
        return bad_request("start_date and end_date must be YYYY-MM-DD");
    };
    if start > end {
        return bad_request("start_date is after end_date");
    }

    let state = state.read().await;
    (StatusCode::OK, Json(state.stats_by_date(start, end))).into_response()
}

/// GET /stats/projects/{publicId}.json
pub async fn project_stats(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(file): Path<String>,
) -> impl IntoResponse {
    let Some(public_id) = strip_json(&file) else {
        return not_found("Resource", &file);
    };

    let state = state.read().await;

    if !state.projects.contains_key(public_id) {
        return not_found("Project", public_id);
    }
    (StatusCode::OK, Json(serde_json::json!(state.project_stats(public_id)))).into_response()
}

/// GET /stats/medias/{hashedId}.json
pub async fn media_stats(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(file): Path<String>,
) -> impl IntoResponse {
    let Some(id) = strip_json(&file) else {
        return not_found("Resource", &file);
    };

    let state = state.read().await;

    match state.medias.get(id) {
        Some(media) => (StatusCode::OK, Json(serde_json::json!(media.stats))).into_response(),
        None => not_found("Media", id),
    }
}
