//! Media endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Form, Json,
};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{not_found, strip_json, PageQuery};
use crate::mock_server::state::{media_summary, MockState};

/// Query parameters for listing medias.
#[derive(Debug, Default, Deserialize)]
pub struct ListMediasQuery {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    pub project_id: Option<u64>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
}

/// Form body for updating a media.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateMediaForm {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// GET /medias.json
pub async fn list_medias(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<ListMediasQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    let project = query
        .project_id
        .and_then(|id| state.projects.values().find(|p| p.id == id))
        .map(|p| p.public_id.clone());

    let medias: Vec<Value> = state
        .medias
        .values()
        .filter(|m| query.project_id.is_none() || project.as_deref() == Some(m.project.as_str()))
        .filter(|m| query.media_type.as_deref().map_or(true, |t| t == m.media_type))
        .map(media_summary)
        .collect();

    let page = PageQuery {
        page: query.page,
        per_page: query.per_page,
    };
    (StatusCode::OK, Json(page.apply(medias))).into_response()
}

/// GET /medias/{id}.json
///
/// Accepts the numeric or the hashed ID.
pub async fn get_media(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(file): Path<String>,
) -> impl IntoResponse {
    let Some(id) = strip_json(&file) else {
        return not_found("Resource", &file);
    };

    let state = state.read().await;

    match state.find_media(id) {
        Some(media) => (StatusCode::OK, Json(serde_json::json!(media))).into_response(),
        None => not_found("Media", id),
    }
}

/// PUT /medias/{hashedId}.json
pub async fn update_media(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(file): Path<String>,
    Form(form): Form<UpdateMediaForm>,
) -> impl IntoResponse {
    let Some(id) = strip_json(&file) else {
        return not_found("Resource", &file);
    };

    let mut state = state.write().await;

    let Some(media) = state.medias.get_mut(id) else {
        return not_found("Media", id);
    };

    if let Some(name) = form.name {
        media.name = name;
    }
    if let Some(description) = form.description {
        media.description = description;
    }

    (StatusCode::OK, Json(serde_json::json!(media))).into_response()
}

/// DELETE /medias/{hashedId}.json
pub async fn delete_media(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(file): Path<String>,
) -> impl IntoResponse {
    let Some(id) = strip_json(&file) else {
        return not_found("Resource", &file);
    };

    let mut state = state.write().await;

    match state.medias.remove(id) {
        Some(media) => (StatusCode::OK, Json(serde_json::json!(media))).into_response(),
        None => not_found("Media", id),
    }
}
