//! Project endpoint handlers.

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

use super::{bad_request, flag, not_found, strip_json, PageQuery};
use crate::mock_server::state::MockState;

/// Form body for creating a project.
#[derive(Debug, Deserialize)]
pub struct CreateProjectForm {
    pub name: Option<String>,
}

/// Form body for updating a project.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectForm {
    pub name: Option<String>,
    pub public: Option<String>,
    pub anonymous_can_upload: Option<String>,
    pub anonymous_can_download: Option<String>,
}

/// GET /projects.json
pub async fn list_projects(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    let projects: Vec<Value> = state
        .projects
        .values()
        .map(|p| state.project_json(p, false))
        .collect();

    (StatusCode::OK, Json(query.apply(projects))).into_response()
}

/// POST /projects.json
pub async fn create_project(
    State(state): State<Arc<RwLock<MockState>>>,
    Form(form): Form<CreateProjectForm>,
) -> impl IntoResponse {
    let Some(name) = form.name.filter(|n| !n.is_empty()) else {
        return bad_request("name is required");
    };

    let mut state = state.write().await;
    let public_id = state.create_project(&name);

    match state.projects.get(&public_id) {
        Some(project) => (StatusCode::CREATED, Json(state.project_json(project, true))).into_response(),
        None => not_found("Project", &public_id),
    }
}

/// GET /projects/{publicId}.json
pub async fn get_project(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(file): Path<String>,
) -> impl IntoResponse {
    let Some(public_id) = strip_json(&file) else {
        return not_found("Resource", &file);
    };

    let state = state.read().await;

    match state.projects.get(public_id) {
        Some(project) => (StatusCode::OK, Json(state.project_json(project, true))).into_response(),
        None => not_found("Project", public_id),
    }
}

/// PUT /projects/{publicId}.json
pub async fn update_project(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(file): Path<String>,
    Form(form): Form<UpdateProjectForm>,
) -> impl IntoResponse {
    let Some(public_id) = strip_json(&file) else {
        return not_found("Resource", &file);
    };

    let mut state = state.write().await;

    let Some(project) = state.projects.get_mut(public_id) else {
        return not_found("Project", public_id);
    };

    if let Some(name) = form.name {
        project.name = name;
    }
    if let Some(public) = flag(form.public.as_deref()) {
        project.public = public;
    }
    if let Some(upload) = flag(form.anonymous_can_upload.as_deref()) {
        project.anonymous_can_upload = upload;
    }
    if let Some(download) = flag(form.anonymous_can_download.as_deref()) {
        project.anonymous_can_download = download;
    }
    project.updated = "2012-10-12T12:00:00+00:00".to_string();

    let project = project.clone();
    (StatusCode::OK, Json(state.project_json(&project, true))).into_response()
}

/// DELETE /projects/{publicId}.json
pub async fn delete_project(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(file): Path<String>,
) -> impl IntoResponse {
    let Some(public_id) = strip_json(&file) else {
        return not_found("Resource", &file);
    };

    let mut state = state.write().await;

    match state.delete_project(public_id) {
        Some(project) => (StatusCode::OK, Json(serde_json::json!(project))).into_response(),
        None => not_found("Project", public_id),
    }
}
