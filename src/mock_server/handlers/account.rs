//! Account endpoint handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;

/// GET /account.json
pub async fn get_account(State(state): State<Arc<RwLock<MockState>>>) -> impl IntoResponse {
    let state = state.read().await;

    match &state.account {
        Some(account) => (StatusCode::OK, Json(serde_json::json!(account))).into_response(),
        None => super::not_found("Account", "current"),
    }
}
