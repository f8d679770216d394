//! Mock Wistia API server.
//!
//! Provides an axum-based HTTP server that simulates the Wistia API.

use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// A mock Wistia API server for testing.
///
/// The server runs in the background and can be used to test the Wistia
/// client against a realistic API implementation. Every route except
/// `/health` rejects requests without HTTP basic credentials.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL when creating a `WistiaClient` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new()
            .with_account(scenario.account)
            .with_account_stats(scenario.account_stats);

        for project in scenario.projects {
            state = state.with_project(project);
        }

        for media in scenario.medias {
            state = state.with_media(media);
        }

        for (day, stats) in scenario.daily_stats {
            state = state.with_daily_stats(day, stats);
        }

        state
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Account routes
            .route("/account.json", get(handlers::get_account))
            // Project routes
            .route(
                "/projects.json",
                get(handlers::list_projects).post(handlers::create_project),
            )
            .route(
                "/projects/:file",
                get(handlers::get_project)
                    .put(handlers::update_project)
                    .delete(handlers::delete_project),
            )
            // Media routes
            .route("/medias.json", get(handlers::list_medias))
            .route(
                "/medias/:file",
                get(handlers::get_media)
                    .put(handlers::update_media)
                    .delete(handlers::delete_media),
            )
            // Stats routes
            .route("/stats/account.json", get(handlers::account_stats))
            .route(
                "/stats/account/by_date.json",
                get(handlers::account_stats_by_date),
            )
            .route("/stats/projects/:file", get(handlers::project_stats))
            .route("/stats/medias/:file", get(handlers::media_stats))
            .layer(middleware::from_fn(require_basic_auth))
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Reject requests that carry no basic credentials, as Wistia does.
async fn require_basic_auth(request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("Basic "));

    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "Invalid credentials" })),
        )
            .into_response();
    }
    next.run(request).await
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
