//! Mock Wistia API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Wistia API
//! for integration and end-to-end testing. Unlike wiremock which mocks at the
//! HTTP level per-test, this server maintains state across requests, enabling
//! realistic workflow testing.
//!
//! # Example
//!
//! ```ignore
//! use wistia::mock_server::MockServer;
//! use wistia::{Account, WistiaClient};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = WistiaClient::new("test-key", server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let account = Account::with_client(client).await.unwrap();
//!     assert_eq!(account.name(), Some("Test Account"));
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::{media_summary, MockAccount, MockMedia, MockProject, MockState};
