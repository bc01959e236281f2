//! Common test utilities and fixtures for integration tests.
//!
//! Documents live in memory, so every test gets a fresh store and no
//! external services are needed.

pub mod fixtures;

use axum::Router;
use axum_test::TestServer;
use uuid::Uuid;

use recitation_backend::{router, AppState};

/// Test context holding the shared state and the router built on it.
pub struct TestContext {
    pub state: AppState,
    app: Router,
}

impl TestContext {
    pub fn new() -> Self {
        let state = AppState::new();
        let app = router(state.clone());
        Self { state, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Start a test server on this context.
    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }

    /// Load study material directly into the store and return its ID.
    pub fn load_document(&self, name: &str, content: &str) -> Uuid {
        self.state
            .documents
            .load(name, content)
            .expect("Failed to load test document")
            .document
            .id
    }
}
