//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext for setting up test environment with database
//! - Helper functions for creating users and subjects
//! - Authentication helpers
//!
//! # Requirements
//! Database-backed tests require a PostgreSQL database (set DATABASE_URL env var).

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use uuid::Uuid;

use study_backend::db::Database;
use study_backend::routes::auth::{generate_token, hash_token};
use study_backend::{router, AppState};
use study_core::Scheduler;

/// Test context containing database connection and router.
///
/// Requires DATABASE_URL environment variable to be set.
pub struct TestContext {
    pub db: Arc<Database>,
    app: Router,
}

impl TestContext {
    /// Create a new test context.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or database connection fails.
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

        let db = Database::connect(&database_url, 5)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        Self::with_database(db)
    }

    /// Create a context whose pool never connects unless a query runs.
    ///
    /// Use this for tests that stop before touching the database.
    pub fn without_database() -> Self {
        let db = Database::connect_lazy("postgres://localhost/study_unused")
            .expect("Failed to build lazy pool");
        Self::with_database(db)
    }

    fn with_database(db: Database) -> Self {
        let db = Arc::new(db);
        let state = AppState {
            db: db.clone(),
            scheduler: Scheduler::default(),
        };

        Self {
            db,
            app: router(state),
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Test server over the router.
    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }

    /// Create a test user and return its ID and token.
    pub async fn create_test_user(&self) -> (Uuid, String) {
        let token = generate_token();
        let user = self
            .db
            .create_user(&hash_token(&token), Some("test user"))
            .await
            .expect("Failed to create test user");
        (user.id, token)
    }

    /// Format authorization header value.
    pub fn auth_header_value(token: &str) -> String {
        format!("Bearer {}", token)
    }

    /// Create a subject through the API and return its slug.
    pub async fn create_subject(&self, server: &TestServer, token: &str, name: &str) -> String {
        let response = server
            .post("/api/subjects")
            .add_header(
                axum::http::header::AUTHORIZATION,
                Self::auth_header_value(token),
            )
            .json(&fixtures::create_subject_request(name))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        body["slug"].as_str().unwrap().to_string()
    }

    /// Create an item through the API and return its ID.
    pub async fn create_item(
        &self,
        server: &TestServer,
        token: &str,
        slug: &str,
        body: serde_json::Value,
    ) -> Uuid {
        let response = server
            .post(&format!("/api/subjects/{}/items", slug))
            .add_header(
                axum::http::header::AUTHORIZATION,
                Self::auth_header_value(token),
            )
            .json(&body)
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        Uuid::parse_str(body["item"]["id"].as_str().unwrap()).unwrap()
    }

    /// Clean up test data for a user.
    ///
    /// Subjects, items and progress cascade from the user row.
    pub async fn cleanup_user(&self, user_id: Uuid) {
        let _ = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;
    }
}
