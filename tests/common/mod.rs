// Shared helpers for the HTTP integration tests.
//
// Tests run against a real Postgres named by TEST_DATABASE_URL and are skipped
// when it is unset or unreachable.
#![allow(dead_code)]

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use fitsphere::api::create_routes;
use fitsphere::config::{run_migrations, AppConfig};
use serde_json::{json, Value};
use sqlx::{postgres::PgPoolOptions, PgPool};
use tower::ServiceExt;
use uuid::Uuid;

pub const PASSWORD: &str = "pw123456";

pub fn test_config() -> AppConfig {
    AppConfig {
        jwt_secret: "test_secret_key_for_testing_only".to_string(),
        bcrypt_cost: 4,
        allow_admin_registration: true,
        ..AppConfig::default()
    }
}

pub struct TestApp {
    pub router: Router,
    pub pool: PgPool,
}

#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: i64,
    pub email: String,
    pub token: String,
}

impl TestApp {
    /// Connect, migrate and build the router, or `None` when no test database is available.
    pub async fn spawn() -> Option<Self> {
        let Ok(database_url) = std::env::var("TEST_DATABASE_URL") else {
            println!("TEST_DATABASE_URL not set, skipping integration test");
            return None;
        };

        let pool = match PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await
        {
            Ok(pool) => pool,
            Err(err) => {
                println!("Test database not available ({err}), skipping integration test");
                return None;
            }
        };

        run_migrations(&pool).await.expect("migrations should apply");

        Some(Self::from_pool(pool))
    }

    /// Build the router over an already migrated pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            router: create_routes(pool.clone(), &test_config()),
            pool,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, value)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    /// Register with the given email and log in.
    pub async fn register_as(&self, name: &str, email: &str, role: &str) -> TestUser {
        let (status, body) = self
            .post(
                "/api/auth/register",
                None,
                json!({ "name": name, "email": email, "password": PASSWORD, "role": role }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");

        let token = self.login(email, PASSWORD).await;
        TestUser {
            id: body["id"].as_i64().unwrap(),
            email: email.to_string(),
            token,
        }
    }

    /// Register a user with a fresh, unique email.
    pub async fn register(&self, role: &str) -> TestUser {
        let email = format!("{role}-{}@example.com", Uuid::new_v4().simple());
        self.register_as(&format!("Test {role}"), &email, role).await
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .post(
                "/api/auth/login",
                None,
                json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["access_token"].as_str().unwrap().to_string()
    }

    pub async fn create_workout(&self, trainer: &TestUser, title: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/workouts",
                Some(&trainer.token),
                json!({ "title": title, "description": "integration test workout" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create workout failed: {body}");
        body["id"].as_i64().unwrap()
    }

    pub async fn delete_users_by_email(&self, emails: &[&str]) {
        sqlx::query("DELETE FROM users WHERE email = ANY($1)")
            .bind(emails.iter().map(|email| email.to_string()).collect::<Vec<_>>())
            .execute(&self.pool)
            .await
            .unwrap();
    }
}
