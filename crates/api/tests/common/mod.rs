//! Shared harness for HTTP integration tests.
//!
//! Every test gets its own in-memory database and temporary blob storage,
//! and drives the production router through `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{request, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use plantpal_api::auth::jwt::JwtConfig;
use plantpal_api::config::ServerConfig;
use plantpal_api::router::build_app_router;
use plantpal_api::state::AppState;
use plantpal_api::storage::BlobStore;
use plantpal_db::models::plant::Plant;
use plantpal_db::DbPool;
use tempfile::TempDir;
use tower::ServiceExt;

pub const PUBLIC_BASE_URL: &str = "http://plantpal.test";
pub const PASSWORD: &str = "monstera-lover";

/// A router plus handles on its database and storage directory.
pub struct TestApp {
    pub app: Router,
    pub pool: DbPool,
    /// Kept alive for the duration of the test.
    pub storage: TempDir,
}

impl TestApp {
    pub fn storage_path(&self) -> PathBuf {
        self.storage.path().to_path_buf()
    }
}

/// Build a test `ServerConfig` rooted at the given storage directory.
pub fn test_config(storage_root: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_upload_bytes: 1024 * 1024,
        storage_root,
        public_base_url: PUBLIC_BASE_URL.to_string(),
        cookie_secure: false,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            session_expiry_hours: 1,
        },
    }
}

/// Build the full application with a fresh migrated database.
pub async fn spawn_app() -> TestApp {
    let pool = plantpal_db::create_pool("sqlite::memory:")
        .await
        .expect("in-memory pool");
    plantpal_db::run_migrations(&pool)
        .await
        .expect("migrations apply");

    let storage = tempfile::tempdir().expect("temp storage dir");
    let config = test_config(storage.path().to_path_buf());
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        blobs: Arc::new(BlobStore::new(storage.path(), PUBLIC_BASE_URL)),
    };

    TestApp {
        app: build_app_router(state, &config),
        pool,
        storage,
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

fn with_cookie(builder: request::Builder, cookie: Option<&str>) -> request::Builder {
    match cookie {
        Some(c) => builder.header(COOKIE, c),
        None => builder,
    }
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let request = with_cookie(Request::get(uri), cookie)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// POST an `application/x-www-form-urlencoded` body.
pub async fn post_form(
    app: &Router,
    uri: &str,
    body: &str,
    cookie: Option<&str>,
) -> Response<Body> {
    let request = with_cookie(Request::post(uri), cookie)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

const BOUNDARY: &str = "plantpal-test-boundary";

/// POST a `multipart/form-data` body with the given `(field, file name, bytes)` parts.
pub async fn post_multipart(
    app: &Router,
    uri: &str,
    parts: &[(&str, &str, &[u8])],
    cookie: Option<&str>,
) -> Response<Body> {
    let mut body = Vec::new();
    for (field, file_name, bytes) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let request = with_cookie(Request::post(uri), cookie)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

/// Assert a `303 See Other` and return its `Location`.
pub fn assert_see_other(response: &Response<Body>) -> String {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response.headers()[LOCATION].to_str().unwrap().to_string()
}

/// The `name=value` pair of the session cookie set by a response.
pub fn session_cookie(response: &Response<Body>) -> String {
    let header = response.headers()[SET_COOKIE].to_str().unwrap();
    header.split(';').next().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Flows
// ---------------------------------------------------------------------------

/// Sign up a new account and return its session cookie.
pub async fn sign_up(app: &Router, email: &str) -> String {
    let body = format!("email={}&password={PASSWORD}", email.replace('@', "%40"));
    let response = post_form(app, "/sign-up", &body, None).await;
    assert_eq!(assert_see_other(&response), "/dashboard");
    session_cookie(&response)
}

/// Create a plant through the form and return its id.
pub async fn create_plant(app: &TestApp, cookie: &str, name: &str) -> i64 {
    let body = format!("name={}&species=Ficus&location=Office", name.replace(' ', "+"));
    let response = post_form(&app.app, "/dashboard/plants/add", &body, Some(cookie)).await;
    assert_eq!(assert_see_other(&response), "/dashboard/plants");

    let list = body_json(get(&app.app, "/dashboard/plants", Some(cookie)).await).await;
    list["data"]["plants"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["name"] == name)
        .and_then(|p| p["id"].as_i64())
        .expect("created plant should be listed")
}

/// Read a plant row directly, bypassing owner scoping.
pub async fn stored_plant(pool: &DbPool, id: i64) -> Plant {
    sqlx::query_as::<_, Plant>("SELECT * FROM plants WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .expect("plant row should exist")
}

/// Drop the plant-owned tables so every plant and task query fails.
pub async fn break_plant_tables(pool: &DbPool) {
    for table in ["care_tasks", "plant_entries", "plants"] {
        sqlx::query(&format!("DROP TABLE {table}"))
            .execute(pool)
            .await
            .expect("drop table");
    }
}
