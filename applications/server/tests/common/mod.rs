//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use moon_server::{
    api,
    services::{AuthService, Clock, FileStorage},
    state::AppState,
};
use moon_storage::Database;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key";
pub const TEST_EXPIRE_MINUTES: u64 = 30;
/// Lowest cost bcrypt accepts; keeps the suite fast
pub const TEST_BCRYPT_COST: u32 = 4;

/// Create a test database with migrations applied.
///
/// Backed by a real file; an in-memory pool would hand each connection its
/// own empty database.
pub async fn create_test_database() -> anyhow::Result<(Arc<Database>, TempDir)> {
    let temp_dir = tempfile::tempdir()?;
    let db_url = format!("sqlite://{}", temp_dir.path().join("moon.db").display());
    let db = Database::new(&db_url).await?;
    Ok((Arc::new(db), temp_dir))
}

pub fn create_test_auth_service() -> AuthService {
    AuthService::new(
        TEST_SECRET.to_string(),
        TEST_EXPIRE_MINUTES,
        TEST_BCRYPT_COST,
    )
}

/// Clock that only moves when told to
pub struct TestClock(Mutex<chrono::DateTime<chrono::Utc>>);

impl TestClock {
    pub fn at(timestamp: i64) -> Arc<Self> {
        let start = chrono::DateTime::from_timestamp(timestamp, 0).expect("valid timestamp");
        Arc::new(Self(Mutex::new(start)))
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.0.lock().unwrap();
        *now += by;
    }
}

impl Clock for TestClock {
    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        *self.0.lock().unwrap()
    }
}

/// A router wired to a throwaway database and media directory
pub struct TestApp {
    pub app: Router,
    pub db: Arc<Database>,
    pub auth_service: Arc<AuthService>,
    pub media_dir: TempDir,
    _db_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_public_url(None).await
    }

    pub async fn with_public_url(public_url: Option<String>) -> Self {
        let (db, db_dir) = create_test_database().await.unwrap();

        let media_dir = TempDir::new().unwrap();
        let file_storage = FileStorage::new(media_dir.path().to_path_buf());
        file_storage.initialize().await.unwrap();

        let auth_service = Arc::new(create_test_auth_service());

        let app_state = AppState::new(db.clone(), Arc::clone(&auth_service), Arc::new(file_storage))
            .with_public_url(public_url);

        Self {
            app: api::router(app_state, 1024 * 1024),
            db,
            auth_service,
            media_dir,
            _db_dir: db_dir,
        }
    }

    /// Send a request and return status plus parsed JSON body (`Null` if empty)
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let body = if body_bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(serde_json::Value::Null)
        };

        (status, body)
    }

    pub async fn signup(&self, username: &str, password: &str) -> (StatusCode, serde_json::Value) {
        let body = serde_json::json!({
            "firstname": "Test",
            "lastname": "User",
            "username": username,
            "password": password,
        });
        self.send(json_request("POST", "/auth/signup", None, &body))
            .await
    }

    pub async fn login(&self, username: &str, password: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .uri("/auth/token")
            .method("POST")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!(
                "grant_type=password&username={}&password={}",
                username, password
            )))
            .unwrap();
        self.send(request).await
    }

    /// Sign up and log in, returning the bearer token
    pub async fn register(&self, username: &str) -> String {
        let (status, _) = self.signup(username, "password123").await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = self.login(username, "password123").await;
        assert_eq!(status, StatusCode::OK);
        body["access_token"].as_str().unwrap().to_string()
    }

    pub async fn create_song(&self, title: &str) -> i64 {
        let body = serde_json::json!({
            "title": title,
            "album": "Album",
            "artist": "Artist",
            "thumbnail": "http://localhost/static/cover.png",
            "data": "http://localhost/static/song.mp3",
        });
        let (status, song) = self.send(json_request("POST", "/songs/", None, &body)).await;
        assert_eq!(status, StatusCode::OK);
        song["id"].as_i64().unwrap()
    }
}

pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: &serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .uri(uri)
        .method(method)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    builder
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri).method(method);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    builder.body(Body::empty()).unwrap()
}

/// Single-part multipart body carrying `data` as the `file` field
pub fn upload_request(content_type: &str, filename: &str, data: &[u8]) -> Request<Body> {
    const BOUNDARY: &str = "moon-test-boundary";

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .uri("/files/")
        .method("POST")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(header::HOST, "media.test")
        .body(Body::from(body))
        .unwrap()
}
