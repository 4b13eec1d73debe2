use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{Duration, NaiveDateTime, Utc};
use serde_json::{Value, json};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, SqliteConnection};
use tempfile::TempDir;
use tower::ServiceExt;

use crate::application::blog_service::BlogService;
use crate::data::repositories::sqlite::post_repository::SqlitePostRepository;
use crate::infrastructure::credentials::AdminCredentials;
use crate::presentation::AppState;
use crate::server::build_router;

const USERNAME: &str = "admin";
const PASSWORD: &str = "correct-horse";

async fn setup_app() -> (TempDir, Router) {
    let dir = tempfile::tempdir().expect("failed to create tempdir");
    let options = SqliteConnectOptions::new()
        .filename(dir.path().join("blog.db"))
        .create_if_missing(true);
    let app = app_for(options).await;
    (dir, app)
}

async fn app_for(options: SqliteConnectOptions) -> Router {
    let service = BlogService::new(SqlitePostRepository::new(options));
    // Fails for the broken-storage fixture; those tests only need the router.
    let _ = service.init_storage().await;

    let state = AppState::new(
        Arc::new(service),
        Arc::new(AdminCredentials::new(USERNAME, PASSWORD)),
    );
    build_router(state)
}

fn basic(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

fn json_request(method: &str, uri: &str, auth: Option<String>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request must build")
}

fn empty_request(method: &str, uri: &str, auth: Option<String>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::empty()).expect("request must build")
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body must be readable");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, headers, body)
}

async fn create(app: &Router, title: &str, content: &str) -> Value {
    let (status, _, body) = send(
        app,
        json_request(
            "POST",
            "/posts",
            Some(basic(USERNAME, PASSWORD)),
            json!({ "title": title, "content": content }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn health_reports_healthy_database() {
    let (_dir, app) = setup_app().await;

    let (status, _, body) = send(&app, empty_request("GET", "/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn health_reports_unavailable_when_storage_is_broken() {
    let dir = tempfile::tempdir().expect("failed to create tempdir");
    let app = app_for(SqliteConnectOptions::new().filename(dir.path())).await;

    let (status, _, body) = send(&app, empty_request("GET", "/health", None)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["detail"].is_string());

    let (status, _, body) = send(&app, empty_request("GET", "/posts", None)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "internal error");
}

#[tokio::test]
async fn unauthenticated_create_is_rejected_with_challenge() {
    let (_dir, app) = setup_app().await;

    let (status, headers, body) = send(
        &app,
        json_request("POST", "/posts", None, json!({ "title": "A", "content": "B" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let challenge = headers
        .get(header::WWW_AUTHENTICATE)
        .and_then(|value| value.to_str().ok())
        .expect("challenge header must be present");
    assert!(challenge.starts_with("Basic"));
    assert!(body["detail"].is_string());

    let (_, _, posts) = send(&app, empty_request("GET", "/posts", None)).await;
    assert_eq!(posts, json!([]));
}

#[tokio::test]
async fn wrong_password_is_rejected_for_every_mutation() {
    let (_dir, app) = setup_app().await;
    let created = create(&app, "A", "B").await;
    let id = created["id"].as_i64().expect("id must be an integer");
    let bad = || Some(basic(USERNAME, "wrong"));

    let (status, _, _) = send(
        &app,
        json_request("POST", "/posts", bad(), json!({ "title": "x", "content": "y" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = send(
        &app,
        json_request(
            "PUT",
            &format!("/posts/{id}"),
            bad(),
            json!({ "title": "x", "content": "y" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = send(&app, empty_request("DELETE", &format!("/posts/{id}"), bad())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, body) = send(&app, empty_request("GET", &format!("/posts/{id}"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "A");
}

#[tokio::test]
async fn create_then_delete_scenario() {
    let (_dir, app) = setup_app().await;

    let created = create(&app, "A", "B").await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["title"], "A");
    assert_eq!(created["content"], "B");

    let created_at = created["created_at"]
        .as_str()
        .expect("created_at must be a string");
    let created_at = NaiveDateTime::parse_from_str(created_at, "%Y-%m-%dT%H:%M:%S")
        .expect("created_at must be ISO-8601");
    let expected = Utc::now().naive_utc() + Duration::hours(3);
    assert!((expected - created_at).num_seconds().abs() < 120);

    let (status, _, body) = send(
        &app,
        empty_request("DELETE", "/posts/1", Some(basic(USERNAME, PASSWORD))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (status, _, body) = send(&app, empty_request("GET", "/posts/1", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn get_missing_post_returns_404_with_detail() {
    let (_dir, app) = setup_app().await;

    let (status, _, body) = send(&app, empty_request("GET", "/posts/999", None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn non_numeric_id_is_a_client_error_with_detail() {
    let (_dir, app) = setup_app().await;

    let (status, _, body) = send(&app, empty_request("GET", "/posts/abc", None)).await;

    assert!(status.is_client_error());
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn update_replaces_post_and_keeps_identity() {
    let (_dir, app) = setup_app().await;
    let created = create(&app, "old", "old body").await;

    let (status, _, updated) = send(
        &app,
        json_request(
            "PUT",
            "/posts/1",
            Some(basic(USERNAME, PASSWORD)),
            json!({ "title": "new", "content": "new body" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["created_at"], created["created_at"]);
    assert_eq!(updated["title"], "new");
    assert_eq!(updated["content"], "new body");
}

#[tokio::test]
async fn update_and_delete_missing_post_return_404() {
    let (_dir, app) = setup_app().await;

    let (status, _, body) = send(
        &app,
        json_request(
            "PUT",
            "/posts/5",
            Some(basic(USERNAME, PASSWORD)),
            json!({ "title": "t", "content": "c" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].is_string());

    let (status, _, _) = send(
        &app,
        empty_request("DELETE", "/posts/5", Some(basic(USERNAME, PASSWORD))),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, _, posts) = send(&app, empty_request("GET", "/posts", None)).await;
    assert_eq!(posts, json!([]));
}

#[tokio::test]
async fn list_returns_newest_first_with_display_offset() {
    let (_dir, app) = setup_app().await;
    create(&app, "first", "1").await;
    create(&app, "second", "2").await;

    let (status, _, posts) = send(&app, empty_request("GET", "/posts", None)).await;

    assert_eq!(status, StatusCode::OK);
    let posts = posts.as_array().expect("list must be an array");
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["title"], "second");
    assert_eq!(posts[1]["title"], "first");

    let (_, _, single) = send(&app, empty_request("GET", "/posts/1", None)).await;
    assert_eq!(single["created_at"], posts[1]["created_at"]);
}

#[tokio::test]
async fn rows_stored_without_validation_are_still_served() {
    let (dir, app) = setup_app().await;
    create(&app, "regular", "body").await;

    let options = SqliteConnectOptions::new().filename(dir.path().join("blog.db"));
    let mut conn = SqliteConnection::connect_with(&options)
        .await
        .expect("raw connection should open");
    sqlx::query("INSERT INTO posts (title, content) VALUES ('', 'legacy'), ('  spaced  ', 'x')")
        .execute(&mut conn)
        .await
        .expect("raw insert must succeed");

    let (status, _, posts) = send(&app, empty_request("GET", "/posts", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(posts.as_array().map(Vec::len), Some(3));

    let (status, _, spaced) = send(&app, empty_request("GET", "/posts/3", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(spaced["title"], "  spaced  ");
}

#[tokio::test]
async fn invalid_bodies_are_rejected_with_detail() {
    let (_dir, app) = setup_app().await;
    let auth = || Some(basic(USERNAME, PASSWORD));

    let (status, _, body) = send(
        &app,
        json_request("POST", "/posts", auth(), json!({ "title": "   ", "content": "B" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().is_some_and(|d| d.contains("title")));

    let (status, _, body) = send(
        &app,
        json_request("POST", "/posts", auth(), json!({ "title": "A" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());

    let (_, _, posts) = send(&app, empty_request("GET", "/posts", None)).await;
    assert_eq!(posts, json!([]));
}

#[tokio::test]
async fn index_and_admin_page_are_served() {
    let (_dir, app) = setup_app().await;

    let (status, _, body) = send(&app, empty_request("GET", "/", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["admin_panel"], "/admin");

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/admin", None))
        .await
        .expect("router is infallible");
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));
}
