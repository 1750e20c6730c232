use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use pomodoro::{create_router, AppState};
use serde_json::Value;
use tokio::time::sleep;
use tower::ServiceExt;

fn test_app(duration_secs: u64) -> (Arc<AppState>, Router) {
    let state = Arc::new(AppState::new(
        20554,
        "127.0.0.1".to_string(),
        Duration::from_secs(duration_secs),
    ));
    let app = create_router(Arc::clone(&state));
    (state, app)
}

async fn call(app: &Router, method: &str, path: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test(start_paused = true)]
async fn status_starts_idle() {
    let (_state, app) = test_app(25 * 60 + 1);

    let (status, body) = call(&app, "GET", "/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["phase"], "idle");
    assert_eq!(body["timer"]["remaining_seconds"], Value::Null);
    assert_eq!(body["timer"]["title"], "🍅25m1s");
    assert_eq!(body["duration_seconds"], 1501);
    assert_eq!(body["last_action"], Value::Null);
    assert_eq!(body["available_actions"], serde_json::json!(["start"]));
}

#[tokio::test(start_paused = true)]
async fn start_pause_resume_round() {
    let (state, app) = test_app(60);

    let (status, body) = call(&app, "POST", "/start").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "active");
    assert_eq!(body["timer"]["phase"], "running");
    assert_eq!(body["timer"]["remaining_seconds"], 60);

    sleep(Duration::from_millis(2_500)).await;
    let (_, body) = call(&app, "GET", "/status").await;
    assert_eq!(body["timer"]["remaining_seconds"], 58);
    assert_eq!(body["timer"]["title"], "🍅58s");
    assert_eq!(body["last_action"], "start");
    assert_eq!(body["available_actions"], serde_json::json!(["pause"]));

    let (status, body) = call(&app, "POST", "/pause").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "inactive");
    assert_eq!(body["timer"]["phase"], "paused");

    sleep(Duration::from_secs(30)).await;
    let (_, body) = call(&app, "GET", "/status").await;
    assert_eq!(body["timer"]["remaining_seconds"], 58);
    assert_eq!(body["available_actions"], serde_json::json!(["start", "resume"]));

    let (status, body) = call(&app, "POST", "/resume").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["phase"], "running");
    assert_eq!(state.get_last_action().0.as_deref(), Some("resume"));

    state.shutdown().await;
    assert_eq!(state.timer_state().await.phase, pomodoro::TimerPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn expiry_shows_in_status() {
    let (state, app) = test_app(2);
    let mut updates = state.subscribe();

    call(&app, "POST", "/start").await;
    sleep(Duration::from_millis(3_500)).await;

    let (_, body) = call(&app, "GET", "/status").await;
    assert_eq!(body["timer"]["phase"], "expired");
    assert_eq!(body["timer"]["remaining_seconds"], -1);
    assert_eq!(body["timer"]["title"], "🍅-1s");
    assert_eq!(body["available_actions"], serde_json::json!(["start"]));

    assert!(updates.has_changed().unwrap());
    assert_eq!(updates.borrow_and_update().phase, pomodoro::TimerPhase::Expired);
}

#[tokio::test(start_paused = true)]
async fn restart_replaces_an_expired_snapshot() {
    let (state, app) = test_app(2);

    call(&app, "POST", "/start").await;
    sleep(Duration::from_millis(3_500)).await;

    let (status, body) = call(&app, "POST", "/start").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["phase"], "running");
    assert_eq!(body["timer"]["remaining_seconds"], 2);

    sleep(Duration::from_millis(1_500)).await;
    let (_, body) = call(&app, "GET", "/status").await;
    assert_eq!(body["timer"]["phase"], "running");
    assert_eq!(body["timer"]["remaining_seconds"], 1);

    state.shutdown().await;
}

#[tokio::test]
async fn health_reports_ok() {
    let (_state, app) = test_app(60);

    let (status, body) = call(&app, "GET", "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
