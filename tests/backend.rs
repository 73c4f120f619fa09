//! End-to-end tests of the reqwest transport against a mock dashboard backend

use avalanche::charts::ATTR_SOURCE;
use avalanche::*;
use axum::extract::Form;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;

const TOKEN: &str = "tok-42";

#[derive(Deserialize)]
struct Credentials {
    username: String,
    password: String,
}

async fn login(Json(body): Json<Credentials>) -> impl IntoResponse {
    if body.password == "hunter22" {
        (
            StatusCode::OK,
            Json(json!({"token": TOKEN, "username": body.username, "role": "admin"})),
        )
            .into_response()
    } else {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

async fn logout(headers: HeaderMap) -> StatusCode {
    let expected = format!("Bearer {}", TOKEN);
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => StatusCode::OK,
        _ => StatusCode::UNAUTHORIZED,
    }
}

async fn register(Form(fields): Form<HashMap<String, String>>) -> StatusCode {
    if fields.get("username").map(String::as_str) == Some("taken") {
        return StatusCode::CONFLICT;
    }
    match (fields.get("password"), fields.get("passwordRepeat")) {
        (Some(a), Some(b)) if a == b => StatusCode::CREATED,
        _ => StatusCode::BAD_REQUEST,
    }
}

async fn enumerate() -> Json<serde_json::Value> {
    Json(json!([{"id": "peer-a", "address": "10.0.0.2"}, {"id": 7}]))
}

async fn memory() -> Json<serde_json::Value> {
    Json(json!({
        "free": [{"timestamp": 1, "value": 100}],
        "available": [],
        "used": [{"timestamp": 0, "value": 500}],
        "total": 1000
    }))
}

async fn spawn_backend() -> Config {
    let app = Router::new()
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/logout", post(logout))
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/services/enumerate", get(enumerate))
        .route("/api/v1/stats/memory", get(memory));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let mut config = Config::default();
    config.api.base_url = format!("http://{}", addr);
    config.api.request_timeout_ms = Some(5_000);
    config
}

#[tokio::test]
async fn test_login_logout_round_trip() {
    let config = spawn_backend().await;
    let transport = ReqwestTransport::new(&config.api).unwrap();
    let auth = AuthClient::new(&transport, MemoryStorage::new(), &config);

    let denied = auth
        .login(&LoginForm::new("ikey", "wrong-pass"), &NoControl)
        .await
        .unwrap_err();
    assert_eq!(denied, DashboardError::LoginFailed { status: 401 });
    assert!(!auth.is_logged_in());

    let nav = auth
        .login(&LoginForm::new("ikey", "hunter22"), &NoControl)
        .await
        .unwrap();
    assert_eq!(nav, Navigation::To("/".to_string()));
    assert_eq!(auth.account_button().label, "Log out ikey");

    assert_eq!(auth.on_account_click().await.unwrap(), Navigation::Reload);
    assert!(!auth.is_logged_in());
    assert_eq!(auth.account_button().label, "Log in");
}

#[tokio::test]
async fn test_register_posts_form() {
    let config = spawn_backend().await;
    let transport = ReqwestTransport::new(&config.api).unwrap();
    let auth = AuthClient::new(&transport, MemoryStorage::new(), &config);

    let nav = auth
        .register(&RegisterForm::new("newuser", "secret12", "secret12"))
        .await
        .unwrap();
    assert_eq!(nav, Navigation::To("/ac/login".to_string()));

    let err = auth
        .register(&RegisterForm::new("taken", "secret12", "secret12"))
        .await
        .unwrap_err();
    assert_eq!(err, DashboardError::RegistrationFailed { status: 409 });
}

#[tokio::test]
async fn test_enumerate_connections() {
    let config = spawn_backend().await;
    let transport = ReqwestTransport::new(&config.api).unwrap();
    let poller = ConnectionPoller::new(&transport, &config);

    let records = poller.fetch().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id.to_string(), "peer-a");
    assert_eq!(records[1].id, ConnectionId(json!(7)));
}

#[tokio::test]
async fn test_memory_chart_poll() {
    let config = spawn_backend().await;
    let transport = ReqwestTransport::new(&config.api).unwrap();
    let controller = ChartController::new(&transport, &config);

    let element: &[(&str, &str)] = &[(ATTR_SOURCE, "memory")];
    let mut chart = controller.configure(element).unwrap();
    let update = controller.fetch_update(DataSource::Memory).await.unwrap();
    chart.apply_update(&update);

    assert_eq!(chart.phase(), ChartPhase::Polling);
    assert_eq!(chart.options().axis_max(), Some(1000.0));
    let used = chart.options().series.named("Used").unwrap();
    assert_eq!(used.latest().unwrap().y, 500.0);
    assert_eq!(chart.options().series.named("Free").unwrap().data[0].x, 1000);
}

#[tokio::test]
async fn test_unreachable_backend() {
    let mut config = Config::default();
    config.api.base_url = "http://127.0.0.1:1".to_string();
    let transport = ReqwestTransport::new(&config.api).unwrap();
    let poller = ConnectionPoller::new(&transport, &config);

    assert!(matches!(
        poller.fetch().await,
        Err(DashboardError::Transport(_))
    ));
}
