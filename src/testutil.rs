use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use crate::app::build_app;
use crate::config::AppConfig;
use crate::state::AppState;

/// Fresh tempdir-backed state: seeded stores plus stub page files.
pub async fn test_state() -> (TempDir, AppState) {
    let tmp = TempDir::new().expect("tempdir");
    let public_dir = tmp.path().join("public");
    tokio::fs::create_dir_all(&public_dir)
        .await
        .expect("public dir");
    tokio::fs::write(public_dir.join("index.html"), "<html>shell</html>")
        .await
        .expect("index.html");
    tokio::fs::write(public_dir.join("login.html"), "<html>login</html>")
        .await
        .expect("login.html");

    let config = AppConfig {
        data_dir: tmp.path().join("data"),
        public_dir,
        session_ttl_hours: 24,
    };
    let state = AppState::from_config(config).await.expect("app state");
    (tmp, state)
}

pub async fn test_app() -> (TempDir, Router) {
    let (tmp, state) = test_state().await;
    (tmp, build_app(state))
}

pub fn request(
    method: Method,
    path: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.expect("response")
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

/// Log in and hand back the `name=value` cookie pair for later requests.
pub async fn login(app: &Router, username: &str, password: &str) -> String {
    let response = send(
        app,
        request(
            Method::POST,
            "/api/login",
            None,
            Some(serde_json::json!({ "username": username, "password": password })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("set-cookie header")
        .to_str()
        .expect("cookie string")
        .to_owned();
    set_cookie
        .split(';')
        .next()
        .expect("cookie pair")
        .to_owned()
}
