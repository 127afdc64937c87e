use anyhow::Context;
use axum::{extract::State, routing::get, Json, Router};
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{info, instrument};

use crate::{
    auth::extractors::CurrentUser, data::dto::SaveReceipt, error::ApiError, state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/data", get(get_document).post(replace_document))
}

#[instrument(skip(state, _user))]
pub async fn get_document(State(state): State<AppState>, _user: CurrentUser) -> Json<Value> {
    Json(state.document.load().await)
}

#[instrument(skip(state, payload))]
pub async fn replace_document(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<Value>,
) -> Result<Json<SaveReceipt>, ApiError> {
    state.document.save(&payload).await?;
    let saved_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .context("format save timestamp")?;

    info!(user_id = user.id, "document replaced");
    Ok(Json(SaveReceipt { ok: true, saved_at }))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use time::format_description::well_known::Rfc3339;
    use time::OffsetDateTime;

    use crate::testutil::{body_json, login, request, send, test_app};

    #[tokio::test]
    async fn document_requires_a_session() {
        let (_tmp, app) = test_app().await;

        let response = send(&app, request(Method::GET, "/api/data", None, None)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = send(
            &app,
            request(Method::POST, "/api/data", None, Some(json!({ "a": 1 }))),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn fresh_install_serves_the_default_document() {
        let (_tmp, app) = test_app().await;
        let cookie = login(&app, "user1", "user123").await;

        let response = send(&app, request(Method::GET, "/api/data", Some(&cookie), None)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["employees"], json!([]));
        assert_eq!(body["rent"]["amount"], 0);
        assert!(body["currentMonth"].is_string());
    }

    #[tokio::test]
    async fn replace_then_get_roundtrips_exactly() {
        let (_tmp, app) = test_app().await;
        let cookie = login(&app, "admin", "admin123").await;

        let response = send(
            &app,
            request(
                Method::POST,
                "/api/data",
                Some(&cookie),
                Some(json!({ "a": 1 })),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["ok"], true);
        let saved_at = body["savedAt"].as_str().expect("savedAt string");
        OffsetDateTime::parse(saved_at, &Rfc3339).expect("rfc 3339 timestamp");

        // No merge with the previous document: {"a":1} is the whole truth.
        let response = send(&app, request(Method::GET, "/api/data", Some(&cookie), None)).await;
        assert_eq!(body_json(response).await, json!({ "a": 1 }));
    }

    #[tokio::test]
    async fn any_session_may_write() {
        let (_tmp, app) = test_app().await;
        let cookie = login(&app, "user1", "user123").await;

        let response = send(
            &app,
            request(
                Method::POST,
                "/api/data",
                Some(&cookie),
                Some(json!({ "revenue": [ { "id": 1, "amount": 250 } ] })),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["ok"], true);
    }
}
