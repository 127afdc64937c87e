use anyhow::Context;
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{Ack, ChangePasswordRequest, LoginRequest, LoginSuccess},
        extractors::{session_token, CurrentUser, SESSION_COOKIE},
        password::{hash_password, verify_password},
        session::Identity,
    },
    error::ApiError,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/me", get(me))
        .route("/api/change-password", post(change_password))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<LoginSuccess>), ApiError> {
    let user = match state.users.find_by_username(&payload.username).await {
        Some(user) if verify_password(&payload.password, &user.password_hash) => user,
        _ => {
            warn!(username = %payload.username, "login rejected");
            return Err(ApiError::validation("invalid username or password"));
        }
    };

    let identity = Identity::from(&user);
    let token = state.sessions.issue(identity.clone());
    let headers = set_cookie(&token, state.sessions.ttl().whole_seconds())?;

    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok((
        headers,
        Json(LoginSuccess {
            ok: true,
            user: identity,
        }),
    ))
}

#[instrument(skip(state, headers))]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
    CurrentUser(user): CurrentUser,
) -> Result<(HeaderMap, Json<Ack>), ApiError> {
    if let Some(token) = session_token(&headers) {
        state.sessions.revoke(&token);
    }
    info!(user_id = user.id, "user logged out");
    Ok((set_cookie("", 0)?, Json(Ack::ok())))
}

#[instrument]
pub async fn me(CurrentUser(user): CurrentUser) -> Json<Identity> {
    Json(user)
}

#[instrument(skip(state, payload))]
pub async fn change_password(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<Ack>, ApiError> {
    let record = match state.users.find_by_id(user.id).await {
        Some(r) => r,
        None => {
            warn!(user_id = user.id, "change-password for vanished user");
            return Err(ApiError::validation("user not found"));
        }
    };

    if !verify_password(&payload.old_password, &record.password_hash) {
        warn!(user_id = user.id, "change-password wrong current password");
        return Err(ApiError::validation("current password is incorrect"));
    }

    let hash = hash_password(&payload.new_password)?;
    if !state.users.set_password(user.id, &hash).await? {
        return Err(ApiError::validation("user not found"));
    }

    info!(user_id = user.id, "password changed");
    Ok(Json(Ack::ok()))
}

/// Build a `Set-Cookie` header for the session token. A zero `max_age`
/// with an empty token clears the cookie on logout.
fn set_cookie(token: &str, max_age_secs: i64) -> Result<HeaderMap, ApiError> {
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, max_age_secs
    );
    let value: HeaderValue = cookie.parse().context("session cookie header")?;
    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, value);
    Ok(headers)
}
