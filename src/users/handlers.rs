use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{dto::Ack, extractors::AdminUser, password::hash_password, session::Identity},
    error::ApiError,
    state::AppState,
    users::{dto::CreateUserRequest, repo::Role},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/:id", delete(delete_user))
}

#[instrument(skip(state, _admin))]
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Json<Vec<Identity>> {
    let users = state.users.all().await;
    Json(users.iter().map(Identity::from).collect())
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<Ack>, ApiError> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(ApiError::validation("username and password are required"));
    }

    if state
        .users
        .find_by_username(&payload.username)
        .await
        .is_some()
    {
        warn!(username = %payload.username, "create rejected, username taken");
        return Err(ApiError::validation("username already exists"));
    }

    let hash = hash_password(&payload.password)?;
    let role = payload.role.unwrap_or(Role::User);
    let name = payload
        .name
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| payload.username.clone());
    let user = state
        .users
        .create(&payload.username, &hash, role, &name)
        .await?;

    info!(user_id = user.id, username = %user.username, admin_id = admin.id, "user created");
    Ok(Json(Ack::ok()))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
) -> Result<Json<Ack>, ApiError> {
    if id == admin.id {
        warn!(user_id = admin.id, "self-deletion refused");
        return Err(ApiError::validation("cannot delete your own account"));
    }

    state.users.remove(id).await?;
    info!(user_id = id, admin_id = admin.id, "user deleted");
    Ok(Json(Ack::ok()))
}
