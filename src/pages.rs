use std::path::Path;

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use tracing::{instrument, warn};

use crate::auth::extractors::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/login", get(login_page))
}

#[instrument(skip(state))]
pub async fn login_page(State(state): State<AppState>, user: Option<CurrentUser>) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }
    serve_shell(&state.config.public_dir.join("login.html")).await
}

/// Auth-gated catch-all: every unknown GET serves the app shell so the
/// client keeps routing within the page. Unknown `/api/` paths stay JSON.
#[instrument(skip(state))]
pub async fn app_shell(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    user: Option<CurrentUser>,
) -> Response {
    if method != Method::GET {
        return StatusCode::NOT_FOUND.into_response();
    }
    if user.is_none() {
        if uri.path().starts_with("/api/") {
            return ApiError::Unauthorized.into_response();
        }
        return Redirect::to("/login").into_response();
    }
    serve_shell(&state.config.public_dir.join("index.html")).await
}

async fn serve_shell(path: &Path) -> Response {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => Html(contents).into_response(),
        Err(e) => {
            warn!(error = %e, path = %path.display(), "page file missing");
            (StatusCode::NOT_FOUND, "page not found").into_response()
        }
    }
}
