use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

use crate::auth::session::Identity;
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::repo::Role;

/// Name of the session cookie held by the browser.
pub const SESSION_COOKIE: &str = "crmb_session";

/// Resolves the session cookie, yielding the caller's identity.
#[derive(Debug)]
pub struct CurrentUser(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers).ok_or(ApiError::Unauthorized)?;
        let identity = state
            .sessions
            .resolve(&token)
            .ok_or(ApiError::Unauthorized)?;
        Ok(CurrentUser(identity))
    }
}

/// Like [`CurrentUser`], but additionally requires the admin role.
#[derive(Debug)]
pub struct AdminUser(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(identity) = CurrentUser::from_request_parts(parts, state).await?;
        if identity.role != Role::Admin {
            return Err(ApiError::Forbidden);
        }
        Ok(AdminUser(identity))
    }
}

/// Pull the session token out of the `Cookie` header(s).
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find_map(|(name, value)| (name == SESSION_COOKIE).then(|| value.to_owned()))
}
