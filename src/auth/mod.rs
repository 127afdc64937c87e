use crate::state::AppState;
use axum::Router;

pub(crate) mod dto;
pub(crate) mod extractors;
pub mod handlers;
pub mod password;
pub mod session;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::routes())
}
