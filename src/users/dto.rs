use serde::Deserialize;

use crate::users::repo::Role;

/// Request body for creating an account. Role and display name are
/// optional; an unknown role value is a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub role: Option<Role>,
    pub name: Option<String>,
}
