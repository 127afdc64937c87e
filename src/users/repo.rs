use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::auth::session::Identity;
use crate::seed;
use crate::storage::JsonStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// A stored account. `username` is unique and matched case-sensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub name: String,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Identity {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
            name: user.name.clone(),
        }
    }
}

/// Account collection persisted wholesale to `users.json`. A missing
/// file is seeded with the bootstrap accounts on open.
#[derive(Clone)]
pub struct UserStore {
    store: Arc<JsonStore<Vec<User>>>,
}

impl UserStore {
    pub async fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let store = JsonStore::open(path, seed::default_users()?).await?;
        Ok(Self {
            store: Arc::new(store),
        })
    }

    pub async fn all(&self) -> Vec<User> {
        self.store.load().await
    }

    pub async fn save(&self, users: &[User]) -> anyhow::Result<()> {
        self.store.save(&users.to_vec()).await
    }

    pub async fn find_by_username(&self, username: &str) -> Option<User> {
        self.all().await.into_iter().find(|u| u.username == username)
    }

    pub async fn find_by_id(&self, id: i64) -> Option<User> {
        self.all().await.into_iter().find(|u| u.id == id)
    }

    /// Append a new account with the next free id.
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        role: Role,
        name: &str,
    ) -> anyhow::Result<User> {
        let mut users = self.all().await;
        let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let user = User {
            id,
            username: username.to_owned(),
            password_hash: password_hash.to_owned(),
            role,
            name: name.to_owned(),
        };
        users.push(user.clone());
        self.save(&users).await?;
        Ok(user)
    }

    /// Remove an account. Removing an absent id is a silent no-op.
    pub async fn remove(&self, id: i64) -> anyhow::Result<()> {
        let mut users = self.all().await;
        users.retain(|u| u.id != id);
        self.save(&users).await
    }

    /// Replace the stored hash for `id`. Returns false when no such account.
    pub async fn set_password(&self, id: i64, password_hash: &str) -> anyhow::Result<bool> {
        let mut users = self.all().await;
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => user.password_hash = password_hash.to_owned(),
            None => return Ok(false),
        }
        self.save(&users).await?;
        Ok(true)
    }
}
