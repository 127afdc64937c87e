use std::sync::Arc;

use anyhow::Context;
use time::Duration;

use crate::auth::session::SessionManager;
use crate::config::AppConfig;
use crate::data::repo::DocumentStore;
use crate::users::repo::UserStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: UserStore,
    pub document: DocumentStore,
    pub sessions: SessionManager,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        Self::from_config(AppConfig::from_env()).await
    }

    pub async fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&config.data_dir)
            .await
            .with_context(|| format!("create data dir {}", config.data_dir.display()))?;

        let users = UserStore::open(config.data_dir.join("users.json")).await?;
        let document = DocumentStore::open(config.data_dir.join("data.json")).await?;
        let sessions = SessionManager::new(Duration::hours(config.session_ttl_hours));

        Ok(Self {
            config: Arc::new(config),
            users,
            document,
            sessions,
        })
    }
}
