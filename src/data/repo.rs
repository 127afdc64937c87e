use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;

use crate::seed;
use crate::storage::JsonStore;

/// The whole bookkeeping document, read and replaced wholesale.
/// Shape is owned by the client; the server never merges.
#[derive(Clone)]
pub struct DocumentStore {
    store: Arc<JsonStore<Value>>,
}

impl DocumentStore {
    pub async fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let store = JsonStore::open(path, seed::default_document()).await?;
        Ok(Self {
            store: Arc::new(store),
        })
    }

    pub async fn load(&self) -> Value {
        self.store.load().await
    }

    pub async fn save(&self, document: &Value) -> anyhow::Result<()> {
        self.store.save(document).await
    }
}
