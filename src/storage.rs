use std::path::PathBuf;

use anyhow::Context;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{error, info};

/// Whole-document JSON file storage.
///
/// Every record set lives in a single pretty-printed JSON file that is
/// read and written in full. `load` never fails: a missing file is seeded
/// with the default document at open time, and an unreadable or corrupt
/// file falls back to the default in memory while the bytes on disk stay
/// untouched for manual recovery.
pub struct JsonStore<T> {
    path: PathBuf,
    default: T,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    /// Open the store, seeding `path` with `default` when the file is absent.
    pub async fn open(path: impl Into<PathBuf>, default: T) -> anyhow::Result<Self> {
        let store = Self {
            path: path.into(),
            default,
        };
        if tokio::fs::metadata(&store.path).await.is_err() {
            store.save(&store.default).await?;
            info!(path = %store.path.display(), "seeded storage file");
        }
        Ok(store)
    }

    /// Read and parse the whole document.
    pub async fn load(&self) -> T {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(b) => b,
            Err(e) => {
                error!(error = %e, path = %self.path.display(), "storage read failed, serving defaults");
                return self.default.clone();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(e) => {
                error!(error = %e, path = %self.path.display(), "storage parse failed, serving defaults");
                self.default.clone()
            }
        }
    }

    /// Replace the whole document on disk.
    pub async fn save(&self, value: &T) -> anyhow::Result<()> {
        let bytes = serde_json::to_vec_pretty(value).context("serialize storage document")?;
        tokio::fs::write(&self.path, bytes)
            .await
            .with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn open_seeds_missing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.json");
        let store = JsonStore::open(&path, vec!["hello".to_string()])
            .await
            .unwrap();
        assert!(path.exists());
        assert_eq!(store.load().await, vec!["hello".to_string()]);
    }

    #[tokio::test]
    async fn open_keeps_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.json");
        tokio::fs::write(&path, r#"["saved"]"#).await.unwrap();
        let store = JsonStore::open(&path, vec!["default".to_string()])
            .await
            .unwrap();
        assert_eq!(store.load().await, vec!["saved".to_string()]);
    }

    #[tokio::test]
    async fn save_then_load_roundtrips() {
        let tmp = TempDir::new().unwrap();
        let store = JsonStore::open(tmp.path().join("notes.json"), Vec::<String>::new())
            .await
            .unwrap();
        store
            .save(&vec!["a".to_string(), "b".to_string()])
            .await
            .unwrap();
        assert_eq!(store.load().await, vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn corrupt_file_serves_default_without_rewriting() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.json");
        tokio::fs::write(&path, "{ this is not json").await.unwrap();
        let store = JsonStore::open(&path, vec!["default".to_string()])
            .await
            .unwrap();
        assert_eq!(store.load().await, vec!["default".to_string()]);
        let on_disk = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(on_disk, "{ this is not json");
    }

    #[tokio::test]
    async fn saved_files_are_pretty_printed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.json");
        let store = JsonStore::open(&path, vec!["one".to_string(), "two".to_string()])
            .await
            .unwrap();
        store
            .save(&vec!["one".to_string(), "two".to_string()])
            .await
            .unwrap();
        let on_disk = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(on_disk.contains('\n'));
    }
}
