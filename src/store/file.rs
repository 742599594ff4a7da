//! File-based store backend
//!
//! Each collection is a JSON-lines file under the base directory. Inserts
//! append a line; reads scan the whole file. Adequate for the write volumes
//! of a marketing site.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use super::{matches_filter, DocumentStore, StoreError, StoreResult};

/// JSON-lines file store backend
pub struct FileStore {
    base_dir: PathBuf,
    // Serializes appends so concurrent inserts cannot interleave lines
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Create a file store rooted at `base_dir`; the directory is created
    /// on first insert
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.base_dir.join(format!("{collection}.jsonl"))
    }

    async fn read_all(&self, path: &Path) -> StoreResult<Vec<Value>> {
        let contents = match fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(StoreError::serialization))
            .collect()
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn insert(&self, collection: &str, document: Value) -> StoreResult<()> {
        let line = serde_json::to_string(&document).map_err(StoreError::serialization)?;

        let _guard = self.write_lock.lock().await;
        fs::create_dir_all(&self.base_dir).await?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.collection_path(collection))
            .await?;
        file.write_all(format!("{line}\n").as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    async fn find_one(&self, collection: &str, filter: &Value) -> StoreResult<Option<Value>> {
        let docs = self.read_all(&self.collection_path(collection)).await?;
        Ok(docs.into_iter().find(|doc| matches_filter(doc, filter)))
    }

    async fn find_many(&self, collection: &str, limit: usize) -> StoreResult<Vec<Value>> {
        let mut docs = self.read_all(&self.collection_path(collection)).await?;
        docs.truncate(limit);
        Ok(docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn documents_survive_store_reopen() {
        let dir = TempDir::new().unwrap();

        let store = FileStore::new(dir.path());
        store
            .insert("pilot_signups", json!({"email": "a@b.com"}))
            .await
            .unwrap();
        drop(store);

        let reopened = FileStore::new(dir.path());
        let found = reopened
            .find_one("pilot_signups", &json!({"email": "a@b.com"}))
            .await
            .unwrap();
        assert_eq!(found, Some(json!({"email": "a@b.com"})));
    }

    #[tokio::test]
    async fn missing_collection_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        assert!(store.find_many("contacts", 10).await.unwrap().is_empty());
        assert!(store
            .find_one("contacts", &json!({"email": "a@b.com"}))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn find_many_truncates_to_limit() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        for i in 0..4 {
            store
                .insert("status_checks", json!({"client_name": format!("c{i}")}))
                .await
                .unwrap();
        }

        let docs = store.find_many("status_checks", 2).await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0]["client_name"], "c0");
    }
}
