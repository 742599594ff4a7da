//! Document store abstraction
//!
//! The workflows talk to a schema-flexible store of named collections
//! holding JSON documents. The production deployment points this trait at a
//! real database; the crate ships a memory backend (default, used in tests)
//! and an append-only file backend.

pub mod error;
pub mod file;
pub mod memory;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Persistence seam for the submission and query workflows.
///
/// Filters are JSON objects of exact-match field/value pairs.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Append a document to a collection
    async fn insert(&self, collection: &str, document: Value) -> StoreResult<()>;

    /// Return the first document matching the filter, if any
    async fn find_one(&self, collection: &str, filter: &Value) -> StoreResult<Option<Value>>;

    /// Return up to `limit` documents in insertion order
    async fn find_many(&self, collection: &str, limit: usize) -> StoreResult<Vec<Value>>;
}

/// Exact-match comparison of every filter field against the document
pub(crate) fn matches_filter(document: &Value, filter: &Value) -> bool {
    match filter.as_object() {
        Some(fields) => fields
            .iter()
            .all(|(key, expected)| document.get(key) == Some(expected)),
        None => false,
    }
}

/// Store backend type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    /// In-memory storage (default, used in tests)
    Memory,
    /// JSON-lines files under a base directory
    File,
}

impl Default for BackendType {
    fn default() -> Self {
        Self::Memory
    }
}

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: BackendType,

    /// Base directory for the file backend
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,
}

fn default_base_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: BackendType::default(),
            base_dir: default_base_dir(),
        }
    }
}

/// Create a store backend from configuration
pub fn create_store(config: &StoreConfig) -> Arc<dyn DocumentStore> {
    match config.backend {
        BackendType::Memory => Arc::new(MemoryStore::new()),
        BackendType::File => Arc::new(FileStore::new(config.base_dir.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filter_matches_on_all_fields() {
        let doc = json!({"email": "a@b.com", "interest": "wearables"});
        assert!(matches_filter(&doc, &json!({"email": "a@b.com"})));
        assert!(matches_filter(
            &doc,
            &json!({"email": "a@b.com", "interest": "wearables"})
        ));
        assert!(!matches_filter(&doc, &json!({"email": "c@d.com"})));
        assert!(!matches_filter(
            &doc,
            &json!({"email": "a@b.com", "interest": "other"})
        ));
    }

    #[test]
    fn non_object_filter_matches_nothing() {
        let doc = json!({"email": "a@b.com"});
        assert!(!matches_filter(&doc, &json!("email")));
    }

    #[test]
    fn backend_type_parses_lowercase() {
        let backend: BackendType = serde_json::from_str("\"file\"").unwrap();
        assert_eq!(backend, BackendType::File);
    }
}
