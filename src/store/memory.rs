//! In-memory store backend

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{matches_filter, DocumentStore, StoreResult};

/// In-memory store backend, the default outside production deployments
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl MemoryStore {
    /// Create a new empty memory store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, document: Value) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(())
    }

    async fn find_one(&self, collection: &str, filter: &Value) -> StoreResult<Option<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| matches_filter(doc, filter)))
            .cloned())
    }

    async fn find_many(&self, collection: &str, limit: usize) -> StoreResult<Vec<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn insert_then_find_one() {
        let store = MemoryStore::new();
        store
            .insert("pilot_signups", json!({"email": "a@b.com"}))
            .await
            .unwrap();

        let found = store
            .find_one("pilot_signups", &json!({"email": "a@b.com"}))
            .await
            .unwrap();
        assert_eq!(found, Some(json!({"email": "a@b.com"})));

        let missing = store
            .find_one("pilot_signups", &json!({"email": "x@y.com"}))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn find_many_respects_limit_and_order() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store
                .insert("status_checks", json!({"client_name": format!("c{i}")}))
                .await
                .unwrap();
        }

        let docs = store.find_many("status_checks", 3).await.unwrap();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0]["client_name"], "c0");
        assert_eq!(docs[2]["client_name"], "c2");
    }

    #[tokio::test]
    async fn unknown_collection_is_empty() {
        let store = MemoryStore::new();
        let docs = store.find_many("contacts", 10).await.unwrap();
        assert!(docs.is_empty());
    }
}
