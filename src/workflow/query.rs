//! Query workflow
//!
//! Listings read at most [`LIST_CAP`] documents per call (a fixed clamp,
//! not paging) and rehydrate stored ISO-8601 timestamp strings back into
//! structured time values through deserialization. Documents that fail to
//! deserialize are skipped with a warning rather than failing the listing.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::Result;
use crate::store::DocumentStore;

/// Maximum documents returned per listing; anything beyond is silently
/// omitted
pub const LIST_CAP: usize = 1000;

/// List every record in a collection, up to the cap
pub async fn list_records<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: &str,
) -> Result<Vec<T>> {
    let docs = store.find_many(collection, LIST_CAP).await?;

    let mut records = Vec::with_capacity(docs.len());
    for doc in docs {
        match serde_json::from_value::<T>(doc) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping malformed document in {collection}: {e}"),
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PilotSignup, PilotSignupCreate, StatusCheck, PILOT_SIGNUPS, STATUS_CHECKS};
    use crate::store::MemoryStore;
    use serde_json::json;

    #[tokio::test]
    async fn round_trips_persisted_timestamps() {
        let store = MemoryStore::new();
        let record = PilotSignup::new(PilotSignupCreate {
            email: "a@b.com".into(),
            interest: None,
        });
        store
            .insert(PILOT_SIGNUPS, serde_json::to_value(&record).unwrap())
            .await
            .unwrap();

        let listed: Vec<PilotSignup> = list_records(&store, PILOT_SIGNUPS).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, record.id);
        assert_eq!(listed[0].timestamp, record.timestamp);
    }

    #[tokio::test]
    async fn malformed_documents_are_skipped() {
        let store = MemoryStore::new();
        store
            .insert(
                STATUS_CHECKS,
                json!({"id": "1", "client_name": "probe", "timestamp": "2026-08-30T10:00:00Z"}),
            )
            .await
            .unwrap();
        store
            .insert(STATUS_CHECKS, json!({"id": "2", "timestamp": "garbage"}))
            .await
            .unwrap();

        let listed: Vec<StatusCheck> = list_records(&store, STATUS_CHECKS).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "1");
    }

    #[tokio::test]
    async fn listing_is_clamped_to_the_cap() {
        let store = MemoryStore::new();
        for i in 0..(LIST_CAP + 1) {
            store
                .insert(
                    STATUS_CHECKS,
                    json!({
                        "id": format!("{i}"),
                        "client_name": "probe",
                        "timestamp": "2026-08-30T10:00:00Z"
                    }),
                )
                .await
                .unwrap();
        }

        let listed: Vec<StatusCheck> = list_records(&store, STATUS_CHECKS).await.unwrap();
        assert_eq!(listed.len(), LIST_CAP);
    }
}
