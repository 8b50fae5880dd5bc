//! In-memory implementation of the storage traits
//!
//! Mirrors the MongoDB semantics (lazy singleton, partial updates, append-only
//! submissions) behind a tokio lock. Used by tests and local runs.

use bson::{oid::ObjectId, DateTime as BsonDateTime};
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::db::schemas::{MetricsDoc, SubmissionDoc};
use crate::store::{MetricsStore, SubmissionStore};
use crate::types::Result;

/// Process-local store
#[derive(Default)]
pub struct MemoryStore {
    metrics: RwLock<Option<MetricsDoc>>,
    submissions: RwLock<Vec<SubmissionDoc>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing singleton, e.g. one carrying authored reactions
    pub fn with_metrics(doc: MetricsDoc) -> Self {
        Self {
            metrics: RwLock::new(Some(doc)),
            ..Default::default()
        }
    }

    /// Snapshot of every stored submission, oldest first
    pub async fn submissions(&self) -> Vec<SubmissionDoc> {
        self.submissions.read().await.clone()
    }

    /// Apply `patch` to the singleton, creating it first if absent
    async fn patch(&self, patch: impl FnOnce(&mut MetricsDoc)) {
        let mut guard = self.metrics.write().await;
        let doc = guard.get_or_insert_with(MetricsDoc::singleton);
        patch(doc);
        doc.metadata.updated_at = Some(BsonDateTime::now());
    }
}

#[async_trait::async_trait]
impl MetricsStore for MemoryStore {
    async fn load(&self) -> Result<Option<MetricsDoc>> {
        Ok(self.metrics.read().await.clone())
    }

    async fn increment_no(&self, at: DateTime<Utc>) -> Result<()> {
        self.patch(|doc| {
            doc.no_count += 1;
            doc.last_no_click_at = Some(BsonDateTime::from_chrono(at));
        })
        .await;
        Ok(())
    }

    async fn record_yes(&self, no_count: i64, at: DateTime<Utc>) -> Result<()> {
        self.patch(|doc| {
            doc.has_said_yes = true;
            doc.yes_clicked_at = Some(BsonDateTime::from_chrono(at));
            doc.total_no_before_yes = Some(no_count);
        })
        .await;
        Ok(())
    }

    async fn record_signature(&self, name: &str, at: DateTime<Utc>) -> Result<()> {
        self.patch(|doc| {
            doc.has_signed = true;
            doc.signature_name = Some(name.to_string());
            doc.signed_at = Some(BsonDateTime::from_chrono(at));
        })
        .await;
        Ok(())
    }

    async fn reset_no(&self) -> Result<()> {
        self.patch(|doc| {
            doc.no_count = 0;
            doc.last_no_click_at = None;
        })
        .await;
        Ok(())
    }
}

#[async_trait::async_trait]
impl SubmissionStore for MemoryStore {
    async fn append(&self, mut submission: SubmissionDoc) -> Result<String> {
        let id = ObjectId::new();
        submission._id = Some(id);
        self.submissions.write().await.push(submission);
        Ok(id.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schemas::{SubmissionCategory, METRICS_DOC_ID};
    use bson::doc;

    #[tokio::test]
    async fn test_load_before_write_is_none() {
        let store = MemoryStore::new();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_first_write_creates_singleton() {
        let store = MemoryStore::new();
        store.increment_no(Utc::now()).await.unwrap();

        let doc = store.load().await.unwrap().unwrap();
        assert_eq!(doc.id, METRICS_DOC_ID);
        assert_eq!(doc.no_count, 1);
        assert!(doc.metadata.created_at.is_some());
    }

    #[tokio::test]
    async fn test_reset_keeps_signature() {
        let store = MemoryStore::new();
        store.record_signature("Ada", Utc::now()).await.unwrap();
        store.increment_no(Utc::now()).await.unwrap();
        store.reset_no().await.unwrap();

        let doc = store.load().await.unwrap().unwrap();
        assert_eq!(doc.no_count, 0);
        assert!(doc.last_no_click_at.is_none());
        assert!(doc.has_signed);
        assert_eq!(doc.signature_name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn test_writes_leave_reactions_untouched() {
        let seeded = MetricsDoc {
            reaction_images: vec!["image-cat-64x64-gif".to_string()],
            reaction_sounds: vec!["file-sob-mp3".to_string()],
            ..MetricsDoc::singleton()
        };
        let store = MemoryStore::with_metrics(seeded);

        store.increment_no(Utc::now()).await.unwrap();
        store.record_yes(1, Utc::now()).await.unwrap();
        store.record_signature("Ada", Utc::now()).await.unwrap();
        store.reset_no().await.unwrap();

        let doc = store.load().await.unwrap().unwrap();
        assert_eq!(doc.reaction_images, vec!["image-cat-64x64-gif"]);
        assert_eq!(doc.reaction_sounds, vec!["file-sob-mp3"]);
        assert_eq!(doc.no_count, 0);
    }

    #[tokio::test]
    async fn test_append_assigns_distinct_ids() {
        let store = MemoryStore::new();
        let now = BsonDateTime::now();
        let a = store
            .append(SubmissionDoc::new(SubmissionCategory::Place, doc! { "response": "Kyoto" }, now))
            .await
            .unwrap();
        let b = store
            .append(SubmissionDoc::new(SubmissionCategory::Place, doc! { "response": "Lisbon" }, now))
            .await
            .unwrap();

        assert_ne!(a, b);
        let all = store.submissions().await;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].payload.get_str("response").unwrap(), "Kyoto");
    }
}
