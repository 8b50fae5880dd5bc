//! MongoDB implementation of the storage traits

use bson::{doc, Bson, DateTime as BsonDateTime};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::db::schemas::{
    MetricsDoc, SubmissionDoc, METRICS_COLLECTION, METRICS_DOC_ID, SUBMISSION_COLLECTION,
};
use crate::db::{MongoClient, MongoCollection};
use crate::store::{MetricsStore, SubmissionStore};
use crate::types::Result;

/// MongoDB-backed metrics and submission store
pub struct MongoStore {
    metrics: MongoCollection<MetricsDoc>,
    submissions: MongoCollection<SubmissionDoc>,
}

impl MongoStore {
    /// Open both collections, creating indexes
    pub async fn new(mongo: &MongoClient) -> Result<Self> {
        Ok(Self {
            metrics: mongo.collection(METRICS_COLLECTION).await?,
            submissions: mongo.collection(SUBMISSION_COLLECTION).await?,
        })
    }
}

fn singleton_filter() -> bson::Document {
    doc! { "_id": METRICS_DOC_ID }
}

#[async_trait::async_trait]
impl MetricsStore for MongoStore {
    async fn load(&self) -> Result<Option<MetricsDoc>> {
        self.metrics.find_one(singleton_filter()).await
    }

    async fn increment_no(&self, at: DateTime<Utc>) -> Result<()> {
        let result = self
            .metrics
            .upsert_one(
                singleton_filter(),
                doc! {
                    "$inc": { "no_count": 1_i64 },
                    "$set": { "last_no_click_at": BsonDateTime::from_chrono(at) },
                },
            )
            .await?;
        debug!(upserted = result.upserted_id.is_some(), "no-count incremented");
        Ok(())
    }

    async fn record_yes(&self, no_count: i64, at: DateTime<Utc>) -> Result<()> {
        self.metrics
            .upsert_one(
                singleton_filter(),
                doc! {
                    "$set": {
                        "has_said_yes": true,
                        "yes_clicked_at": BsonDateTime::from_chrono(at),
                        "total_no_before_yes": no_count,
                    },
                },
            )
            .await?;
        Ok(())
    }

    async fn record_signature(&self, name: &str, at: DateTime<Utc>) -> Result<()> {
        self.metrics
            .upsert_one(
                singleton_filter(),
                doc! {
                    "$set": {
                        "has_signed": true,
                        "signature_name": name,
                        "signed_at": BsonDateTime::from_chrono(at),
                    },
                },
            )
            .await?;
        Ok(())
    }

    async fn reset_no(&self) -> Result<()> {
        self.metrics
            .upsert_one(
                singleton_filter(),
                doc! {
                    "$set": {
                        "no_count": 0_i64,
                        "last_no_click_at": Bson::Null,
                    },
                },
            )
            .await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl SubmissionStore for MongoStore {
    async fn append(&self, submission: SubmissionDoc) -> Result<String> {
        self.submissions.insert_one(submission).await
    }
}
