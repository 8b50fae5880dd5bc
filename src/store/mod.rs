//! Storage seams for metrics and submissions
//!
//! Handlers talk to these traits so the MongoDB implementation can be swapped
//! for the in-memory one in tests. Implementations must apply each operation
//! as a single partial update so concurrent requests never clobber fields they
//! did not touch.

mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use chrono::{DateTime, Utc};

use crate::db::schemas::{MetricsDoc, SubmissionDoc};
use crate::types::Result;

/// Access to the metrics singleton
#[async_trait::async_trait]
pub trait MetricsStore: Send + Sync {
    /// Current singleton, `None` if never written
    async fn load(&self) -> Result<Option<MetricsDoc>>;
    /// Atomically add one to the no-count and stamp the click
    async fn increment_no(&self, at: DateTime<Utc>) -> Result<()>;
    /// Mark the proposal accepted with the page-reported no-count
    async fn record_yes(&self, no_count: i64, at: DateTime<Utc>) -> Result<()>;
    /// Mark the terms signed
    async fn record_signature(&self, name: &str, at: DateTime<Utc>) -> Result<()>;
    /// Zero the no-count and clear its timestamp, leaving everything else
    async fn reset_no(&self) -> Result<()>;
}

/// Append-only submission log
#[async_trait::async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Insert a new record and return its id
    async fn append(&self, submission: SubmissionDoc) -> Result<String>;
}
