//! Append-only visitor submissions

use bson::DateTime;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::db::schemas::{SubmissionCategory, SubmissionDoc};
use crate::store::SubmissionStore;
use crate::types::{Result, VallyError};

/// Raw `POST /api/save` body
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionRequest {
    #[serde(rename = "type")]
    pub category: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Result of a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Stored { id: String },
    /// No store configured; accepted but not persisted
    Simulated,
}

/// Submission operations over an optional store
#[derive(Clone)]
pub struct SubmissionService {
    store: Option<Arc<dyn SubmissionStore>>,
}

impl SubmissionService {
    pub fn new(store: Option<Arc<dyn SubmissionStore>>) -> Self {
        Self { store }
    }

    /// Validate and append one submission
    pub async fn submit(&self, request: SubmissionRequest) -> Result<SubmitOutcome> {
        let category: SubmissionCategory = request.category.parse()?;

        let payload = match request.data {
            None | Some(serde_json::Value::Null) => bson::Document::new(),
            Some(serde_json::Value::Object(map)) => bson::to_document(&map)?,
            Some(_) => {
                return Err(VallyError::BadRequest(
                    "Submission data must be a JSON object".to_string(),
                ))
            }
        };

        let Some(ref store) = self.store else {
            warn!(category = %category, "No document store configured, simulating save");
            return Ok(SubmitOutcome::Simulated);
        };

        let id = store
            .append(SubmissionDoc::new(category, payload, DateTime::now()))
            .await?;
        info!(category = %category, id = %id, "Submission saved");

        Ok(SubmitOutcome::Stored { id })
    }
}
