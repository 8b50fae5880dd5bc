//! Metrics singleton document schema
//!
//! One document with a fixed id holds every proposal interaction counter.

use bson::{DateTime, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::{IntoIndexes, MutMetadata};
use crate::db::schemas::Metadata;

/// Collection name for the metrics singleton
pub const METRICS_COLLECTION: &str = "metrics";

/// Fixed id of the one metrics document
pub const METRICS_DOC_ID: &str = "metrics-singleton";

/// Metrics document stored in MongoDB
///
/// Every field defaults so a partially written document (e.g. created by an
/// upserted `$inc`) still deserializes.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct MetricsDoc {
    /// Always `METRICS_DOC_ID`
    #[serde(rename = "_id", default)]
    pub id: String,

    /// Common metadata
    #[serde(default)]
    pub metadata: Metadata,

    /// Times the "No" button was clicked
    #[serde(default)]
    pub no_count: i64,

    /// Last "No" click
    #[serde(default)]
    pub last_no_click_at: Option<DateTime>,

    /// Whether the terms were signed (monotonic)
    #[serde(default)]
    pub has_signed: bool,

    /// Name the terms were signed with
    #[serde(default)]
    pub signature_name: Option<String>,

    /// When the terms were signed
    #[serde(default)]
    pub signed_at: Option<DateTime>,

    /// Whether "Yes" was clicked (monotonic)
    #[serde(default)]
    pub has_said_yes: bool,

    /// When "Yes" was clicked
    #[serde(default)]
    pub yes_clicked_at: Option<DateTime>,

    /// No-count reported by the page at the moment of "Yes"
    #[serde(default)]
    pub total_no_before_yes: Option<i64>,

    /// Sticker image references shown on each "No" click (CMS-authored)
    #[serde(default, alias = "reactionImages")]
    pub reaction_images: Vec<String>,

    /// Sound file references played on each "No" click (CMS-authored)
    #[serde(default, alias = "reactionSounds")]
    pub reaction_sounds: Vec<String>,
}

impl MetricsDoc {
    /// Fresh singleton with zero values
    pub fn singleton() -> Self {
        Self {
            id: METRICS_DOC_ID.to_string(),
            metadata: Metadata::new(),
            ..Default::default()
        }
    }
}

impl IntoIndexes for MetricsDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        // Looked up by _id only
        vec![]
    }
}

impl MutMetadata for MetricsDoc {
    fn mut_metadata(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}
