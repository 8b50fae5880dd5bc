//! Common metadata for written documents
//!
//! Tracks creation and update timestamps. Vally never deletes documents, but
//! the soft-delete flag is kept so operators can hide a record by hand.

use bson::DateTime;
use serde::{Deserialize, Serialize};

/// Common metadata for all written documents
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Metadata {
    /// Whether this document has been hidden by an operator
    #[serde(default)]
    pub is_deleted: bool,

    /// When the document was last updated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,

    /// When the document was created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
}

impl Metadata {
    /// Create new metadata with current timestamp
    pub fn new() -> Self {
        let now = DateTime::now();
        Self {
            is_deleted: false,
            updated_at: Some(now),
            created_at: Some(now),
        }
    }
}
