//! Submission document schema
//!
//! Append-only records of what visitors typed into the page.

use bson::{doc, oid::ObjectId, DateTime, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::db::mongo::{IntoIndexes, MutMetadata};
use crate::db::schemas::Metadata;
use crate::types::VallyError;

/// Collection name for submissions
pub const SUBMISSION_COLLECTION: &str = "submissions";

/// What kind of form produced a submission
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionCategory {
    /// Suggested travel destination
    Place,
    /// Terms and conditions signature
    Signature,
    /// Answer to the proposal
    Proposal,
}

impl SubmissionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Place => "place",
            Self::Signature => "signature",
            Self::Proposal => "proposal",
        }
    }
}

impl fmt::Display for SubmissionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionCategory {
    type Err = VallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "place" => Ok(Self::Place),
            "signature" => Ok(Self::Signature),
            "proposal" => Ok(Self::Proposal),
            other => Err(VallyError::BadRequest(format!(
                "Unknown submission category: {}",
                other
            ))),
        }
    }
}

/// Submission document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SubmissionDoc {
    /// MongoDB document ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,

    /// Common metadata
    #[serde(default)]
    pub metadata: Metadata,

    /// Which form produced this record
    pub category: SubmissionCategory,

    /// Fields exactly as the page sent them
    #[serde(default)]
    pub payload: Document,

    /// Server time of the submission
    pub submitted_at: DateTime,
}

impl SubmissionDoc {
    /// Create a new submission stamped with `submitted_at`
    pub fn new(category: SubmissionCategory, payload: Document, submitted_at: DateTime) -> Self {
        Self {
            _id: None,
            metadata: Metadata::new(),
            category,
            payload,
            submitted_at,
        }
    }
}

impl IntoIndexes for SubmissionDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![(
            doc! { "category": 1, "submitted_at": -1 },
            Some(
                IndexOptions::builder()
                    .name("category_submitted_at".to_string())
                    .build(),
            ),
        )]
    }
}

impl MutMetadata for SubmissionDoc {
    fn mut_metadata(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!(
            "place".parse::<SubmissionCategory>().unwrap(),
            SubmissionCategory::Place
        );
        assert_eq!(
            "proposal".parse::<SubmissionCategory>().unwrap(),
            SubmissionCategory::Proposal
        );
        assert!("Place".parse::<SubmissionCategory>().is_err());
        assert!("".parse::<SubmissionCategory>().is_err());
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&SubmissionCategory::Signature).unwrap();
        assert_eq!(json, "\"signature\"");
    }
}
