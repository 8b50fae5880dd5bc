//! Database schemas for Vally
//!
//! Documents Vally writes (metrics, submissions) and the read-only content
//! models the page renders.

mod content;
mod metadata;
mod metrics;
mod submission;

pub use content::{
    AudioTrackDoc, FutureGalleryDoc, FutureMemoryDoc, HeroDoc, MilestoneDoc, NarrativeDoc,
    PlaceDoc, ReasonDoc, TermDoc,
};
pub use metadata::Metadata;
pub use metrics::{MetricsDoc, METRICS_COLLECTION, METRICS_DOC_ID};
pub use submission::{SubmissionCategory, SubmissionDoc, SUBMISSION_COLLECTION};
