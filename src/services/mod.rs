//! Request-independent business logic
//!
//! Route handlers parse HTTP and delegate here; services decide what to
//! persist, what to simulate, and which notifications to attempt.

pub mod metrics;
pub mod submissions;

pub use metrics::{EventRequest, MetricsEvent, MetricsService, MetricsSnapshot, WriteOutcome};
pub use submissions::{SubmissionRequest, SubmissionService, SubmitOutcome};
