//! Notification emails
//!
//! Two state transitions are worth an email: the proposal being accepted and
//! the terms being signed. Delivery is best effort; callers log and drop
//! failures.

mod resend;
mod templates;

pub use resend::{ResendConfig, ResendNotifier};
pub use templates::{render, EmailMessage};

use chrono::{DateTime, Utc};

use crate::types::Result;

/// A notification-worthy transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// "Yes" was clicked after `no_count` refusals
    SaidYes { no_count: i64, at: DateTime<Utc> },
    /// Terms signed as `name`
    Signed { name: String, at: DateTime<Utc> },
}

impl Notification {
    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SaidYes { .. } => "said-yes",
            Self::Signed { .. } => "signed",
        }
    }
}

/// Delivers notifications
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<()>;
}
