//! Proposal interaction metrics
//!
//! Reads and patches the metrics singleton. Acceptance and signature events
//! additionally attempt a notification email whose failure never affects the
//! write. Without a store every write is simulated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::db::schemas::MetricsDoc;
use crate::notify::{Notification, Notifier};
use crate::store::MetricsStore;
use crate::types::{Result, VallyError};

/// Fallback signer name when the page sends none
pub const UNKNOWN_SIGNER: &str = "Unknown";

/// Raw `POST /api/metrics` body
#[derive(Debug, Clone, Deserialize)]
pub struct EventRequest {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// A validated metrics event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsEvent {
    NoClick,
    YesClick { no_count: i64 },
    Signature { name: String },
}

impl MetricsEvent {
    /// Validate a raw request; unknown kinds are a client error
    pub fn from_request(request: EventRequest) -> Result<Self> {
        let data = request.data.unwrap_or(serde_json::Value::Null);

        match request.kind.as_str() {
            "no-click" => Ok(Self::NoClick),
            "yes-click" => {
                let no_count = data
                    .get("noCount")
                    .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
                    .unwrap_or(0)
                    .max(0);
                Ok(Self::YesClick { no_count })
            }
            "signature" => {
                // Blank names fall back; anything else is stored as sent
                let name = data
                    .get("name")
                    .and_then(|v| v.as_str())
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or(UNKNOWN_SIGNER)
                    .to_string();
                Ok(Self::Signature { name })
            }
            other => Err(VallyError::BadRequest(format!(
                "Unknown event type: {}",
                other
            ))),
        }
    }

    /// Wire name of the event
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoClick => "no-click",
            Self::YesClick { .. } => "yes-click",
            Self::Signature { .. } => "signature",
        }
    }
}

/// Metrics as returned to the page, zero-valued when nothing was written
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub no_count: i64,
    pub last_no_click_at: Option<DateTime<Utc>>,
    pub has_signed: bool,
    pub signature_name: Option<String>,
    pub signed_at: Option<DateTime<Utc>>,
    pub has_said_yes: bool,
    pub yes_clicked_at: Option<DateTime<Utc>>,
    pub total_no_before_yes: Option<i64>,
}

impl From<MetricsDoc> for MetricsSnapshot {
    fn from(doc: MetricsDoc) -> Self {
        Self {
            no_count: doc.no_count.max(0),
            last_no_click_at: doc.last_no_click_at.map(|t| t.to_chrono()),
            has_signed: doc.has_signed,
            signature_name: doc.signature_name,
            signed_at: doc.signed_at.map(|t| t.to_chrono()),
            has_said_yes: doc.has_said_yes,
            yes_clicked_at: doc.yes_clicked_at.map(|t| t.to_chrono()),
            total_no_before_yes: doc.total_no_before_yes,
        }
    }
}

/// Result of a write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Persisted to the store
    Recorded,
    /// No store configured; accepted but not persisted
    Simulated,
}

/// Metrics operations over an optional store and notifier
#[derive(Clone)]
pub struct MetricsService {
    store: Option<Arc<dyn MetricsStore>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl MetricsService {
    pub fn new(store: Option<Arc<dyn MetricsStore>>, notifier: Option<Arc<dyn Notifier>>) -> Self {
        Self { store, notifier }
    }

    /// Current metrics; never fails on a missing document
    pub async fn snapshot(&self) -> Result<MetricsSnapshot> {
        let Some(ref store) = self.store else {
            return Ok(MetricsSnapshot::default());
        };

        Ok(store.load().await?.map(Into::into).unwrap_or_default())
    }

    /// Apply one event
    pub async fn record(&self, event: MetricsEvent) -> Result<WriteOutcome> {
        let Some(ref store) = self.store else {
            warn!(event = event.kind(), "No document store configured, simulating metrics save");
            return Ok(WriteOutcome::Simulated);
        };

        let now = Utc::now();
        match event {
            MetricsEvent::NoClick => {
                store.increment_no(now).await?;
                info!("No button clicked");
            }
            MetricsEvent::YesClick { no_count } => {
                store.record_yes(no_count, now).await?;
                info!(no_count, "Proposal accepted");
                self.notify(Notification::SaidYes { no_count, at: now })
                    .await;
            }
            MetricsEvent::Signature { name } => {
                store.record_signature(&name, now).await?;
                info!(name = %name, "Terms signed");
                self.notify(Notification::Signed { name, at: now }).await;
            }
        }

        Ok(WriteOutcome::Recorded)
    }

    /// Zero the no-count; acceptance and signature state stay as they are
    pub async fn reset(&self) -> Result<WriteOutcome> {
        let Some(ref store) = self.store else {
            warn!("No document store configured, simulating metrics reset");
            return Ok(WriteOutcome::Simulated);
        };

        store.reset_no().await?;
        info!("No-count reset to 0");
        Ok(WriteOutcome::Recorded)
    }

    async fn notify(&self, notification: Notification) {
        let Some(ref notifier) = self.notifier else {
            warn!(
                kind = notification.kind(),
                "Email notifications not configured, skipping"
            );
            return;
        };

        if let Err(e) = notifier.send(&notification).await {
            error!(kind = notification.kind(), error = %e, "Failed to send notification email");
        }
    }
}
