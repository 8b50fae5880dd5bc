//! Resend HTTP API client
//!
//! Sends one email per notification via `POST {api_url}/emails`.

use chrono::FixedOffset;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::NotifyArgs;
use crate::notify::{render, Notification, Notifier};
use crate::types::{Result, VallyError};

/// Configuration for the Resend notifier
#[derive(Debug, Clone)]
pub struct ResendConfig {
    pub api_key: String,
    pub api_url: String,
    pub from: String,
    pub to: String,
    /// Offset used when printing times in emails
    pub offset: FixedOffset,
    pub request_timeout: Duration,
}

impl ResendConfig {
    /// Build from CLI/env arguments; `None` when notifications are disabled
    pub fn from_args(args: &NotifyArgs, request_timeout: Duration) -> Option<Self> {
        if !args.is_enabled() {
            return None;
        }

        Some(Self {
            api_key: args.resend_api_key.clone()?,
            api_url: args.resend_api_url.trim_end_matches('/').to_string(),
            from: args.notification_from.clone(),
            to: args.notification_email.clone()?,
            offset: FixedOffset::east_opt(args.utc_offset_minutes * 60)?,
            request_timeout,
        })
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

/// Notifier backed by the Resend API
pub struct ResendNotifier {
    config: ResendConfig,
    http_client: reqwest::Client,
}

impl ResendNotifier {
    /// Build the HTTP client; fails when the TLS backend cannot initialize
    pub fn new(config: ResendConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("vally/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| VallyError::Internal(format!("Failed to build email client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/emails", self.config.api_url)
    }
}

#[async_trait::async_trait]
impl Notifier for ResendNotifier {
    async fn send(&self, notification: &Notification) -> Result<()> {
        let message = render(notification, self.config.offset);
        let body = SendEmailRequest {
            from: &self.config.from,
            to: [&self.config.to],
            subject: &message.subject,
            html: &message.html,
        };

        debug!(kind = notification.kind(), "Sending notification email");

        let response = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(VallyError::Notification(format!(
                "Resend returned {}: {}",
                status, detail
            )));
        }

        info!(kind = notification.kind(), "Notification email sent");
        Ok(())
    }
}
