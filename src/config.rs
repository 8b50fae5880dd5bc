//! Configuration for Vally
//!
//! CLI arguments and environment variable handling using clap. Every external
//! credential is optional: without a store the server simulates writes, and
//! without an email key it skips notifications.

use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

/// Vally - interaction metrics and submissions for the proposal site
#[derive(Parser, Debug, Clone)]
#[command(name = "vally")]
#[command(about = "Interaction metrics and submission service for the Vally proposal site")]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// MongoDB connection URI (with write credentials)
    /// When unset, writes are simulated and nothing is persisted
    #[arg(long, env = "MONGODB_URI")]
    pub mongodb_uri: Option<String>,

    /// MongoDB database name
    #[arg(long, env = "MONGODB_DB", default_value = "vally")]
    pub mongodb_db: String,

    /// Email notification configuration
    #[command(flatten)]
    pub notify: NotifyArgs,

    /// Asset CDN configuration for content image/file references
    #[command(flatten)]
    pub assets: AssetArgs,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Outbound request timeout in milliseconds (email provider)
    #[arg(long, env = "REQUEST_TIMEOUT_MS", default_value = "10000")]
    pub request_timeout_ms: u64,
}

/// Resend email notification configuration
#[derive(Parser, Debug, Clone)]
pub struct NotifyArgs {
    /// Resend API key (optional, notifications disabled when unset)
    #[arg(long, env = "RESEND_API_KEY")]
    pub resend_api_key: Option<String>,

    /// Destination address for notifications
    #[arg(long, env = "NOTIFICATION_EMAIL")]
    pub notification_email: Option<String>,

    /// Sender shown on notifications
    #[arg(
        long,
        env = "NOTIFICATION_FROM",
        default_value = "Vally <onboarding@resend.dev>"
    )]
    pub notification_from: String,

    /// Resend API base URL
    #[arg(long, env = "RESEND_API_URL", default_value = "https://api.resend.com")]
    pub resend_api_url: String,

    /// UTC offset in minutes used for timestamps inside emails (default IST)
    #[arg(
        long,
        env = "NOTIFY_UTC_OFFSET_MINUTES",
        default_value = "330",
        allow_negative_numbers = true
    )]
    pub utc_offset_minutes: i32,
}

/// Asset CDN configuration
#[derive(Parser, Debug, Clone)]
pub struct AssetArgs {
    /// CDN base URL for images and files
    #[arg(long, env = "ASSET_CDN_URL", default_value = "https://cdn.sanity.io")]
    pub asset_cdn_url: String,

    /// Asset project identifier
    #[arg(long, env = "ASSET_PROJECT_ID", default_value = "6gzyu3p8")]
    pub asset_project_id: String,

    /// Asset dataset
    #[arg(long, env = "ASSET_DATASET", default_value = "production")]
    pub asset_dataset: String,
}

impl NotifyArgs {
    /// Both key and destination are required to send anything
    pub fn is_enabled(&self) -> bool {
        self.resend_api_key.as_deref().is_some_and(|k| !k.is_empty())
            && self
                .notification_email
                .as_deref()
                .is_some_and(|e| !e.is_empty())
    }
}

impl Args {
    /// Whether a document store is configured
    pub fn has_store(&self) -> bool {
        self.mongodb_uri.as_deref().is_some_and(|u| !u.is_empty())
    }

    /// Outbound request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        // chrono::FixedOffset accepts strictly less than a day
        if self.notify.utc_offset_minutes.abs() >= 24 * 60 {
            return Err("NOTIFY_UTC_OFFSET_MINUTES must be within (-1440, 1440)".to_string());
        }

        if self.request_timeout_ms == 0 {
            return Err("REQUEST_TIMEOUT_MS must be greater than zero".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec!["vally"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_defaults_validate() {
        let args = parse(&[]);
        assert!(args.validate().is_ok());
        assert_eq!(args.notify.utc_offset_minutes, 330);
        assert_eq!(args.mongodb_db, "vally");
    }

    #[test]
    fn test_notify_requires_key_and_destination() {
        let args = parse(&["--resend-api-key", "re_123"]);
        assert!(!args.notify.is_enabled());

        let args = parse(&[
            "--resend-api-key",
            "re_123",
            "--notification-email",
            "me@example.com",
        ]);
        assert!(args.notify.is_enabled());
    }

    #[test]
    fn test_empty_store_uri_is_unconfigured() {
        let args = parse(&["--mongodb-uri", ""]);
        assert!(!args.has_store());
    }

    #[test]
    fn test_rejects_offset_out_of_range() {
        let args = parse(&["--utc-offset-minutes", "1440"]);
        assert!(args.validate().is_err());

        let args = parse(&["--utc-offset-minutes", "-300"]);
        assert!(args.validate().is_ok());
    }
}
