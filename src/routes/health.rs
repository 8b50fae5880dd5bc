//! Health and version endpoints
//!
//! `/health` always answers 200 while the process runs and reports whether
//! writes are persisted or simulated, so a missing store is visible without
//! reading logs.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;

use crate::routes::json_response;
use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub version: &'static str,
    /// Seconds since startup
    pub uptime: u64,
    /// `connected` or `simulated`
    pub store: &'static str,
    /// `enabled` or `disabled`
    pub notifications: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
struct VersionResponse {
    version: &'static str,
    commit: &'static str,
    build_time: &'static str,
    service: &'static str,
}

pub fn health_check(state: Arc<AppState>) -> Response<Full<Bytes>> {
    let response = HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION"),
        uptime: state.started_at.elapsed().as_secs(),
        store: if state.store_connected {
            "connected"
        } else {
            "simulated"
        },
        notifications: if state.notifications_enabled {
            "enabled"
        } else {
            "disabled"
        },
        timestamp: chrono::Utc::now().to_rfc3339(),
    };
    json_response(StatusCode::OK, response)
}

pub fn version_info() -> Response<Full<Bytes>> {
    json_response(
        StatusCode::OK,
        VersionResponse {
            version: env!("CARGO_PKG_VERSION"),
            commit: option_env!("GIT_COMMIT_SHORT").unwrap_or("unknown"),
            build_time: option_env!("BUILD_TIMESTAMP").unwrap_or("unknown"),
            service: "vally",
        },
    )
}
