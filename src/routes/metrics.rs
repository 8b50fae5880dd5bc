//! `/api/metrics` handlers
//!
//! - `GET` returns the singleton with zero-value defaults
//! - `POST {type, data}` records a `no-click`, `yes-click` or `signature`
//! - `DELETE` resets the no-count

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Body;
use hyper::{Response, StatusCode};
use serde_json::json;
use std::sync::Arc;

use crate::routes::{error_response, json_response, read_json};
use crate::server::AppState;
use crate::services::{EventRequest, MetricsEvent, WriteOutcome};

pub async fn handle_get_metrics(state: Arc<AppState>) -> Response<Full<Bytes>> {
    match state.metrics.snapshot().await {
        Ok(snapshot) => json_response(StatusCode::OK, snapshot),
        Err(e) => error_response(e, "Metrics fetch error", "Failed to fetch metrics"),
    }
}

pub async fn handle_post_metrics<B>(body: B, state: Arc<AppState>) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let event = match read_json::<_, EventRequest>(body)
        .await
        .and_then(MetricsEvent::from_request)
    {
        Ok(event) => event,
        Err(e) => return error_response(e, "Metrics request error", "Failed to save metrics"),
    };

    let kind = event.kind();
    match state.metrics.record(event).await {
        Ok(WriteOutcome::Recorded) => {
            json_response(StatusCode::OK, json!({ "success": true, "event": kind }))
        }
        Ok(WriteOutcome::Simulated) => {
            json_response(StatusCode::OK, json!({ "success": true, "simulated": true }))
        }
        Err(e) => error_response(e, "Metrics save error", "Failed to save metrics"),
    }
}

pub async fn handle_reset_metrics(state: Arc<AppState>) -> Response<Full<Bytes>> {
    match state.metrics.reset().await {
        Ok(WriteOutcome::Recorded) => json_response(
            StatusCode::OK,
            json!({ "success": true, "message": "No-count reset to 0" }),
        ),
        Ok(WriteOutcome::Simulated) => {
            json_response(StatusCode::OK, json!({ "success": true, "simulated": true }))
        }
        Err(e) => error_response(e, "Metrics reset error", "Failed to reset metrics"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Args;
    use crate::routes::test_support::body_json;
    use crate::store::MemoryStore;
    use clap::Parser;

    fn state_with_store() -> Arc<AppState> {
        let args = Args::parse_from(["vally"]);
        Arc::new(AppState::with_store(
            args,
            Arc::new(MemoryStore::new()),
            None,
            None,
        ))
    }

    fn body(json: serde_json::Value) -> Full<Bytes> {
        Full::new(Bytes::from(json.to_string()))
    }

    #[tokio::test]
    async fn test_no_click_then_get() {
        let state = state_with_store();
        for _ in 0..2 {
            let response =
                handle_post_metrics(body(json!({"type": "no-click"})), Arc::clone(&state)).await;
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(body_json(response).await["event"], "no-click");
        }

        let json = body_json(handle_get_metrics(Arc::clone(&state)).await).await;
        assert_eq!(json["noCount"], 2);
        assert!(json["lastNoClickAt"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_event_is_400_and_changes_nothing() {
        let state = state_with_store();
        let response =
            handle_post_metrics(body(json!({"type": "maybe"})), Arc::clone(&state)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(handle_get_metrics(state).await).await;
        assert_eq!(json["noCount"], 0);
        assert_eq!(json["hasSaidYes"], false);
    }

    #[tokio::test]
    async fn test_missing_type_is_400() {
        let state = state_with_store();
        let response = handle_post_metrics(body(json!({"data": {}})), state).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_simulated_without_store() {
        let state = Arc::new(AppState::new(Args::parse_from(["vally"]), None));
        let response =
            handle_post_metrics(body(json!({"type": "yes-click"})), Arc::clone(&state)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["simulated"], true);

        let json = body_json(handle_reset_metrics(state).await).await;
        assert_eq!(json["simulated"], true);
    }

    #[tokio::test]
    async fn test_reset_message() {
        let state = state_with_store();
        let json = body_json(handle_reset_metrics(state).await).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "No-count reset to 0");
    }
}
