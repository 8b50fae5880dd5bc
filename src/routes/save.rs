//! `POST /api/save`: append a visitor submission

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Body;
use hyper::{Response, StatusCode};
use serde_json::json;
use std::sync::Arc;

use crate::routes::{error_response, json_response, read_json};
use crate::server::AppState;
use crate::services::{SubmissionRequest, SubmitOutcome};

pub async fn handle_save<B>(body: B, state: Arc<AppState>) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let request: SubmissionRequest = match read_json(body).await {
        Ok(r) => r,
        Err(e) => return error_response(e, "Save request error", "Failed to save entry"),
    };

    match state.submissions.submit(request).await {
        Ok(SubmitOutcome::Stored { id }) => {
            json_response(StatusCode::OK, json!({ "success": true, "id": id }))
        }
        Ok(SubmitOutcome::Simulated) => {
            json_response(StatusCode::OK, json!({ "success": true, "simulated": true }))
        }
        Err(e) => error_response(e, "Save error", "Failed to save entry"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Args;
    use crate::db::schemas::SubmissionCategory;
    use crate::routes::test_support::body_json;
    use crate::store::MemoryStore;
    use clap::Parser;

    #[tokio::test]
    async fn test_save_appends_with_payload() {
        let store = Arc::new(MemoryStore::new());
        let state = Arc::new(AppState::with_store(
            Args::parse_from(["vally"]),
            Arc::clone(&store),
            None,
            None,
        ));

        let body = json!({"type": "place", "data": {"response": "Santorini", "votes": 2}});
        let response = handle_save(Full::new(Bytes::from(body.to_string())), state).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert!(json["id"].is_string());

        let saved = store.submissions().await;
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].category, SubmissionCategory::Place);
        assert_eq!(saved[0].payload.get_str("response").unwrap(), "Santorini");
        assert_eq!(saved[0].payload.get_i64("votes").unwrap(), 2);
    }

    #[tokio::test]
    async fn test_unknown_category_is_400() {
        let state = Arc::new(AppState::new(Args::parse_from(["vally"]), None));
        let body = json!({"type": "gossip", "data": {}});
        let response = handle_save(Full::new(Bytes::from(body.to_string())), state).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
