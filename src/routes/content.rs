//! `GET /api/content/{kind}`: read-only CMS content

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use std::sync::Arc;

use crate::content::ContentKind;
use crate::routes::{error_response, json_response};
use crate::server::AppState;

pub async fn handle_content(state: Arc<AppState>, kind: &str) -> Response<Full<Bytes>> {
    let kind: ContentKind = match kind.parse() {
        Ok(k) => k,
        Err(e) => return error_response(e, "Content lookup error", "Failed to fetch content"),
    };

    match state.content.list(kind).await {
        Ok(items) => json_response(StatusCode::OK, items),
        Err(e) => error_response(e, "Content fetch error", "Failed to fetch content"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Args;
    use crate::routes::test_support::body_json;
    use clap::Parser;

    #[tokio::test]
    async fn test_unknown_kind_is_404() {
        let state = Arc::new(AppState::new(Args::parse_from(["vally"]), None));
        let response = handle_content(state, "secrets").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_known_kind_without_store_is_empty() {
        let state = Arc::new(AppState::new(Args::parse_from(["vally"]), None));
        let response = handle_content(state, "milestones").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }
}
