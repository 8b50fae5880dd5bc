//! HTTP routes for Vally

pub mod content;
pub mod health;
pub mod metrics;
pub mod save;

pub use content::handle_content;
pub use health::{health_check, version_info};
pub use metrics::{handle_get_metrics, handle_post_metrics, handle_reset_metrics};
pub use save::handle_save;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Body;
use hyper::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::error;

use crate::types::VallyError;

/// Serialize `body` as a JSON response with permissive CORS
pub(crate) fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response<Full<Bytes>> {
    match serde_json::to_string(&body) {
        Ok(json) => Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .header("Access-Control-Allow-Origin", "*")
            .header("Cache-Control", "no-store")
            .body(Full::new(Bytes::from(json)))
            .unwrap_or_else(|_| {
                Response::builder()
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .body(Full::new(Bytes::from("Failed to build response")))
                    .unwrap()
            }),
        Err(_) => Response::builder()
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .body(Full::new(Bytes::from("Failed to serialize response")))
            .unwrap(),
    }
}

/// Map an error to a response
///
/// Client errors echo their message. Server errors are logged with `context`
/// and answered with the generic `public_message` only.
pub(crate) fn error_response(
    err: VallyError,
    context: &str,
    public_message: &str,
) -> Response<Full<Bytes>> {
    let status = err.status_code();
    if err.is_client_error() {
        return json_response(status, serde_json::json!({ "error": err.to_string() }));
    }

    error!(error = %err, "{}", context);
    json_response(status, serde_json::json!({ "error": public_message }))
}

/// Collect a request body and decode it as JSON
pub(crate) async fn read_json<B, T>(body: B) -> Result<T, VallyError>
where
    B: Body,
    B::Error: std::fmt::Display,
    T: DeserializeOwned,
{
    let bytes = body
        .collect()
        .await
        .map_err(|e| VallyError::BadRequest(format!("Failed to read request body: {}", e)))?
        .to_bytes();

    serde_json::from_slice(&bytes)
        .map_err(|e| VallyError::BadRequest(format!("Invalid JSON: {}", e)))
}

#[cfg(test)]
pub(crate) mod test_support {
    use bytes::Bytes;
    use http_body_util::{BodyExt, Full};
    use hyper::Response;

    /// Decode a handler response body as JSON
    pub async fn body_json(response: Response<Full<Bytes>>) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_support::body_json;

    #[tokio::test]
    async fn test_server_error_hides_detail() {
        let response = error_response(
            VallyError::Database("connection refused at 10.0.0.3".to_string()),
            "Metrics save error",
            "Failed to save metrics",
        );
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Failed to save metrics");
    }

    #[tokio::test]
    async fn test_client_error_is_echoed() {
        let response = error_response(
            VallyError::BadRequest("Unknown event type: x".to_string()),
            "ignored",
            "ignored",
        );
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("Unknown event type"));
    }

    #[tokio::test]
    async fn test_read_json_rejects_garbage() {
        let result: Result<serde_json::Value, _> =
            read_json(Full::new(Bytes::from_static(b"not json"))).await;
        assert!(matches!(result, Err(VallyError::BadRequest(_))));
    }
}
