//! HTTP server implementation
//!
//! Uses hyper http1 with TokioIo; one task per connection, routing on
//! `(method, path)`.

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::config::Args;
use crate::content::{AssetUrls, ContentService};
use crate::db::MongoClient;
use crate::notify::Notifier;
use crate::routes;
use crate::services::{MetricsService, SubmissionService};
use crate::store::{MetricsStore, SubmissionStore};
use crate::types::VallyError;

/// Shared application state
pub struct AppState {
    pub args: Args,
    pub metrics: MetricsService,
    pub submissions: SubmissionService,
    pub content: ContentService,
    /// Whether writes reach a real store (false means simulated)
    pub store_connected: bool,
    pub notifications_enabled: bool,
    pub started_at: Instant,
}

impl AppState {
    /// State without a document store: writes are simulated, content is empty
    pub fn new(args: Args, notifier: Option<Arc<dyn Notifier>>) -> Self {
        let assets = AssetUrls::from_args(&args.assets);
        Self {
            metrics: MetricsService::new(None, notifier.clone()),
            submissions: SubmissionService::new(None),
            content: ContentService::new(None, assets),
            store_connected: false,
            notifications_enabled: notifier.is_some(),
            started_at: Instant::now(),
            args,
        }
    }

    /// State backed by `store` for metrics and submissions
    ///
    /// `mongo` feeds the read-only content API when present.
    pub fn with_store<S>(
        args: Args,
        store: Arc<S>,
        mongo: Option<MongoClient>,
        notifier: Option<Arc<dyn Notifier>>,
    ) -> Self
    where
        S: MetricsStore + SubmissionStore + 'static,
    {
        let assets = AssetUrls::from_args(&args.assets);
        let metrics_store: Arc<dyn MetricsStore> = store.clone();
        let submission_store: Arc<dyn SubmissionStore> = store;

        Self {
            metrics: MetricsService::new(Some(metrics_store), notifier.clone()),
            submissions: SubmissionService::new(Some(submission_store)),
            content: ContentService::new(mongo, assets),
            store_connected: true,
            notifications_enabled: notifier.is_some(),
            started_at: Instant::now(),
            args,
        }
    }
}

/// Start the HTTP server
pub async fn run(state: Arc<AppState>) -> Result<(), VallyError> {
    let listener = TcpListener::bind(state.args.listen).await?;

    info!("Vally listening on {}", state.args.listen);

    if !state.store_connected {
        warn!("No document store - metrics and submissions will be simulated, not saved");
    }
    if !state.notifications_enabled {
        warn!("Email notifications disabled (RESEND_API_KEY / NOTIFICATION_EMAIL unset)");
    }

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, addr, req).await }
                    });

                    if let Err(err) = http1::Builder::new()
                        .preserve_header_case(true)
                        .title_case_headers(true)
                        .serve_connection(io, service)
                        .await
                    {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Route incoming HTTP requests
async fn handle_request(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<Incoming>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    debug!("[{}] {} {}", addr, method, path);

    let response = match (method, path.as_str()) {
        (Method::GET, "/health") | (Method::GET, "/healthz") => {
            routes::health_check(Arc::clone(&state))
        }

        (Method::GET, "/version") => routes::version_info(),

        (Method::OPTIONS, _) => preflight_response(),

        (Method::GET, "/api/metrics") => routes::handle_get_metrics(state).await,
        (Method::POST, "/api/metrics") => {
            routes::handle_post_metrics(req.into_body(), state).await
        }
        (Method::DELETE, "/api/metrics") => routes::handle_reset_metrics(state).await,

        (Method::POST, "/api/save") => routes::handle_save(req.into_body(), state).await,

        (Method::GET, p) if p.starts_with("/api/content/") => {
            let kind = p.strip_prefix("/api/content/").unwrap_or("");
            routes::handle_content(state, kind).await
        }

        (_, "/api/metrics") | (_, "/api/save") => method_not_allowed_response(),

        _ => not_found_response(&path),
    };

    Ok(response)
}

/// CORS preflight response
fn preflight_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Headers", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, DELETE, OPTIONS")
        .body(Full::new(Bytes::new()))
        .unwrap()
}

/// Not found response
fn not_found_response(path: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "error": "Not Found",
        "path": path,
    });

    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}

/// Method not allowed on a known resource
fn method_not_allowed_response() -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "error": "Method Not Allowed" });

    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}
