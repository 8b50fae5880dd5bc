//! Vally - interaction metrics and submissions for the proposal site

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vally::{
    config::Args,
    db::MongoClient,
    notify::{Notifier, ResendConfig, ResendNotifier},
    server,
    store::MongoStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("vally={},info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    info!("======================================");
    info!("  Vally");
    info!("======================================");
    info!("Listen: {}", args.listen);
    info!("Store: {}", if args.has_store() { "MongoDB" } else { "none (simulated)" });
    info!("MongoDB database: {}", args.mongodb_db);
    info!(
        "Notifications: {}",
        if args.notify.is_enabled() { "Resend" } else { "disabled" }
    );
    info!("======================================");

    let notifier: Option<Arc<dyn Notifier>> =
        match ResendConfig::from_args(&args.notify, args.request_timeout()) {
            Some(config) => match ResendNotifier::new(config) {
                Ok(notifier) => Some(Arc::new(notifier)),
                Err(e) => {
                    error!("Email client error: {}", e);
                    std::process::exit(1);
                }
            },
            None => None,
        };

    // An unreachable or unauthenticated store degrades to simulated writes
    let mongo = match args.mongodb_uri.as_deref().filter(|u| !u.is_empty()) {
        Some(uri) => match MongoClient::new(uri, &args.mongodb_db).await {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("MongoDB unavailable, continuing with simulated writes: {}", e);
                None
            }
        },
        None => None,
    };

    let store = match mongo {
        Some(ref client) => match MongoStore::new(client).await {
            Ok(store) => Some(Arc::new(store)),
            Err(e) => {
                warn!("MongoDB collections unavailable, continuing with simulated writes: {}", e);
                None
            }
        },
        None => None,
    };

    let state = match store {
        Some(store) => server::AppState::with_store(args, store, mongo, notifier),
        None => server::AppState::new(args, notifier),
    };

    if let Err(e) = server::run(Arc::new(state)).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
