//! Vally - interaction metrics and submissions for the proposal site
//!
//! A small hyper server in front of MongoDB:
//!
//! - **Metrics**: the "metrics" singleton (no-clicks, acceptance, signature)
//!   with best-effort notification emails via Resend
//! - **Submissions**: append-only records from the page's forms
//! - **Content**: read-only CMS models with asset URLs resolved
//!
//! Every credential is optional. Without a store, writes are answered with a
//! simulated success and nothing is persisted.

pub mod config;
pub mod content;
pub mod db;
pub mod notify;
pub mod routes;
pub mod server;
pub mod services;
pub mod store;
pub mod types;

pub use config::Args;
pub use server::{run, AppState};
pub use types::{Result, VallyError};
