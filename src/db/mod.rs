//! Document store access
//!
//! MongoDB client wrapper plus the document schemas Vally reads and writes.

pub mod mongo;
pub mod schemas;

pub use mongo::{IntoIndexes, MongoClient, MongoCollection, MutMetadata};
