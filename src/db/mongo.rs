//! MongoDB client and collection wrapper

use bson::{doc, Bson, DateTime, Document};
use futures_util::StreamExt;
use mongodb::{
    options::IndexOptions,
    results::UpdateResult,
    Client, Collection, IndexModel,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{error, info};

use crate::db::schemas::Metadata;
use crate::types::VallyError;

/// Trait for schemas that provide index definitions
pub trait IntoIndexes {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)>;
}

/// Trait for schemas with mutable metadata
pub trait MutMetadata {
    fn mut_metadata(&mut self) -> &mut Metadata;
}

/// MongoDB client wrapper
#[derive(Clone)]
pub struct MongoClient {
    client: Client,
    db_name: String,
}

impl MongoClient {
    /// Connect and verify with a ping
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, VallyError> {
        info!("Connecting to MongoDB");

        // Short selection timeout so an unreachable store fails startup fast
        let timeout_uri = if uri.contains('?') {
            format!("{}&serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
        } else {
            format!("{}?serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
        };

        let client = Client::with_uri_str(&timeout_uri)
            .await
            .map_err(|e| VallyError::Database(format!("Failed to connect to MongoDB: {}", e)))?;

        client
            .database(db_name)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| VallyError::Database(format!("MongoDB ping failed: {}", e)))?;

        info!("Connected to MongoDB database '{}'", db_name);

        Ok(Self {
            client,
            db_name: db_name.to_string(),
        })
    }

    /// Get a typed, indexed collection for documents Vally writes
    pub async fn collection<T>(&self, name: &str) -> Result<MongoCollection<T>, VallyError>
    where
        T: Serialize + DeserializeOwned + Unpin + Send + Sync + IntoIndexes + MutMetadata,
    {
        MongoCollection::new(&self.client, &self.db_name, name).await
    }

    /// Read matching documents of a read-only collection, ordered by `sort`
    ///
    /// Documents that fail to decode are logged and skipped.
    pub async fn find_sorted<T>(
        &self,
        name: &str,
        filter: Document,
        sort: Document,
    ) -> Result<Vec<T>, VallyError>
    where
        T: DeserializeOwned + Unpin + Send + Sync,
    {
        let cursor = self
            .client
            .database(&self.db_name)
            .collection::<T>(name)
            .find(filter)
            .sort(sort)
            .await
            .map_err(|e| VallyError::Database(format!("Find on '{}' failed: {}", name, e)))?;

        Ok(collect_cursor(cursor).await)
    }
}

async fn collect_cursor<T>(cursor: mongodb::Cursor<T>) -> Vec<T>
where
    T: DeserializeOwned + Unpin + Send + Sync,
{
    cursor
        .filter_map(|doc| async {
            match doc {
                Ok(d) => Some(d),
                Err(e) => {
                    error!("Error reading document: {}", e);
                    None
                }
            }
        })
        .collect()
        .await
}

/// Typed MongoDB collection with automatic indexing
#[derive(Debug, Clone)]
pub struct MongoCollection<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    inner: Collection<T>,
}

impl<T> MongoCollection<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync + IntoIndexes + MutMetadata,
{
    /// Create a new collection and apply indexes
    pub async fn new(
        client: &Client,
        db_name: &str,
        collection_name: &str,
    ) -> Result<Self, VallyError> {
        let collection = client.database(db_name).collection::<T>(collection_name);
        let mongo_collection = MongoCollection { inner: collection };

        mongo_collection.apply_indexes().await?;

        Ok(mongo_collection)
    }

    /// Apply schema-defined indexes
    async fn apply_indexes(&self) -> Result<(), VallyError> {
        let schema_indices = T::into_indices();

        if schema_indices.is_empty() {
            return Ok(());
        }

        let indices: Vec<IndexModel> = schema_indices
            .into_iter()
            .map(|(keys, opts)| IndexModel::builder().keys(keys).options(opts).build())
            .collect();

        self.inner
            .create_indexes(indices)
            .await
            .map_err(|e| VallyError::Database(format!("Failed to create indexes: {}", e)))?;

        Ok(())
    }

    /// Insert a document, setting metadata timestamps
    ///
    /// Returns the inserted id rendered as a string.
    pub async fn insert_one(&self, mut item: T) -> Result<String, VallyError> {
        let now = DateTime::now();
        let metadata = item.mut_metadata();
        metadata.is_deleted = false;
        metadata.created_at = Some(now);
        metadata.updated_at = Some(now);

        let result = self
            .inner
            .insert_one(item)
            .await
            .map_err(|e| VallyError::Database(format!("Insert failed: {}", e)))?;

        Ok(match result.inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            Bson::String(s) => s,
            other => other.to_string(),
        })
    }

    /// Find one document by filter, skipping hidden ones
    pub async fn find_one(&self, filter: Document) -> Result<Option<T>, VallyError> {
        let mut full_filter = filter;
        full_filter.insert("metadata.is_deleted", doc! { "$ne": true });

        self.inner
            .find_one(full_filter)
            .await
            .map_err(|e| VallyError::Database(format!("Find failed: {}", e)))
    }

    /// Update one document, creating it when the filter matches nothing
    ///
    /// `update` must be an operator document. Metadata timestamps are merged in
    /// so upserted documents carry `created_at`.
    pub async fn upsert_one(
        &self,
        filter: Document,
        mut update: Document,
    ) -> Result<UpdateResult, VallyError> {
        let now = DateTime::now();

        let mut set = update.get_document("$set").cloned().unwrap_or_default();
        set.insert("metadata.updated_at", now);
        update.insert("$set", set);

        let mut on_insert = update
            .get_document("$setOnInsert")
            .cloned()
            .unwrap_or_default();
        on_insert.insert("metadata.created_at", now);
        on_insert.insert("metadata.is_deleted", false);
        update.insert("$setOnInsert", on_insert);

        self.inner
            .update_one(filter, update)
            .upsert(true)
            .await
            .map_err(|e| VallyError::Database(format!("Upsert failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    // Integration tests would require a running MongoDB instance; store
    // behavior is covered through the in-memory store in crate::store::memory
}
