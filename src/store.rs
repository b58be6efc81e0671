//! Storage collaborators.
//!
//! The dispatcher only ever talks to a [`Store`]: one call per request, no
//! transactions, last write wins. [`dynamo::DynamoStore`] is the production
//! implementation; [`memory::MemoryStore`] keeps tables in process.

/// DynamoDB-backed store.
pub mod dynamo;

/// In-process store.
pub mod memory;

use crate::{
    common::{Record, key::Keys},
    error::StoreError,
    write::update_item::SetClause,
};

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// What a delete found.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DeleteOutcome {
    /// A record with the key existed and is gone.
    Deleted,
    /// Nothing was stored under the key.
    Absent,
}

/// Key-value storage, shared across concurrent requests.
///
/// Implementations hold no per-request state; consistency is the backend's business.
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert `item`, replacing any record with the same key.
    async fn put(&self, table: &str, item: Record) -> Result<(), StoreError>;

    /// Fetch the record stored under `keys`.
    async fn get(&self, table: &str, keys: Keys<Value>) -> Result<Option<Record>, StoreError>;

    /// Every record in the table, in storage order.
    async fn scan(&self, table: &str) -> Result<Vec<Record>, StoreError>;

    /// Apply `set_clause` to the record under `keys`, creating it if absent.
    ///
    /// Returns the attributes the update changed, with their new values.
    async fn update(
        &self,
        table: &str,
        keys: Keys<Value>,
        set_clause: SetClause<Value>,
    ) -> Result<Record, StoreError>;

    /// Remove the record under `keys`.
    async fn delete(&self, table: &str, keys: Keys<Value>) -> Result<DeleteOutcome, StoreError>;
}

#[async_trait]
impl<S: Store + ?Sized> Store for Arc<S> {
    async fn put(&self, table: &str, item: Record) -> Result<(), StoreError> {
        (**self).put(table, item).await
    }

    async fn get(&self, table: &str, keys: Keys<Value>) -> Result<Option<Record>, StoreError> {
        (**self).get(table, keys).await
    }

    async fn scan(&self, table: &str) -> Result<Vec<Record>, StoreError> {
        (**self).scan(table).await
    }

    async fn update(
        &self,
        table: &str,
        keys: Keys<Value>,
        set_clause: SetClause<Value>,
    ) -> Result<Record, StoreError> {
        (**self).update(table, keys, set_clause).await
    }

    async fn delete(&self, table: &str, keys: Keys<Value>) -> Result<DeleteOutcome, StoreError> {
        (**self).delete(table, keys).await
    }
}
