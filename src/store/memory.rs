use crate::{
    common::{
        Record,
        key::{KeySchema, Keys},
    },
    error::StoreError,
    write::update_item::SetClause,
};

use super::{DeleteOutcome, Store};

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections;
use tokio::sync::RwLock;

#[derive(Debug)]
struct Table {
    key_schema: KeySchema,
    items: IndexMap<String, Record>,
}

/// [`Store`] holding tables in process memory.
///
/// Tables must be registered with their key schema before use; unknown tables
/// fail the way DynamoDB does. Scans return records in insertion order.
///
/// ```rust
/// use bookshelf_crud::{common::key::KeySchema, store::memory::MemoryStore};
///
/// let store = MemoryStore::new()
///     .with_table("Books", KeySchema::single("book_id"))
///     .with_table("Reviews", KeySchema::composite("review_id", "book_id"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<collections::HashMap<String, Table>>,
}

impl MemoryStore {
    /// A store with no tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an empty table.
    pub fn with_table(mut self, name: impl Into<String>, key_schema: KeySchema) -> Self {
        self.tables.get_mut().insert(
            name.into(),
            Table {
                key_schema,
                items: IndexMap::new(),
            },
        );
        self
    }
}

fn unknown_table() -> StoreError {
    StoreError::new("ResourceNotFoundException: Requested resource not found")
}

/// Stable identity of a key tuple; attribute types are part of the identity.
fn item_id(keys: &Keys<Value>) -> String {
    let parts: Vec<Value> = keys
        .iter()
        .map(|key| Value::Array(vec![Value::String(key.name.clone()), key.value.clone()]))
        .collect();
    Value::Array(parts).to_string()
}

#[async_trait]
impl Store for MemoryStore {
    async fn put(&self, table: &str, item: Record) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let table = tables.get_mut(table).ok_or_else(unknown_table)?;
        let keys = table.key_schema.resolve(&item).map_err(|missing| {
            StoreError::new(format!(
                "ValidationException: One or more parameter values were invalid: Missing the key {} in the item",
                missing.join(", ")
            ))
        })?;
        table.items.insert(item_id(&keys), item);
        Ok(())
    }

    async fn get(&self, table: &str, keys: Keys<Value>) -> Result<Option<Record>, StoreError> {
        let tables = self.tables.read().await;
        let table = tables.get(table).ok_or_else(unknown_table)?;
        Ok(table.items.get(&item_id(&keys)).cloned())
    }

    async fn scan(&self, table: &str) -> Result<Vec<Record>, StoreError> {
        let tables = self.tables.read().await;
        let table = tables.get(table).ok_or_else(unknown_table)?;
        Ok(table.items.values().cloned().collect())
    }

    async fn update(
        &self,
        table: &str,
        keys: Keys<Value>,
        set_clause: SetClause<Value>,
    ) -> Result<Record, StoreError> {
        let mut tables = self.tables.write().await;
        let table = tables.get_mut(table).ok_or_else(unknown_table)?;
        if let Some((name, _)) = set_clause
            .assignments()
            .iter()
            .find(|(name, _)| table.key_schema.contains(name))
        {
            return Err(StoreError::new(format!(
                "ValidationException: One or more parameter values were invalid: Cannot update attribute {name}. This attribute is part of the key"
            )));
        }
        let record = table.items.entry(item_id(&keys)).or_insert_with(|| {
            keys.iter()
                .map(|key| (key.name.clone(), key.value.clone()))
                .collect()
        });
        let mut updated = Record::new();
        for (name, value) in set_clause.into_assignments() {
            record.insert(name.clone(), value.clone());
            updated.insert(name, value);
        }
        Ok(updated)
    }

    async fn delete(&self, table: &str, keys: Keys<Value>) -> Result<DeleteOutcome, StoreError> {
        let mut tables = self.tables.write().await;
        let table = tables.get_mut(table).ok_or_else(unknown_table)?;
        match table.items.shift_remove(&item_id(&keys)) {
            Some(_) => Ok(DeleteOutcome::Deleted),
            None => Ok(DeleteOutcome::Absent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::common::key::Key;

    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    fn book_keys(book_id: &str) -> Keys<Value> {
        Keys {
            partition_key: Key {
                name: "book_id".to_string(),
                value: json!(book_id),
            },
            ..Default::default()
        }
    }

    fn store() -> MemoryStore {
        MemoryStore::new().with_table("Books", KeySchema::single("book_id"))
    }

    #[tokio::test]
    async fn test_put_overwrites_and_get_returns_latest() {
        let store = store();
        store
            .put("Books", record(json!({"book_id": "b1", "title": "Dune"})))
            .await
            .unwrap();
        store
            .put("Books", record(json!({"book_id": "b1", "title": "Children of Dune"})))
            .await
            .unwrap();
        let actual = store.get("Books", book_keys("b1")).await.unwrap();
        assert_eq!(
            actual,
            Some(record(json!({"book_id": "b1", "title": "Children of Dune"})))
        );
        assert_eq!(store.scan("Books").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_put_without_key_fails() {
        let error = store()
            .put("Books", record(json!({"title": "Dune"})))
            .await
            .unwrap_err();
        assert!(error.message().contains("Missing the key book_id"));
    }

    #[tokio::test]
    async fn test_unknown_table_fails() {
        let error = store().scan("Authors").await.unwrap_err();
        assert!(error.message().contains("Requested resource not found"));
    }

    #[tokio::test]
    async fn test_scan_preserves_insertion_order() {
        let store = store();
        for book_id in ["b3", "b1", "b2"] {
            store
                .put("Books", record(json!({"book_id": book_id})))
                .await
                .unwrap();
        }
        let ids: Vec<Value> = store
            .scan("Books")
            .await
            .unwrap()
            .into_iter()
            .filter_map(|record| record.get("book_id").cloned())
            .collect();
        assert_eq!(ids, vec![json!("b3"), json!("b1"), json!("b2")]);
    }

    #[tokio::test]
    async fn test_update_merges_and_returns_changed_attributes() {
        let store = store();
        store
            .put("Books", record(json!({"book_id": "b1", "title": "Dune", "pages": 412})))
            .await
            .unwrap();
        let set_clause =
            SetClause::try_from_fields([("title".to_string(), json!("Dune Messiah"))]).unwrap();
        let updated = store
            .update("Books", book_keys("b1"), set_clause)
            .await
            .unwrap();
        assert_eq!(updated, record(json!({"title": "Dune Messiah"})));
        let actual = store.get("Books", book_keys("b1")).await.unwrap();
        assert_eq!(
            actual,
            Some(record(json!({"book_id": "b1", "title": "Dune Messiah", "pages": 412})))
        );
    }

    #[tokio::test]
    async fn test_update_upserts_absent_key() {
        let store = store();
        let set_clause = SetClause::try_from_fields([("title".to_string(), json!("Dune"))]).unwrap();
        store
            .update("Books", book_keys("b9"), set_clause)
            .await
            .unwrap();
        let actual = store.get("Books", book_keys("b9")).await.unwrap();
        assert_eq!(actual, Some(record(json!({"book_id": "b9", "title": "Dune"}))));
    }

    #[tokio::test]
    async fn test_update_rejects_key_attribute() {
        let store = store();
        let set_clause = SetClause::try_from_fields([("book_id".to_string(), json!("b2"))]).unwrap();
        let error = store
            .update("Books", book_keys("b1"), set_clause)
            .await
            .unwrap_err();
        assert!(error.message().contains("part of the key"));
        assert_eq!(store.get("Books", book_keys("b1")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_reports_absent_keys() {
        let store = store();
        store
            .put("Books", record(json!({"book_id": "b1"})))
            .await
            .unwrap();
        assert_eq!(
            store.delete("Books", book_keys("b1")).await.unwrap(),
            DeleteOutcome::Deleted
        );
        assert_eq!(
            store.delete("Books", book_keys("b1")).await.unwrap(),
            DeleteOutcome::Absent
        );
    }

    #[tokio::test]
    async fn test_key_types_are_distinct() {
        let store = store();
        store
            .put("Books", record(json!({"book_id": 1})))
            .await
            .unwrap();
        assert_eq!(store.get("Books", book_keys("1")).await.unwrap(), None);
    }
}
