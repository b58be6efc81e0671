use crate::common::Record;

use aws_sdk_dynamodb::types;
use serde::Serialize;
use serde_dynamo::{Error, Result, to_attribute_value};
use serde_json::Value;
use std::collections;

/// Key component.
///
/// ```rust
/// use bookshelf_crud::common::key;
///
/// let key = key::Key {
///     name: "book_id".to_string(),
///     value: "b1".to_string(),
/// };
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Key<T> {
    /// The attribute name of the key.
    pub name: String,
    /// The value of the key.
    pub value: T,
}

/// Primary key (partition key and optional sort key).
///
/// ```rust
/// use bookshelf_crud::common::key;
///
/// let keys = key::Keys {
///     partition_key: key::Key {
///         name: "book_id".to_string(),
///         value: "b1".to_string(),
///     },
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Keys<T> {
    /// The partition key (required).
    pub partition_key: Key<T>,
    /// The sort key (optional, only for tables with composite primary keys).
    pub sort_key: Option<Key<T>>,
}

impl<T> Keys<T> {
    /// Iterate over the key components, partition key first.
    pub fn iter(&self) -> impl Iterator<Item = &Key<T>> {
        std::iter::once(&self.partition_key).chain(self.sort_key.as_ref())
    }
}

impl<T: Serialize> TryFrom<Keys<T>> for collections::HashMap<String, types::AttributeValue> {
    type Error = Error;

    fn try_from(key: Keys<T>) -> Result<Self> {
        let partition_key_value = to_attribute_value(key.partition_key.value)?;
        let mut keys = Self::from([(key.partition_key.name, partition_key_value)]);
        if let Some(sort_key) = key.sort_key {
            let sort_key_value = to_attribute_value(sort_key.value)?;
            keys.insert(sort_key.name, sort_key_value);
        }
        Ok(keys)
    }
}

/// Names of the attributes that make up a table's primary key.
///
/// ```rust
/// use bookshelf_crud::common::key::KeySchema;
///
/// let reviews = KeySchema::composite("review_id", "book_id");
/// assert_eq!(reviews.names().collect::<Vec<_>>(), ["review_id", "book_id"]);
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct KeySchema {
    /// The partition key attribute name.
    pub partition_key: String,
    /// The sort key attribute name, for composite keys.
    pub sort_key: Option<String>,
}

impl KeySchema {
    /// A schema keyed by a single attribute.
    pub fn single(partition_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            sort_key: None,
        }
    }

    /// A schema keyed by two attributes together.
    pub fn composite(partition_key: impl Into<String>, sort_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            sort_key: Some(sort_key.into()),
        }
    }

    /// Key attribute names, partition key first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.partition_key.as_str()).chain(self.sort_key.as_deref())
    }

    /// Whether `name` is one of the key attributes.
    pub fn contains(&self, name: &str) -> bool {
        self.names().any(|key| key == name)
    }

    /// Pull the full key tuple out of `fields`.
    ///
    /// Key values must be strings or numbers. On failure, returns the names of
    /// every absent or unusable key attribute in schema order.
    pub fn resolve(&self, fields: &Record) -> std::result::Result<Keys<Value>, Vec<String>> {
        let missing: Vec<String> = self
            .names()
            .filter(|name| {
                !matches!(
                    fields.get(*name),
                    Some(Value::String(_) | Value::Number(_))
                )
            })
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(missing);
        }
        let key = |name: &str| Key {
            name: name.to_string(),
            value: fields.get(name).cloned().unwrap_or(Value::Null),
        };
        Ok(Keys {
            partition_key: key(self.partition_key.as_str()),
            sort_key: self.sort_key.as_deref().map(key),
        })
    }
}
