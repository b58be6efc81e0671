#![deny(missing_docs)]

//! # Bookshelf CRUD
//!
//! A generic create/read/update/delete dispatcher for the `Books` and `Reviews`
//! DynamoDB tables, served as an AWS Lambda function behind API Gateway.
//!
//! ## Overview
//!
//! Every collection is described by a [`collection::Collection`]: its table name,
//! its key schema (a single partition key or a composite key) and the entity name
//! used in response messages. One [`dispatch::Dispatcher`] serves every collection:
//! - Create overwrites the record with the body's key
//! - ReadOne / ReadAll fetch one record or scan the whole table
//! - Update builds a `SET` clause covering exactly the fields in the body
//! - Delete reports not-found when the store had nothing to remove
//!
//! Every outcome, success or failure, is returned as a uniform
//! [`envelope::ResponseEnvelope`].
//!
//! ## Quick Example
//!
//! ```rust
//! use bookshelf_crud::{collection, dispatch, observer, request, store};
//! use serde_json::json;
//!
//! # async fn example() {
//! let books = collection::Collection::books("Books");
//! let store = store::memory::MemoryStore::new().with_table("Books", books.key_schema.clone());
//! let dispatcher = dispatch::Dispatcher::new(store, observer::NoopObserver);
//!
//! let request = request::OperationRequest::create(
//!     json!({"book_id": "b1", "title": "Dune"})
//!         .as_object()
//!         .cloned()
//!         .unwrap_or_default(),
//! );
//! let envelope = dispatcher.dispatch(&books, request).await;
//! assert_eq!(envelope.status_code, 200);
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`mod@common`] - Records, keys and expression plumbing
//! - [`mod@read`] / [`mod@write`] - DynamoDB operations
//! - [`mod@store`] - The storage seam and its implementations
//! - [`mod@dispatch`] - The CRUD dispatcher

/// Collection descriptors (table, key schema, display names).
pub mod collection;

/// Records, keys, and shared expression plumbing.
pub mod common;

/// Environment-driven runtime settings.
pub mod config;

/// The generic CRUD dispatcher.
pub mod dispatch;

/// The response envelope returned for every operation.
pub mod envelope;

/// Error types.
pub mod error;

/// API Gateway entry point: routing and key extraction.
pub mod gateway;

/// Numeric normalization at the store boundary.
pub mod numeric;

/// Side-channel observability.
pub mod observer;

/// Read operations for retrieving data from DynamoDB tables.
///
/// This module provides operations for:
/// - Getting individual items by key
/// - Scanning entire tables
pub mod read;

/// Operation descriptors.
pub mod request;

/// Storage collaborators.
pub mod store;

/// Write operations for modifying data in DynamoDB tables.
///
/// This module provides operations for:
/// - Putting new items or replacing existing ones
/// - Updating items with a `SET` clause
/// - Deleting items by key
pub mod write;
