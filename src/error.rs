use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use std::{error, fmt};
use thiserror::Error;

/// Failure reported by a storage collaborator.
///
/// The message is kept verbatim; callers cannot (and should not) classify it.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    /// Wrap a backend error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The verbatim backend message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl<E, R> From<SdkError<E, R>> for StoreError
where
    E: error::Error + 'static,
    R: fmt::Debug,
{
    fn from(error: SdkError<E, R>) -> Self {
        Self::new(DisplayErrorContext(&error).to_string())
    }
}

impl From<serde_dynamo::Error> for StoreError {
    fn from(error: serde_dynamo::Error) -> Self {
        Self::new(error.to_string())
    }
}

/// An update body with no attributes cannot produce a `SET` clause.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("Update body must contain at least one attribute")]
pub struct EmptySetClause;

/// Every way a single request can fail, resolved into an envelope at the dispatch boundary.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Required key parameters or fields are missing, or the request asks for something forbidden.
    #[error("{0}")]
    BadRequest(String),
    /// The addressed record (or any record, for a scan) is absent.
    #[error("{0}")]
    NotFound(String),
    /// The store raised while serving the request.
    #[error("{context}: {source}")]
    Store {
        /// What was being attempted, e.g. `Error updating book`.
        context: String,
        /// The store's own error.
        source: StoreError,
    },
    /// Anything else: malformed body, unsupported method.
    #[error("{0}")]
    Unhandled(String),
}

impl DispatchError {
    /// HTTP status code for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::NotFound(_) => 404,
            Self::Store { .. } | Self::Unhandled(_) => 500,
        }
    }
}

impl From<EmptySetClause> for DispatchError {
    fn from(error: EmptySetClause) -> Self {
        Self::BadRequest(error.to_string())
    }
}

/// Invalid runtime settings.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ConfigError {
    /// `KEY_SOURCE` is not one of the accepted values.
    #[error("invalid KEY_SOURCE {0:?}: expected one of query, path, any")]
    InvalidKeySource(String),
    /// A table name variable is set but empty.
    #[error("{0} must not be empty")]
    EmptyTableName(&'static str),
    /// `CONSISTENT_READ` is not a boolean.
    #[error("invalid CONSISTENT_READ {0:?}: expected true or false")]
    InvalidConsistentRead(String),
}
