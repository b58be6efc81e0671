use crate::{
    common::{Record, key::KeySchema},
    error::DispatchError,
};

use serde_json::Value;
use std::fmt;

/// The four CRUD actions, with reads split by whether a key was supplied.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum OperationKind {
    /// Insert or silently overwrite a record.
    Create,
    /// Fetch one record by its full key.
    ReadOne,
    /// Fetch every record in the collection.
    ReadAll,
    /// Merge fields into one record.
    Update,
    /// Remove one record.
    Delete,
}

impl OperationKind {
    /// Lower-case HTTP method this kind is served under, as used in metric names.
    pub fn method(self) -> &'static str {
        match self {
            Self::Create => "post",
            Self::ReadOne | Self::ReadAll => "get",
            Self::Update => "put",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Create => "create",
            Self::ReadOne => "read_one",
            Self::ReadAll => "read_all",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// One inbound operation, already detached from its transport.
///
/// `keys` holds whatever key parameters arrived; the dispatcher checks them
/// against the collection's key schema.
#[derive(Clone, Debug, PartialEq)]
pub struct OperationRequest {
    /// What to do.
    pub kind: OperationKind,
    /// Key attribute name to value.
    pub keys: Record,
    /// Request payload, for Create and Update.
    pub body: Option<Record>,
}

impl OperationRequest {
    /// Create from a body carrying the key attributes.
    pub fn create(body: Record) -> Self {
        Self {
            kind: OperationKind::Create,
            keys: Record::new(),
            body: Some(body),
        }
    }

    /// Fetch one record.
    pub fn read_one(keys: Record) -> Self {
        Self {
            kind: OperationKind::ReadOne,
            keys,
            body: None,
        }
    }

    /// Fetch every record.
    pub fn read_all() -> Self {
        Self {
            kind: OperationKind::ReadAll,
            keys: Record::new(),
            body: None,
        }
    }

    /// Merge `body` into the record under `keys`.
    pub fn update(keys: Record, body: Record) -> Self {
        Self {
            kind: OperationKind::Update,
            keys,
            body: Some(body),
        }
    }

    /// Remove the record under `keys`.
    pub fn delete(keys: Record) -> Self {
        Self {
            kind: OperationKind::Delete,
            keys,
            body: None,
        }
    }

    /// Map an HTTP method, key parameter lookup and raw body onto an operation.
    ///
    /// `GET` without any key parameter is a ReadAll; with at least one it is a
    /// ReadOne (and any missing key parameter is reported by the dispatcher).
    /// Only the schema's key attributes are looked up.
    pub fn from_http<F>(
        method: &str,
        key_schema: &KeySchema,
        parameter: F,
        body: Option<&[u8]>,
    ) -> Result<Self, DispatchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let keys: Record = key_schema
            .names()
            .filter_map(|name| parameter(name).map(|value| (name.to_string(), Value::String(value))))
            .collect();
        match method {
            "POST" => Ok(Self::create(parse_body(body)?)),
            "GET" if keys.is_empty() => Ok(Self::read_all()),
            "GET" => Ok(Self::read_one(keys)),
            "PUT" => Ok(Self::update(keys, parse_body(body)?)),
            "DELETE" => Ok(Self::delete(keys)),
            other => Err(DispatchError::Unhandled(format!(
                "Unsupported method: {other}"
            ))),
        }
    }
}

fn parse_body(body: Option<&[u8]>) -> Result<Record, DispatchError> {
    let body = match body {
        Some(body) if !body.is_empty() => body,
        _ => {
            return Err(DispatchError::Unhandled(
                "Request body is required".to_string(),
            ));
        }
    };
    match serde_json::from_slice(body) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(DispatchError::Unhandled(
            "Request body must be a JSON object".to_string(),
        )),
        Err(error) => Err(DispatchError::Unhandled(format!(
            "Malformed request body: {error}"
        ))),
    }
}
