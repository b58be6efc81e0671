use crate::error::DispatchError;

use lambda_http::{Body, Response, http};
use serde::Serialize;
use serde_json::{Value, json};

/// The uniform `{statusCode, body}` wrapper returned for every operation.
///
/// `body` is the serialized JSON payload.
///
/// ```rust
/// use bookshelf_crud::envelope::ResponseEnvelope;
/// use serde_json::json;
///
/// let envelope = ResponseEnvelope::new(200, json!({"message": "Book added successfully"}));
/// assert_eq!(envelope.body, r#"{"message":"Book added successfully"}"#);
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    /// HTTP status code.
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// Serialized payload.
    pub body: String,
}

impl ResponseEnvelope {
    /// Wrap a JSON payload.
    pub fn new(status_code: u16, payload: Value) -> Self {
        Self {
            status_code,
            body: payload.to_string(),
        }
    }

    /// `200` with `{"message": ...}`.
    pub fn message(message: String) -> Self {
        Self::new(200, json!({ "message": message }))
    }

    /// The payload, parsed back from `body`.
    pub fn payload(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }

    /// Build the HTTP response API Gateway expects.
    pub fn into_response(self) -> Result<Response<Body>, http::Error> {
        Response::builder()
            .status(self.status_code)
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(Body::Text(self.body))
    }
}

impl From<DispatchError> for ResponseEnvelope {
    fn from(error: DispatchError) -> Self {
        let status_code = error.status_code();
        let payload = match error {
            DispatchError::BadRequest(message) | DispatchError::NotFound(message) => {
                json!({ "error": message })
            }
            DispatchError::Store { context, source } => {
                json!({ "message": context, "error": source.message() })
            }
            DispatchError::Unhandled(message) => {
                json!({ "message": "An error occurred", "error": message })
            }
        };
        Self::new(status_code, payload)
    }
}
