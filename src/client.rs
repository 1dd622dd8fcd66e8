//! The HTTP adapter seam between the dispatcher and the n8n REST API.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use thiserror::Error;

/// Errors raised by an [`ApiClient`].
///
/// Responses below 500 are never errors; the caller inspects them instead.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request failed with status code {status}")]
    Server { status: StatusCode, body: Value },
}

impl ClientError {
    /// The message to surface to the caller.
    ///
    /// Uses the `message` field of a structured error body when the remote
    /// service supplied one, otherwise this error's own description.
    pub fn remote_message(&self) -> String {
        match self {
            ClientError::Server { body, .. } => body
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| self.to_string()),
            ClientError::Http(_) => self.to_string(),
        }
    }
}

/// A single request against the workflow API, relative to the API root.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below `/api/v1`, e.g. `/workflows/42`.
    pub path: String,
    /// Query parameters in the order they are sent.
    pub query: Vec<(String, String)>,
    /// JSON body. `None` sends no body at all.
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set the JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A non-raising response: any status below 500.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    /// Decoded body; `null` when empty, a JSON string when not JSON.
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    /// A 200 response with the given body.
    pub fn ok(body: Value) -> Self {
        Self::new(StatusCode::OK, body)
    }
}

/// Transport for workflow API requests.
///
/// Implementations must return `Ok` for every status below 500 and
/// [`ClientError`] for server errors and transport failures.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_remote_message_prefers_body_message() {
        let err = ClientError::Server {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: json!({"message": "rate limited"}),
        };
        assert_eq!(err.remote_message(), "rate limited");
    }

    #[test]
    fn test_remote_message_falls_back_to_status() {
        let err = ClientError::Server {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: json!("oops"),
        };
        assert_eq!(
            err.remote_message(),
            "Request failed with status code 500 Internal Server Error"
        );
    }

    #[test]
    fn test_request_builder() {
        let request = ApiRequest::get("/workflows")
            .with_query("active", "true")
            .with_query("tags", "a,b");

        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path, "/workflows");
        assert_eq!(
            request.query,
            vec![
                ("active".to_string(), "true".to_string()),
                ("tags".to_string(), "a,b".to_string())
            ]
        );
        assert_eq!(request.body, None);
    }
}
