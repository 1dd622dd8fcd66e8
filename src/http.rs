//! HTTP client utilities shared by the n8n adapter.

use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use crate::options::TransportOptions;

/// Build the shared HTTP client.
///
/// No timeout is set; requests run until reqwest or the server gives up.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Add the configured extra headers to a request.
pub fn add_extra_headers(
    request: RequestBuilder,
    transport_options: &TransportOptions,
) -> RequestBuilder {
    transport_options
        .headers
        .iter()
        .fold(request, |request, (name, value)| request.header(name, value))
}

/// Decode a response body.
///
/// An empty body becomes `null`; anything that is not JSON is kept verbatim as
/// a string so callers can still inspect it (for example an HTML login page).
pub fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Extension trait for RequestBuilder that logs request body.
pub trait RequestBuilderExt {
    /// Set JSON request body and log it. Returns the RequestBuilder for chaining.
    fn json_logged<T: serde::Serialize + ?Sized>(self, json: &T) -> Self;
}

impl RequestBuilderExt for RequestBuilder {
    fn json_logged<T: serde::Serialize + ?Sized>(self, json: &T) -> Self {
        if let Ok(req_body) = serde_json::to_string_pretty(json) {
            tracing::debug!("API request body ({} bytes):\n{}", req_body.len(), req_body);
        }

        self.json(json)
    }
}

/// Extension trait for Response that logs response body.
#[async_trait::async_trait]
pub trait ResponseExt {
    /// Get response text and log it. Consumes the response.
    async fn text_logged(self) -> Result<String, reqwest::Error>;
}

#[async_trait::async_trait]
impl ResponseExt for reqwest::Response {
    async fn text_logged(self) -> Result<String, reqwest::Error> {
        let status = self.status();
        let text = self.text().await?;
        tracing::debug!("API response {} ({} bytes):\n{}", status, text.len(), text);
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_body_empty_is_null() {
        assert_eq!(parse_body(""), Value::Null);
        assert_eq!(parse_body("  \n"), Value::Null);
    }

    #[test]
    fn test_parse_body_keeps_non_json_text() {
        let html = "<!DOCTYPE html><html></html>";
        assert_eq!(parse_body(html), Value::String(html.to_string()));
    }

    #[test]
    fn test_parse_body_json() {
        assert_eq!(parse_body(r#"{"id":"1"}"#), json!({"id": "1"}));
    }
}
