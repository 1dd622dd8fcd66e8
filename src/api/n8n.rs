//! reqwest-backed client for the n8n public REST API.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::form_urlencoded::byte_serialize;

use crate::client::{ApiClient, ApiRequest, ApiResponse, ClientError};
use crate::http::{add_extra_headers, build_http_client, parse_body, RequestBuilderExt, ResponseExt};
use crate::options::{ApiConfig, TransportOptions};

/// Header carrying the n8n API key.
pub const API_KEY_HEADER: &str = "X-N8N-API-KEY";

/// Client bound to one n8n instance.
#[derive(Debug, Clone)]
pub struct N8nClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    transport_options: TransportOptions,
}

impl N8nClient {
    /// Create a client with default transport options.
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        Self::with_options(config, TransportOptions::default())
    }

    /// Create a client with custom transport options.
    pub fn with_options(
        config: &ApiConfig,
        transport_options: TransportOptions,
    ) -> Result<Self, ClientError> {
        let http = build_http_client()?;
        Ok(Self {
            http,
            api_base: config.api_base(),
            api_key: config.api_key.clone(),
            transport_options,
        })
    }

    /// The resolved API root, always ending in `/api/v1`.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn url(&self, request: &ApiRequest) -> String {
        let mut url = format!("{}{}", self.api_base, request.path);
        if !request.query.is_empty() {
            url.push('?');
            url.push_str(&encode_query(&request.query));
        }
        url
    }
}

fn encode(component: &str) -> String {
    byte_serialize(component.as_bytes()).collect()
}

/// Form-encode query pairs, keeping the commas of list values literal
/// (`tags=a,b` rather than `tags=a%2Cb`).
fn encode_query(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| {
            let value = value.split(',').map(encode).collect::<Vec<_>>().join(",");
            format!("{}={}", encode(key), value)
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[async_trait]
impl ApiClient for N8nClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let url = self.url(&request);
        tracing::debug!("{} {}", request.method, url);

        let mut req = self
            .http
            .request(request.method.clone(), &url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");

        req = add_extra_headers(req, &self.transport_options);

        if let Some(body) = &request.body {
            req = req.json_logged(body);
        }

        let response = req.send().await?;
        let status = response.status();
        let body = parse_body(&response.text_logged().await?);

        if status.is_server_error() {
            return Err(ClientError::Server { status, body });
        }

        Ok(ApiResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_encode_query_keeps_list_commas() {
        let query = pairs(&[("active", "true"), ("tags", "a,b")]);
        assert_eq!(encode_query(&query), "active=true&tags=a,b");
    }

    #[test]
    fn test_encode_query_escapes_reserved_characters() {
        let query = pairs(&[("tags", "r&d,q=1 x")]);
        assert_eq!(encode_query(&query), "tags=r%26d,q%3D1+x");
    }

    #[test]
    fn test_url_without_query() {
        let client = N8nClient::new(&ApiConfig::new("http://localhost:5678", "key")).unwrap();
        let url = client.url(&ApiRequest::get("/workflows/1"));
        assert_eq!(url, "http://localhost:5678/api/v1/workflows/1");
    }
}
