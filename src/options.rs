//! Configuration for the n8n API connection and the underlying HTTP transport.

/// Environment variable holding the n8n instance URL.
pub const API_URL_VAR: &str = "N8N_API_URL";

/// Environment variable holding the n8n API key.
pub const API_KEY_VAR: &str = "N8N_API_KEY";

const API_PATH: &str = "/api/v1";

/// Connection settings for a single n8n instance.
///
/// Missing values are kept as empty strings rather than rejected: the server
/// still starts and every downstream request fails instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the n8n instance, with or without the `/api/v1` suffix.
    pub api_url: String,

    /// Value sent in the `X-N8N-API-KEY` header.
    pub api_key: String,
}

impl ApiConfig {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Read `N8N_API_URL` and `N8N_API_KEY` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_url: lookup(API_URL_VAR).unwrap_or_default(),
            api_key: lookup(API_KEY_VAR).unwrap_or_default(),
        }
    }

    /// Names of the required variables that were absent or empty.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_url.trim().is_empty() {
            missing.push(API_URL_VAR);
        }
        if self.api_key.trim().is_empty() {
            missing.push(API_KEY_VAR);
        }
        missing
    }

    /// The REST root every workflow path is appended to.
    ///
    /// `/api/v1` is appended only when the configured URL does not already end
    /// with it. Trailing slashes are dropped first.
    pub fn api_base(&self) -> String {
        let trimmed = self.api_url.trim().trim_end_matches('/');
        if trimmed.ends_with(API_PATH) {
            trimmed.to_string()
        } else {
            format!("{trimmed}{API_PATH}")
        }
    }
}

/// Extra settings for the HTTP transport.
///
/// Headers listed here are sent with every request in addition to the API key
/// and the JSON content headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportOptions {
    pub headers: Vec<(String, String)>,
}

impl TransportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header; later values for the same name are sent as well.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_appends_version_path() {
        let config = ApiConfig::new("https://n8n.example.com", "key");
        assert_eq!(config.api_base(), "https://n8n.example.com/api/v1");
    }

    #[test]
    fn test_api_base_keeps_existing_version_path() {
        let config = ApiConfig::new("https://n8n.example.com/api/v1/", "key");
        assert_eq!(config.api_base(), "https://n8n.example.com/api/v1");
    }

    #[test]
    fn test_from_lookup_reports_missing_variables() {
        let config = ApiConfig::from_lookup(|name| match name {
            API_URL_VAR => Some("http://localhost:5678".to_string()),
            _ => None,
        });

        assert_eq!(config.api_url, "http://localhost:5678");
        assert_eq!(config.api_key, "");
        assert_eq!(config.missing(), vec![API_KEY_VAR]);
    }

    #[test]
    fn test_transport_headers_keep_insertion_order() {
        let options = TransportOptions::new()
            .with_header("X-Trace", "abc")
            .with_header("X-Tenant", "acme");

        assert_eq!(
            options.headers,
            vec![
                ("X-Trace".to_string(), "abc".to_string()),
                ("X-Tenant".to_string(), "acme".to_string())
            ]
        );
        assert!(TransportOptions::default().headers.is_empty());
    }
}
