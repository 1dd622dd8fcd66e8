//! # n8n-mcp - n8n workflows as MCP tools
//!
//! Exposes the n8n public REST API as a set of Model Context Protocol tools so
//! an agent can discover and drive workflows without knowing the API itself.
//!
//! ## Architecture
//!
//! A call flows one way through the crate:
//!
//! 1. **`mcp`** receives the decoded `tools/call` request.
//! 2. **`dispatch`** resolves the tool name to a [`WorkflowTool`].
//! 3. **`validation`** turns the raw arguments into a typed, defaulted record.
//! 4. **`client`** sends the resulting request through an [`ApiClient`]
//!    (by default the reqwest-backed [`N8nClient`]).
//! 5. **`dispatch`** shapes the response, or the failure, for the protocol.
//!
//! `tools/list` is served straight from the static catalog in **`tools`**.
//!
//! ## Example
//! ```no_run
//! use n8n_mcp::{ApiConfig, N8nClient, WorkflowServer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::new("https://n8n.example.com", "your-api-key");
//!     let client = N8nClient::new(&config)?;
//!
//!     WorkflowServer::new(client).serve_stdio().await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod dispatch;
pub mod http;
pub mod mcp;
pub mod options;
pub mod tools;
pub mod validation;

pub use api::N8nClient;
pub use client::{ApiClient, ApiRequest, ApiResponse, ClientError};
pub use dispatch::Dispatcher;
pub use mcp::{ServerError, WorkflowServer};
pub use options::{ApiConfig, TransportOptions};
pub use tools::{catalog, WorkflowTool};
pub use validation::ValidationError;

// Re-export rmcp for convenience
pub use rmcp;
