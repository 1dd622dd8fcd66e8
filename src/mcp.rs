//! MCP server binding: discovery serves the catalog, invocation goes to the dispatcher.

use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam,
    ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer, ServerHandler, ServiceExt};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::info;

use crate::client::ApiClient;
use crate::dispatch::Dispatcher;
use crate::tools::catalog;

const INSTRUCTIONS: &str = "Manage n8n workflows. Use list_workflows to discover workflow IDs, \
then get_workflow, create_workflow, update_workflow, delete_workflow, activate_workflow, \
deactivate_workflow or execute_workflow.";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("MCP initialization failed: {0}")]
    Init(String),

    #[error("MCP service task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// MCP handler exposing the workflow tools.
pub struct WorkflowServer<C> {
    dispatcher: Arc<Dispatcher<C>>,
}

impl<C> Clone for WorkflowServer<C> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

impl<C: ApiClient + 'static> WorkflowServer<C> {
    pub fn new(client: C) -> Self {
        Self {
            dispatcher: Arc::new(Dispatcher::new(client)),
        }
    }

    /// Serve over stdin/stdout until the peer disconnects or Ctrl-C is pressed.
    pub async fn serve_stdio(self) -> Result<(), ServerError> {
        self.serve_transport(rmcp::transport::stdio()).await
    }

    /// Serve over any duplex byte stream pair.
    pub async fn serve_transport<R, W>(self, transport: (R, W)) -> Result<(), ServerError>
    where
        R: AsyncRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        let service = self
            .serve(transport)
            .await
            .map_err(|e| ServerError::Init(e.to_string()))?;
        info!("n8n MCP server running");

        let token = service.cancellation_token();
        let waiting = service.waiting();
        tokio::pin!(waiting);

        // The interrupt listener lives only as long as the service does.
        let reason = tokio::select! {
            reason = &mut waiting => reason?,
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupt received, shutting down");
                token.cancel();
                waiting.await?
            }
        };
        info!("n8n MCP server stopped: {:?}", reason);
        Ok(())
    }
}

impl<C: ApiClient + 'static> ServerHandler for WorkflowServer<C> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.into()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(catalog()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.dispatcher
            .call(&request.name, request.arguments)
            .await
    }
}
