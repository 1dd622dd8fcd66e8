//! Routes tool calls to the workflow API and shapes the results.

use rmcp::model::{CallToolResult, Content, ErrorCode};
use rmcp::ErrorData;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::client::{ApiClient, ApiRequest, ClientError};
use crate::tools::WorkflowTool;
use crate::validation::{
    validate_create_workflow, validate_execute_workflow, validate_list_workflows,
    validate_update_workflow, validate_workflow_id, Arguments, ExecuteWorkflowArgs,
    ListWorkflowsArgs, UpdateWorkflowArgs, ValidationError, WorkflowIdArgs,
};

/// Marker identifying an HTML page returned in place of JSON.
pub const HTML_MARKER: &str = "<!DOCTYPE html>";

/// Returned by `list_workflows` when the API answered with an HTML page.
pub const HTML_RESPONSE_HINT: &str = "Received an HTML page instead of workflow data. \
N8N_API_URL most likely does not point at the n8n API. \
Set it to your instance URL (for example https://n8n.example.com) or the API root \
(https://n8n.example.com/api/v1).";

/// Stateless router from tool calls to API requests.
///
/// Each call runs route, validate, request and shape independently; nothing
/// is shared between calls except the client.
#[derive(Debug, Clone)]
pub struct Dispatcher<C> {
    client: C,
}

impl<C: ApiClient> Dispatcher<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Handle one tool call.
    ///
    /// Unknown names yield `METHOD_NOT_FOUND`, bad arguments `INVALID_PARAMS`
    /// (without touching the network), and API failures `INTERNAL_ERROR`.
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<Arguments>,
    ) -> Result<CallToolResult, ErrorData> {
        let tool = name.parse::<WorkflowTool>().map_err(|e| {
            warn!("{}", e);
            ErrorData::new(ErrorCode::METHOD_NOT_FOUND, e.to_string(), None)
        })?;
        let args = arguments.unwrap_or_default();
        info!("Calling tool {}", tool);

        match tool {
            WorkflowTool::ListWorkflows => {
                let request = list_request(validate_list_workflows(&args));
                let body = self.send(request).await?;
                if is_html(&body) {
                    warn!("list_workflows received HTML instead of JSON");
                    return Ok(text_result(HTML_RESPONSE_HINT));
                }
                json_result(&body)
            }
            WorkflowTool::GetWorkflow => {
                let WorkflowIdArgs { id } = checked(validate_workflow_id(&args))?;
                let body = self.send(ApiRequest::get(workflow_path(&id))).await?;
                json_result(&body)
            }
            WorkflowTool::CreateWorkflow => {
                let create = checked(validate_create_workflow(&args))?;
                let request = ApiRequest::post("/workflows").with_body(create.payload());
                let body = self.send(request).await?;
                json_result(&body)
            }
            WorkflowTool::UpdateWorkflow => {
                let update: UpdateWorkflowArgs = checked(validate_update_workflow(&args))?;
                let request = ApiRequest::patch(workflow_path(&update.id)).with_body(update.payload());
                let body = self.send(request).await?;
                json_result(&body)
            }
            WorkflowTool::DeleteWorkflow => {
                let WorkflowIdArgs { id } = checked(validate_workflow_id(&args))?;
                let body = self.send(ApiRequest::delete(workflow_path(&id))).await?;
                if is_falsy(&body) {
                    return Ok(text_result(format!("Workflow {id} deleted successfully")));
                }
                json_result(&body)
            }
            WorkflowTool::ActivateWorkflow => {
                let WorkflowIdArgs { id } = checked(validate_workflow_id(&args))?;
                let request = ApiRequest::post(format!("{}/activate", workflow_path(&id)));
                let body = self.send(request).await?;
                json_result(&body)
            }
            WorkflowTool::DeactivateWorkflow => {
                let WorkflowIdArgs { id } = checked(validate_workflow_id(&args))?;
                let request = ApiRequest::post(format!("{}/deactivate", workflow_path(&id)));
                let body = self.send(request).await?;
                json_result(&body)
            }
            WorkflowTool::ExecuteWorkflow => {
                let ExecuteWorkflowArgs { id, data } = checked(validate_execute_workflow(&args))?;
                let request = ApiRequest::post(format!("{}/execute", workflow_path(&id)))
                    .with_body(Value::Object(data));
                let body = self.send(request).await?;
                json_result(&body)
            }
        }
    }

    async fn send(&self, request: ApiRequest) -> Result<Value, ErrorData> {
        match self.client.send(request).await {
            Ok(response) => Ok(response.body),
            Err(e) => Err(api_error(&e)),
        }
    }
}

fn checked<T>(result: Result<T, ValidationError>) -> Result<T, ErrorData> {
    result.map_err(|e| {
        warn!("Rejected tool arguments: {}", e);
        ErrorData::from(e)
    })
}

fn api_error(err: &ClientError) -> ErrorData {
    let message = err.remote_message();
    error!("n8n API error: {}", message);
    ErrorData::internal_error(format!("n8n API error: {message}"), None)
}

fn workflow_path(id: &str) -> String {
    format!("/workflows/{id}")
}

fn list_request(args: ListWorkflowsArgs) -> ApiRequest {
    let mut request = ApiRequest::get("/workflows");
    if let Some(active) = args.active {
        request = request.with_query("active", active.to_string());
    }
    if !args.tags.is_empty() {
        request = request.with_query("tags", args.tags.join(","));
    }
    request
}

fn is_html(body: &Value) -> bool {
    body.as_str().is_some_and(|text| text.contains(HTML_MARKER))
}

fn is_falsy(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

fn json_result(body: &Value) -> Result<CallToolResult, ErrorData> {
    let json = serde_json::to_string_pretty(body)
        .map_err(|e| ErrorData::internal_error(e.to_string(), None))?;
    Ok(text_result(json))
}
