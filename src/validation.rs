//! Argument validators for the workflow tools.
//!
//! Each validator turns the loosely-typed argument map of a tool call into a
//! typed record. Validators never coerce: a value of the wrong type is treated
//! as missing and either rejected (required fields) or replaced by the field's
//! fallback (optional fields).

use rmcp::ErrorData;
use serde::Serialize;
use serde_json::{json, Map, Value};
use serde_with::skip_serializing_none;
use thiserror::Error;

/// Raw tool arguments as received from the protocol.
pub type Arguments = Map<String, Value>;

/// A required argument was missing or had the wrong type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Workflow ID is required and must be a string")]
    WorkflowId,

    #[error("Workflow name is required and must be a string")]
    WorkflowName,
}

impl From<ValidationError> for ErrorData {
    fn from(err: ValidationError) -> Self {
        ErrorData::invalid_params(err.to_string(), None)
    }
}

/// Filters for `list_workflows`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListWorkflowsArgs {
    /// Only sent when the caller passed a boolean.
    pub active: Option<bool>,
    /// String tags; sent comma-joined when non-empty.
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowIdArgs {
    pub id: String,
}

/// Fully defaulted arguments for `create_workflow`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateWorkflowArgs {
    pub name: String,
    pub nodes: Vec<Value>,
    pub connections: Map<String, Value>,
    pub active: bool,
    pub tags: Vec<Value>,
    pub settings: Map<String, Value>,
}

impl CreateWorkflowArgs {
    /// The body sent to `POST /workflows`.
    ///
    /// `active` and `tags` are accepted but not forwarded.
    pub fn payload(&self) -> Value {
        json!({
            "name": self.name,
            "nodes": self.nodes,
            "connections": self.connections,
            "settings": self.settings,
        })
    }
}

/// Arguments for `update_workflow`. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateWorkflowArgs {
    pub id: String,
    pub name: Option<String>,
    pub nodes: Option<Vec<Value>>,
    pub connections: Option<Map<String, Value>>,
    pub active: Option<bool>,
    pub tags: Option<Vec<Value>>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
struct UpdateWorkflowPayload<'a> {
    name: Option<&'a str>,
    nodes: Option<&'a Vec<Value>>,
    connections: Option<&'a Map<String, Value>>,
    active: Option<bool>,
    tags: Option<&'a Vec<Value>>,
}

impl UpdateWorkflowArgs {
    /// The body sent to `PATCH /workflows/{id}`; absent fields are omitted.
    pub fn payload(&self) -> Value {
        let payload = UpdateWorkflowPayload {
            name: self.name.as_deref(),
            nodes: self.nodes.as_ref(),
            connections: self.connections.as_ref(),
            active: self.active,
            tags: self.tags.as_ref(),
        };
        serde_json::to_value(payload).unwrap_or_else(|_| Value::Object(Map::new()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExecuteWorkflowArgs {
    pub id: String,
    pub data: Map<String, Value>,
}

fn string_field(args: &Arguments, key: &str) -> Option<String> {
    args.get(key).and_then(Value::as_str).map(str::to_string)
}

fn bool_field(args: &Arguments, key: &str) -> Option<bool> {
    args.get(key).and_then(Value::as_bool)
}

fn array_field(args: &Arguments, key: &str) -> Option<Vec<Value>> {
    args.get(key).and_then(Value::as_array).cloned()
}

fn object_field(args: &Arguments, key: &str) -> Option<Map<String, Value>> {
    args.get(key).and_then(Value::as_object).cloned()
}

fn default_settings() -> Map<String, Value> {
    let mut settings = Map::new();
    settings.insert("executionOrder".to_string(), json!("v1"));
    settings
}

/// Never fails: unknown or mistyped filters are simply not applied.
pub fn validate_list_workflows(args: &Arguments) -> ListWorkflowsArgs {
    let tags = args
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    ListWorkflowsArgs {
        active: bool_field(args, "active"),
        tags,
    }
}

pub fn validate_workflow_id(args: &Arguments) -> Result<WorkflowIdArgs, ValidationError> {
    let id = string_field(args, "id").ok_or(ValidationError::WorkflowId)?;
    Ok(WorkflowIdArgs { id })
}

pub fn validate_create_workflow(args: &Arguments) -> Result<CreateWorkflowArgs, ValidationError> {
    let name = string_field(args, "name").ok_or(ValidationError::WorkflowName)?;

    Ok(CreateWorkflowArgs {
        name,
        nodes: array_field(args, "nodes").unwrap_or_default(),
        connections: object_field(args, "connections").unwrap_or_default(),
        active: bool_field(args, "active").unwrap_or(false),
        tags: array_field(args, "tags").unwrap_or_default(),
        settings: object_field(args, "settings").unwrap_or_else(default_settings),
    })
}

pub fn validate_update_workflow(args: &Arguments) -> Result<UpdateWorkflowArgs, ValidationError> {
    let WorkflowIdArgs { id } = validate_workflow_id(args)?;

    Ok(UpdateWorkflowArgs {
        id,
        name: string_field(args, "name"),
        nodes: array_field(args, "nodes"),
        connections: object_field(args, "connections"),
        active: bool_field(args, "active"),
        tags: array_field(args, "tags"),
    })
}

pub fn validate_execute_workflow(args: &Arguments) -> Result<ExecuteWorkflowArgs, ValidationError> {
    let WorkflowIdArgs { id } = validate_workflow_id(args)?;

    Ok(ExecuteWorkflowArgs {
        id,
        data: object_field(args, "data").unwrap_or_default(),
    })
}
