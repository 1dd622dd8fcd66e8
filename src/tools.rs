//! The catalog of workflow tools served on discovery.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub use rmcp::model::Tool;
use serde_json::{json, Map, Value};

/// Every operation exposed by the server, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowTool {
    ListWorkflows,
    GetWorkflow,
    CreateWorkflow,
    UpdateWorkflow,
    DeleteWorkflow,
    ActivateWorkflow,
    DeactivateWorkflow,
    ExecuteWorkflow,
}

/// The requested name matches no tool in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown tool: {0}")]
pub struct UnknownTool(pub String);

impl WorkflowTool {
    pub const ALL: [WorkflowTool; 8] = [
        WorkflowTool::ListWorkflows,
        WorkflowTool::GetWorkflow,
        WorkflowTool::CreateWorkflow,
        WorkflowTool::UpdateWorkflow,
        WorkflowTool::DeleteWorkflow,
        WorkflowTool::ActivateWorkflow,
        WorkflowTool::DeactivateWorkflow,
        WorkflowTool::ExecuteWorkflow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WorkflowTool::ListWorkflows => "list_workflows",
            WorkflowTool::GetWorkflow => "get_workflow",
            WorkflowTool::CreateWorkflow => "create_workflow",
            WorkflowTool::UpdateWorkflow => "update_workflow",
            WorkflowTool::DeleteWorkflow => "delete_workflow",
            WorkflowTool::ActivateWorkflow => "activate_workflow",
            WorkflowTool::DeactivateWorkflow => "deactivate_workflow",
            WorkflowTool::ExecuteWorkflow => "execute_workflow",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            WorkflowTool::ListWorkflows => {
                "List all workflows in n8n, optionally filtered by active state and tags. \
                 Only string tags are used as filters; other tag entries are ignored"
            }
            WorkflowTool::GetWorkflow => "Get a workflow by ID, including its nodes and connections",
            WorkflowTool::CreateWorkflow => "Create a new workflow in n8n",
            WorkflowTool::UpdateWorkflow => {
                "Update an existing workflow. Only the fields provided are changed"
            }
            WorkflowTool::DeleteWorkflow => "Delete a workflow by ID",
            WorkflowTool::ActivateWorkflow => "Activate a workflow so its triggers start running",
            WorkflowTool::DeactivateWorkflow => "Deactivate a workflow so its triggers stop running",
            WorkflowTool::ExecuteWorkflow => "Execute a workflow by ID with optional input data",
        }
    }

    /// JSON Schema for the tool's arguments.
    ///
    /// Advisory only: the validators are what actually enforce the contract.
    pub fn input_schema(self) -> Value {
        let id = json!({
            "type": "string",
            "description": "The workflow ID"
        });

        match self {
            WorkflowTool::ListWorkflows => json!({
                "type": "object",
                "properties": {
                    "active": {
                        "type": "boolean",
                        "description": "Only return workflows with this active state"
                    },
                    "tags": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Only return workflows carrying these tags; non-string entries are ignored"
                    }
                }
            }),
            WorkflowTool::GetWorkflow
            | WorkflowTool::DeleteWorkflow
            | WorkflowTool::ActivateWorkflow
            | WorkflowTool::DeactivateWorkflow => json!({
                "type": "object",
                "properties": { "id": id },
                "required": ["id"]
            }),
            WorkflowTool::CreateWorkflow => json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Name of the workflow"
                    },
                    "nodes": {
                        "type": "array",
                        "items": { "type": "object" },
                        "description": "Workflow nodes"
                    },
                    "connections": {
                        "type": "object",
                        "description": "Connections between nodes, keyed by source node name"
                    },
                    "active": {
                        "type": "boolean",
                        "description": "Whether the workflow should be active"
                    },
                    "tags": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Tags for the workflow"
                    },
                    "settings": {
                        "type": "object",
                        "description": "Workflow settings, defaults to {\"executionOrder\": \"v1\"}"
                    }
                },
                "required": ["name"]
            }),
            WorkflowTool::UpdateWorkflow => json!({
                "type": "object",
                "properties": {
                    "id": id,
                    "name": {
                        "type": "string",
                        "description": "New name for the workflow"
                    },
                    "nodes": {
                        "type": "array",
                        "items": { "type": "object" },
                        "description": "Replacement workflow nodes"
                    },
                    "connections": {
                        "type": "object",
                        "description": "Replacement node connections"
                    },
                    "active": {
                        "type": "boolean",
                        "description": "Whether the workflow should be active"
                    },
                    "tags": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Replacement tags"
                    }
                },
                "required": ["id"]
            }),
            WorkflowTool::ExecuteWorkflow => json!({
                "type": "object",
                "properties": {
                    "id": id,
                    "data": {
                        "type": "object",
                        "description": "Input data passed to the workflow"
                    }
                },
                "required": ["id"]
            }),
        }
    }

    /// The discovery descriptor for this tool.
    pub fn descriptor(self) -> Tool {
        let schema = match self.input_schema() {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Tool::new(self.name(), self.description(), Arc::new(schema))
    }
}

impl fmt::Display for WorkflowTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WorkflowTool {
    type Err = UnknownTool;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        WorkflowTool::ALL
            .into_iter()
            .find(|tool| tool.name() == name)
            .ok_or_else(|| UnknownTool(name.to_string()))
    }
}

/// The full discovery response, in catalog order.
pub fn catalog() -> Vec<Tool> {
    WorkflowTool::ALL.into_iter().map(WorkflowTool::descriptor).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_one_descriptor_per_tool() {
        let tools = catalog();
        assert_eq!(tools.len(), 8);

        let names: HashSet<_> = tools.iter().map(|t| t.name.to_string()).collect();
        assert_eq!(names.len(), 8);

        for tool in WorkflowTool::ALL {
            let descriptor = tools
                .iter()
                .find(|t| t.name == tool.name())
                .expect("tool missing from catalog");
            let description = descriptor.description.as_deref().unwrap_or_default();
            assert!(!description.is_empty());
        }
    }

    #[test]
    fn test_name_round_trips() {
        for tool in WorkflowTool::ALL {
            assert_eq!(tool.name().parse::<WorkflowTool>(), Ok(tool));
        }
        assert_eq!(
            "drop_database".parse::<WorkflowTool>(),
            Err(UnknownTool("drop_database".to_string()))
        );
    }

    #[test]
    fn test_list_description_mentions_ignored_tags() {
        let description = WorkflowTool::ListWorkflows.description();
        assert!(description.contains("other tag entries are ignored"));
    }

    #[test]
    fn test_id_tools_require_id() {
        for tool in WorkflowTool::ALL {
            let schema = tool.input_schema();
            let required = schema["required"].as_array().cloned().unwrap_or_default();
            match tool {
                WorkflowTool::ListWorkflows => assert!(required.is_empty()),
                WorkflowTool::CreateWorkflow => assert_eq!(required, vec![json!("name")]),
                _ => assert_eq!(required, vec![json!("id")]),
            }
        }
    }
}
