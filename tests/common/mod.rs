#![allow(dead_code)]

use async_trait::async_trait;
use n8n_mcp::client::{ApiClient, ApiRequest, ApiResponse, ClientError};
use rmcp::model::{CallToolResult, RawContent};
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex};

/// Records every request and replays queued outcomes in order.
#[derive(Clone, Default)]
pub struct RecordingClient {
    responses: Arc<Mutex<Vec<Result<ApiResponse, ClientError>>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl RecordingClient {
    pub fn new(responses: Vec<Result<ApiResponse, ClientError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn returning(body: Value) -> Self {
        Self::new(vec![Ok(ApiResponse::ok(body))])
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApiClient for RecordingClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        self.requests.lock().unwrap().push(request);
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(ApiResponse::ok(Value::Null))
        } else {
            responses.remove(0)
        }
    }
}

pub fn args(value: Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        _ => panic!("Expected object arguments"),
    }
}

/// The single text block of a result.
pub fn text_of(result: &CallToolResult) -> String {
    assert_eq!(result.content.len(), 1, "Expected exactly one content block");
    match &result.content[0].raw {
        RawContent::Text(text) => text.text.clone(),
        _ => panic!("Expected text content"),
    }
}
