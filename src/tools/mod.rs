//! Tool System - tool trait, typed errors, and the registry/dispatcher
//!
//! Every tool the service can run is listed in `BuiltinTool`. The registry maps
//! tool names to handlers and is built once at startup, then only read.

mod customer_info;
mod registry;

pub use customer_info::{CustomerInfoInput, GetCustomerInfoTool};
pub use registry::ToolRegistry;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::llm::ToolDefinition;
use crate::store::CustomerStore;

/// A tool that can be called by the LLM
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (matches LLM tool_use name)
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> Value;

    /// Execute the tool against raw input from the model
    async fn execute(&self, input: Value) -> Result<Value, ToolError>;

    /// Descriptor sent to the LLM
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description(), self.input_schema())
    }
}

/// Decode a tool's raw input into its typed record
pub fn decode_input<T: DeserializeOwned>(tool: &str, input: Value) -> Result<T, ToolError> {
    serde_json::from_value(input)
        .map_err(|e| ToolError::invalid_input(format!("Invalid input for {}: {}", tool, e)))
}

/// Classification of a failed dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolErrorKind {
    /// Unknown tool, or the requested entity does not exist
    NotFound,
    /// Input did not match the tool's typed record
    InvalidInput,
    /// The handler itself failed
    HandlerFailed,
}

/// Error value produced by dispatch; never escapes as a fault
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ToolError {
    pub kind: ToolErrorKind,
    pub message: String,
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::NotFound, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidInput, message)
    }

    pub fn handler_failed(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::HandlerFailed, message)
    }

    /// Error descriptor embedded in the tool_result sent back to the model
    pub fn to_payload(&self) -> Value {
        json!({ "error": self.message })
    }
}

/// The closed set of tools this service ships
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinTool {
    GetCustomerInfo,
}

impl BuiltinTool {
    pub const ALL: [BuiltinTool; 1] = [BuiltinTool::GetCustomerInfo];

    pub fn name(&self) -> &'static str {
        match self {
            Self::GetCustomerInfo => "get_customer_info",
        }
    }

    /// Construct the handler for this tool
    pub fn build(&self, customers: Arc<dyn CustomerStore>) -> Arc<dyn Tool> {
        match self {
            Self::GetCustomerInfo => Arc::new(GetCustomerInfoTool::new(customers)),
        }
    }
}

impl fmt::Display for BuiltinTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
