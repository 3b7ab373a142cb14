//! Tool registry - name lookup, descriptors, and dispatch

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};
use serde_json::Value;

use super::{BuiltinTool, Tool, ToolError};
use crate::error::{Result, ToolchatError};
use crate::llm::{ToolCall, ToolDefinition, ToolResult};
use crate::store::CustomerStore;

/// Registered tools, in registration order
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    by_name: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    /// Create an empty registry (for custom tool sets)
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in tool, checked for completeness
    pub fn standard(customers: Arc<dyn CustomerStore>) -> Result<Self> {
        let mut registry = Self::new();
        for tool in BuiltinTool::ALL {
            registry.register(tool.build(customers.clone()))?;
        }
        registry.verify_complete()?;
        Ok(registry)
    }

    /// Register a tool; a name may only be registered once
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        let name = tool.name();
        if self.by_name.contains_key(name) {
            return Err(ToolchatError::DuplicateTool(name.to_string()));
        }
        self.by_name.insert(name, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    /// Fail unless every built-in tool is registered
    pub fn verify_complete(&self) -> Result<()> {
        match BuiltinTool::ALL.into_iter().find(|tool| !self.has_tool(tool.name())) {
            Some(missing) => Err(ToolchatError::MissingTool(missing.to_string())),
            None => Ok(()),
        }
    }

    /// Tool definitions for the LLM
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    /// Run the named tool. Every failure comes back as a `ToolError` value.
    pub async fn dispatch(&self, name: &str, input: Value) -> std::result::Result<Value, ToolError> {
        let Some(tool) = self.by_name.get(name).map(|&idx| &self.tools[idx]) else {
            warn!("Dispatch requested unknown tool '{}'", name);
            return Err(ToolError::not_found(format!("Unknown tool: {}", name)));
        };

        debug!("Dispatching tool '{}'", name);
        tool.execute(input).await
    }

    /// Dispatch a model tool call and package the outcome as a tool result
    pub async fn execute(&self, call: &ToolCall) -> ToolResult {
        match self.dispatch(&call.name, call.input.clone()).await {
            Ok(output) => ToolResult::success(&call.id, output.to_string()),
            Err(e) => {
                debug!("Tool '{}' failed ({:?}): {}", call.name, e.kind, e.message);
                ToolResult::error(&call.id, e.to_payload().to_string())
            }
        }
    }

    /// Check if a tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Get the list of tool names
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
