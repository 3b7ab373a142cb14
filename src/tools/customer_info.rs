//! get_customer_info tool - look up a customer profile by identifier

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{BuiltinTool, Tool, ToolError, decode_input};
use crate::store::CustomerStore;

/// Typed input for get_customer_info
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CustomerInfoInput {
    pub customer_id: String,
}

pub struct GetCustomerInfoTool {
    customers: Arc<dyn CustomerStore>,
}

impl GetCustomerInfoTool {
    pub fn new(customers: Arc<dyn CustomerStore>) -> Self {
        Self { customers }
    }
}

#[async_trait]
impl Tool for GetCustomerInfoTool {
    fn name(&self) -> &'static str {
        BuiltinTool::GetCustomerInfo.name()
    }

    fn description(&self) -> &'static str {
        "Get customer information using customer ID"
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "customer_id": { "type": "string" }
            },
            "required": ["customer_id"]
        })
    }

    async fn execute(&self, input: Value) -> Result<Value, ToolError> {
        let input: CustomerInfoInput = decode_input(self.name(), input)?;

        let record = self
            .customers
            .find(&input.customer_id)
            .await
            .map_err(|e| ToolError::handler_failed(e.to_string()))?
            .ok_or_else(|| ToolError::not_found("Customer not found"))?;

        serde_json::to_value(record).map_err(|e| ToolError::handler_failed(e.to_string()))
    }
}
