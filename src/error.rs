//! Error types for toolchat
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

use crate::llm::LlmError;

/// All error types that can occur while serving a chat request
#[derive(Debug, Error)]
pub enum ToolchatError {
    /// Caller input rejected before any LLM call
    #[error("{0}")]
    Validation(String),

    /// LLM service failure (transport, auth, rate limit, bad response)
    #[error("{0}")]
    Llm(#[from] LlmError),

    /// A tool name was registered twice
    #[error("Tool already registered: {0}")]
    DuplicateTool(String),

    /// A built-in tool is missing from the registry
    #[error("Tool not registered: {0}")]
    MissingTool(String),

    /// Backing data store failure
    #[error("Store error: {0}")]
    Store(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for toolchat operations
pub type Result<T> = std::result::Result<T, ToolchatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_is_bare_message() {
        let err = ToolchatError::Validation("Message is required".to_string());
        assert_eq!(err.to_string(), "Message is required");
    }

    #[test]
    fn test_llm_error_keeps_underlying_message() {
        let err: ToolchatError = LlmError::Auth("invalid x-api-key".to_string()).into();
        assert!(matches!(err, ToolchatError::Llm(_)));
        assert_eq!(err.to_string(), "Authentication failed: invalid x-api-key");
    }

    #[test]
    fn test_duplicate_tool_error() {
        let err = ToolchatError::DuplicateTool("get_customer_info".to_string());
        assert_eq!(err.to_string(), "Tool already registered: get_customer_info");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ToolchatError = io_err.into();
        assert!(matches!(err, ToolchatError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }
}
