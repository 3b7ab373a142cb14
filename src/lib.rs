//! Toolchat - a chat endpoint that resolves LLM tool-use requests
//!
//! A user message goes to the LLM together with the registered tool
//! descriptors. If the model asks for a tool, the tool runs locally and its
//! result goes back to the model for the final reply.

pub mod app;
pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod server;
pub mod store;
pub mod tools;

pub use error::{Result, ToolchatError};
