//! Response extraction
//!
//! Two selection rules with different reach:
//! - a tool request is recognized only when it is the first block
//! - the reply text is the first text block anywhere in the response

use super::types::{CompletionResponse, ContentBlock, ToolCall};

/// The tool call carried by `content[0]`, if that block is a tool_use block.
///
/// Later blocks are never inspected, so a leading text block followed by a
/// tool_use block is a direct answer.
pub fn first_tool_use(response: &CompletionResponse) -> Option<ToolCall> {
    match response.content.first() {
        Some(ContentBlock::ToolUse { id, name, input }) => Some(ToolCall::new(id.clone(), name.clone(), input.clone())),
        _ => None,
    }
}

/// Text of the first text block, scanning every block in order
pub fn first_text(response: &CompletionResponse) -> Option<&str> {
    response.content.iter().find_map(|block| match block {
        ContentBlock::Text { text } => Some(text.as_str()),
        _ => None,
    })
}

/// Reply text, or `fallback` when the first text block is missing or empty
pub fn reply_or(response: &CompletionResponse, fallback: &str) -> String {
    first_text(response)
        .filter(|text| !text.is_empty())
        .unwrap_or(fallback)
        .to_string()
}
