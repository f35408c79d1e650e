//! Normalize tool — show the canonical form used for comparison.

use anyhow::{Context, Result};
use serde::Deserialize;

use super::{ToolCallResult, ToolDefinition};

/// Parameters for the normalize tool.
#[derive(Debug, Deserialize)]
pub struct NormalizeParams {
    pub text: String,
}

/// Return the MCP tool definition for `normalize`.
#[must_use]
pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "normalize".to_owned(),
        description: "Return the canonical form of a text (trimmed, lowercased) as compared by \
            the similarity tools."
            .to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "text": { "type": "string" }
            },
            "required": ["text"]
        }),
    }
}

/// Execute the normalize tool.
///
/// # Errors
///
/// Returns an error if the arguments are malformed.
pub fn execute(arguments: serde_json::Value) -> Result<ToolCallResult> {
    let params: NormalizeParams =
        serde_json::from_value(arguments).context("invalid normalize parameters")?;
    Ok(super::text_result(crate::similarity::normalize::normalize(
        &params.text,
    )))
}
