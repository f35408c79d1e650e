//! Tool router — registers and dispatches MCP tool calls.
//!
//! Each tool is a function that takes JSON arguments and returns a
//! [`ToolCallResult`]. The router owns the shared [`Scorer`] and provides
//! `list_tools()` / `call_tool()` for the MCP server.

pub mod distance;
pub mod judge;
pub mod normalize;
pub mod similarity;

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use crate::error::ScoreResult;
use crate::similarity::{validate_threshold, Scorer};

/// MCP tool definition for tools/list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// MCP content item in a tools/call result.
#[derive(Debug, Serialize)]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

/// MCP tools/call result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    pub content: Vec<ContentItem>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

/// Build a successful single-text result.
pub(crate) fn text_result(text: String) -> ToolCallResult {
    ToolCallResult {
        content: vec![ContentItem {
            content_type: "text".to_owned(),
            text,
        }],
        is_error: false,
    }
}

/// Build an `isError` result carrying `message`.
#[must_use]
pub fn error_result(message: impl std::fmt::Display) -> ToolCallResult {
    ToolCallResult {
        content: vec![ContentItem {
            content_type: "text".to_owned(),
            text: format!("Error: {message}"),
        }],
        is_error: true,
    }
}

/// Serialize `value` as pretty JSON text.
pub(crate) fn json_result(value: &impl Serialize) -> ScoreResult<ToolCallResult> {
    Ok(text_result(serde_json::to_string_pretty(value)?))
}

/// Resolve an optional per-call threshold against the scorer default.
pub(crate) fn resolve_threshold(scorer: &Scorer, threshold: Option<f64>) -> ScoreResult<f64> {
    let threshold = threshold.unwrap_or(scorer.config().match_threshold);
    validate_threshold(threshold)?;
    Ok(threshold)
}

/// Tool router that dispatches MCP tool calls to implementations.
pub struct ToolRouter {
    scorer: Scorer,
}

impl ToolRouter {
    /// Create a new tool router around `scorer`.
    #[must_use]
    pub const fn new(scorer: Scorer) -> Self {
        Self { scorer }
    }

    /// List all available tools with their JSON Schema definitions.
    #[must_use]
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        vec![
            similarity::tool_definition(),
            distance::tool_definition(),
            normalize::tool_definition(),
            judge::tool_definition(),
        ]
    }

    /// Call a tool by name with the given JSON arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments cannot be parsed or the result
    /// cannot be serialized. Scoring failures come back as `isError` results.
    pub fn call_tool(&self, name: &str, arguments: serde_json::Value) -> Result<ToolCallResult> {
        debug!(tool = name, "dispatching tool call");

        match name {
            "similarity" => similarity::execute(&self.scorer, arguments),
            "distance" => distance::execute(&self.scorer, arguments),
            "normalize" => normalize::execute(arguments),
            "judge" => judge::execute(&self.scorer, arguments),
            _ => Ok(error_result(format!("Unknown tool: {name}"))),
        }
    }
}
