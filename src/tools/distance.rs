//! Distance tool — raw Levenshtein edit distance.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::similarity::levenshtein::bounded_distance;
use crate::similarity::normalize::normalize;
use crate::similarity::Scorer;
use super::{ToolCallResult, ToolDefinition};

const fn default_normalize() -> bool {
    true
}

/// Parameters for the distance tool.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceParams {
    pub text1: String,
    pub text2: String,
    /// Trim and lowercase both texts first (default: true).
    #[serde(default = "default_normalize")]
    pub normalize: bool,
}

/// Return the MCP tool definition for `distance`.
#[must_use]
pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "distance".to_owned(),
        description: "Levenshtein edit distance between two texts: the minimum number of \
            single-character insertions, deletions and substitutions."
            .to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "text1": { "type": "string" },
                "text2": { "type": "string" },
                "normalize": {
                    "type": "boolean",
                    "description": "Trim and lowercase both texts first (default: true)",
                    "default": true
                }
            },
            "required": ["text1", "text2"]
        }),
    }
}

/// Execute the distance tool.
///
/// # Errors
///
/// Returns an error if the arguments are malformed.
pub fn execute(scorer: &Scorer, arguments: serde_json::Value) -> Result<ToolCallResult> {
    let params: DistanceParams =
        serde_json::from_value(arguments).context("invalid distance parameters")?;

    let (a, b) = if params.normalize {
        (normalize(&params.text1), normalize(&params.text2))
    } else {
        (params.text1, params.text2)
    };

    match bounded_distance(&a, &b, scorer.config().max_input_chars) {
        Ok(d) => Ok(super::text_result(d.to_string())),
        Err(e) => Ok(super::error_result(e)),
    }
}
