//! Similarity tool — score a free-text answer against an expected one.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::similarity::Scorer;
use super::{ToolCallResult, ToolDefinition};

/// Parameters for the similarity tool.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityParams {
    pub text1: String,
    pub text2: String,
    /// Match threshold for this call (default: server threshold).
    #[serde(default)]
    pub threshold: Option<f64>,
}

#[derive(Debug, Serialize)]
struct SimilarityOutput {
    score: f64,
    distance: usize,
    threshold: f64,
    matched: bool,
}

/// Return the MCP tool definition for `similarity`.
#[must_use]
pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "similarity".to_owned(),
        description: "Score how closely two texts match, from 0.0 to 1.0. Both texts are trimmed \
            and lowercased, then compared by Levenshtein distance relative to the longer text."
            .to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "text1": {
                    "type": "string",
                    "description": "First text (e.g. the submitted answer)"
                },
                "text2": {
                    "type": "string",
                    "description": "Second text (e.g. the expected answer)"
                },
                "threshold": {
                    "type": "number",
                    "minimum": 0,
                    "maximum": 1,
                    "description": "Score at or above which the texts count as a match"
                }
            },
            "required": ["text1", "text2"]
        }),
    }
}

/// Execute the similarity tool.
///
/// # Errors
///
/// Returns an error if the arguments are malformed.
pub fn execute(scorer: &Scorer, arguments: serde_json::Value) -> Result<ToolCallResult> {
    let params: SimilarityParams =
        serde_json::from_value(arguments).context("invalid similarity parameters")?;

    let threshold = match super::resolve_threshold(scorer, params.threshold) {
        Ok(t) => t,
        Err(e) => return Ok(super::error_result(e)),
    };

    match scorer.compare(&params.text1, &params.text2) {
        Ok(c) => Ok(super::json_result(&SimilarityOutput {
            score: c.score,
            distance: c.distance,
            threshold,
            matched: c.is_match(threshold),
        })?),
        Err(e) => Ok(super::error_result(e)),
    }
}
