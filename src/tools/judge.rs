//! Judge tool — grade one answer against a list of accepted answers.
//!
//! The best-scoring accepted answer decides the verdict, so a question can
//! list spelling variants or synonyms without each one needing its own
//! threshold.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::similarity::Scorer;
use super::{ToolCallResult, ToolDefinition};

/// Parameters for the judge tool.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeParams {
    /// The submitted answer.
    pub answer: String,
    /// Accepted answers; at least one.
    pub accepted: Vec<String>,
    #[serde(default)]
    pub threshold: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JudgeOutput<'a> {
    matched: bool,
    score: f64,
    threshold: f64,
    best_index: usize,
    best_answer: &'a str,
}

/// Return the MCP tool definition for `judge`.
#[must_use]
pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "judge".to_owned(),
        description: "Judge whether an answer matches any of the accepted answers closely enough. \
            Returns the best-scoring accepted answer and whether its score reaches the threshold."
            .to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "answer": {
                    "type": "string",
                    "description": "The submitted answer"
                },
                "accepted": {
                    "type": "array",
                    "items": { "type": "string" },
                    "minItems": 1,
                    "description": "Accepted answers"
                },
                "threshold": {
                    "type": "number",
                    "minimum": 0,
                    "maximum": 1,
                    "description": "Score at or above which the answer counts as correct"
                }
            },
            "required": ["answer", "accepted"]
        }),
    }
}

/// Execute the judge tool.
///
/// # Errors
///
/// Returns an error if the arguments are malformed.
pub fn execute(scorer: &Scorer, arguments: serde_json::Value) -> Result<ToolCallResult> {
    let params: JudgeParams =
        serde_json::from_value(arguments).context("invalid judge parameters")?;

    let threshold = match super::resolve_threshold(scorer, params.threshold) {
        Ok(t) => t,
        Err(e) => return Ok(super::error_result(e)),
    };

    let best = match scorer.best_match(&params.answer, &params.accepted) {
        Ok(Some(best)) => best,
        Ok(None) => return Ok(super::error_result("accepted must contain at least one answer")),
        Err(e) => return Ok(super::error_result(e)),
    };

    let matched = best.comparison.is_match(threshold);
    debug!(
        best_index = best.index,
        score = best.comparison.score,
        matched,
        "answer judged"
    );

    Ok(super::json_result(&JudgeOutput {
        matched,
        score: best.comparison.score,
        threshold,
        best_index: best.index,
        best_answer: &params.accepted[best.index],
    })?)
}
