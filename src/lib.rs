//! `answer-match` — normalized string similarity for judging free-text answers.
//!
//! Scores how closely a submitted answer matches an expected one: both texts
//! are trimmed and lowercased, their Levenshtein distance is computed, and
//! the distance is mapped to a score in `[0, 1]` relative to the longer text.
//!
//! ```
//! let score = answer_match::calculate_similarity("Kitten", "sitting ").unwrap();
//! assert!((score - 4.0 / 7.0).abs() < 1e-9);
//! ```
//!
//! The scorer is also exposed as a set of tools via the Model Context
//! Protocol (MCP) over stdio (JSON-RPC 2.0, newline-delimited).
//!
//! # Tools
//!
//! - `similarity` — score two texts, with a match verdict
//! - `distance` — raw Levenshtein distance
//! - `normalize` — canonical form of a text
//! - `judge` — best match of an answer among several accepted answers
//!
//! # Architecture
//!
//! ```text
//! stdin (JSON-RPC) → McpServer → ToolRouter → Scorer
//!                                               ├─ normalize
//!                                               └─ levenshtein
//! stdout (JSON-RPC) ←────────────────────────────┘
//! ```

pub mod error;
pub mod server;
pub mod similarity;
pub mod tools;

pub use error::{ScoreError, ScoreResult};
pub use server::run_mcp_server;
pub use similarity::{calculate_similarity, Comparison, Scorer, ScorerConfig};
