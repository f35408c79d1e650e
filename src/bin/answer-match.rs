//! answer-match -- standalone MCP answer-similarity server.
//!
//! Usage: answer-match [--max-input-chars <N>] [--threshold <F>]

use anyhow::Context;

use answer_match::similarity::ScorerConfig;

/// Value following `flag` on the command line, if present.
fn flag_value(flag: &str) -> Option<String> {
    std::env::args().skip_while(|a| a != flag).nth(1)
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing to stderr so it does not interfere with MCP stdio.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut scorer = ScorerConfig::default();

    if let Some(raw) = flag_value("--max-input-chars") {
        scorer.max_input_chars = raw
            .parse()
            .with_context(|| format!("invalid --max-input-chars: {raw}"))?;
    }
    if let Some(raw) = flag_value("--threshold") {
        scorer.match_threshold = raw
            .parse()
            .with_context(|| format!("invalid --threshold: {raw}"))?;
    }

    let config = answer_match::server::McpServerConfig { scorer };

    answer_match::run_mcp_server(config)
}
