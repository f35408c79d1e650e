//! MCP Server — stdio transport, JSON-RPC 2.0, newline-delimited.
//!
//! Implements the Model Context Protocol (revision 2025-06-18) server over
//! stdin/stdout. Each request line is parsed, routed to a handler, and
//! answered with exactly one response line unless it is a notification.
//!
//! Protocol flow:
//! 1. Client sends `initialize` → server responds with capabilities
//! 2. Client sends `notifications/initialized`
//! 3. Client sends `tools/list` → server returns the scoring tools
//! 4. Client sends `tools/call` → server scores and returns the result
//! 5. Client closes stdin → server exits

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::similarity::{Scorer, ScorerConfig};
use crate::tools::{self, ToolRouter};

/// Maximum size of a single JSON-RPC line (10 MiB), not counting the `\n`.
const MAX_LINE_BYTES: usize = 10 * 1024 * 1024;

const PROTOCOL_VERSION: &str = "2025-06-18";

/// Incoming JSON-RPC 2.0 message. `id` is absent for notifications.
#[derive(Debug, Deserialize)]
struct Request {
    jsonrpc: String,
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

/// MCP tools/call params.
#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

/// JSON-RPC error codes used by this server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorCode {
    Parse = -32700,
    InvalidRequest = -32600,
    MethodNotFound = -32601,
    InvalidParams = -32602,
}

/// A handler failure, rendered as the `error` member of a response.
#[derive(Debug)]
struct RpcError {
    code: ErrorCode,
    message: String,
}

impl RpcError {
    fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Render one response object. `id` is echoed as given, `null` when the
/// request could not be read far enough to have one.
fn response(id: Option<Value>, outcome: Result<Value, RpcError>) -> Value {
    let id = id.unwrap_or(Value::Null);
    match outcome {
        Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
        Err(e) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": e.code as i64, "message": e.message },
        }),
    }
}

/// Configuration for the MCP server.
#[derive(Debug, Clone, Default)]
pub struct McpServerConfig {
    /// Limits and default threshold for every scoring tool.
    pub scorer: ScorerConfig,
}

/// Run the MCP server on stdin/stdout until stdin is closed.
///
/// # Errors
///
/// Returns an error if the scorer configuration is invalid or stdin/stdout
/// I/O fails fatally.
pub fn run_mcp_server(config: McpServerConfig) -> Result<()> {
    info!(
        max_input_chars = config.scorer.max_input_chars,
        match_threshold = config.scorer.match_threshold,
        "answer-match MCP server starting"
    );

    let scorer = Scorer::new(config.scorer).context("invalid scorer configuration")?;
    let router = ToolRouter::new(scorer);
    let stdin = std::io::stdin();
    let mut reader = std::io::BufReader::new(stdin.lock());
    let mut stdout = std::io::stdout().lock();
    serve(&router, &mut reader, &mut stdout)?;

    info!("answer-match MCP server stopped");
    Ok(())
}

/// Serve JSON-RPC requests from `reader` until EOF, writing responses to `out`.
///
/// Malformed lines (oversized, non-UTF-8, not JSON) are answered with an
/// error response and the loop keeps going.
///
/// # Errors
///
/// Returns an error if reading or writing fails fatally.
pub fn serve(router: &ToolRouter, reader: &mut impl BufRead, out: &mut impl Write) -> Result<()> {
    let mut line_buf = Vec::new();

    loop {
        line_buf.clear();
        let read = read_line_limited(reader, &mut line_buf, MAX_LINE_BYTES)
            .context("failed to read request line")?;

        let reply = match read {
            LineRead::Eof => {
                info!("input closed, shutting down");
                return Ok(());
            }
            LineRead::TooLong => {
                warn!(max_bytes = MAX_LINE_BYTES, "request line too long, discarded");
                Some(response(
                    None,
                    Err(RpcError::new(
                        ErrorCode::InvalidRequest,
                        format!("invalid request: line exceeds {MAX_LINE_BYTES} bytes"),
                    )),
                ))
            }
            LineRead::Line => handle_line(router, &line_buf),
        };

        if let Some(reply) = reply {
            write_line(out, &reply)?;
        }
    }
}

/// Turn one raw line into at most one response.
fn handle_line(router: &ToolRouter, raw: &[u8]) -> Option<Value> {
    let Ok(line) = std::str::from_utf8(raw) else {
        warn!("request line is not valid UTF-8");
        return Some(response(
            None,
            Err(RpcError::new(ErrorCode::Parse, "parse error: request is not valid UTF-8")),
        ));
    };

    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    debug!(raw = line, "received request");

    let request: Request = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, "invalid JSON-RPC request");
            return Some(response(
                None,
                Err(RpcError::new(ErrorCode::Parse, format!("parse error: {e}"))),
            ));
        }
    };

    if request.jsonrpc != "2.0" {
        warn!(version = request.jsonrpc, "unsupported JSON-RPC version");
        return Some(response(
            request.id,
            Err(RpcError::new(
                ErrorCode::InvalidRequest,
                format!(
                    "invalid request: jsonrpc version must be \"2.0\", got \"{}\"",
                    request.jsonrpc
                ),
            )),
        ));
    }

    let outcome = dispatch(router, &request.method, request.params);

    // Notifications never get a response, even when they fail.
    match request.id {
        None => {
            debug!(method = request.method, "notification handled");
            None
        }
        Some(id) => Some(response(Some(id), outcome)),
    }
}

/// Route a method to its handler.
fn dispatch(router: &ToolRouter, method: &str, params: Value) -> Result<Value, RpcError> {
    match method {
        "initialize" => Ok(json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": { "listChanged": false } },
            "serverInfo": {
                "name": "answer-match",
                "version": env!("CARGO_PKG_VERSION"),
            },
        })),
        "notifications/initialized" => {
            info!("client initialized");
            Ok(Value::Null)
        }
        "tools/list" => Ok(json!({ "tools": router.list_tools() })),
        "tools/call" => call_tool(router, params),
        "ping" => Ok(json!({})),
        _ => {
            warn!(method, "unknown method");
            Err(RpcError::new(
                ErrorCode::MethodNotFound,
                format!("method not found: {method}"),
            ))
        }
    }
}

/// `tools/call`: malformed params are a protocol error, everything past
/// that is reported inside the tool result.
fn call_tool(router: &ToolRouter, params: Value) -> Result<Value, RpcError> {
    let params: ToolCallParams = serde_json::from_value(params).map_err(|e| {
        RpcError::new(
            ErrorCode::InvalidParams,
            format!("invalid tools/call params: {e}"),
        )
    })?;

    let result = router
        .call_tool(&params.name, params.arguments)
        .unwrap_or_else(|e| {
            warn!(tool = params.name, error = %e, "tool call failed");
            tools::error_result(format!("{e:#}"))
        });

    Ok(json!(result))
}

fn write_line(out: &mut impl Write, reply: &Value) -> Result<()> {
    let mut line = reply.to_string();
    debug!(response = line, "sending response");
    line.push('\n');
    out.write_all(line.as_bytes())
        .context("failed to write response")?;
    out.flush().context("failed to flush output")
}

/// Outcome of reading one request line.
#[derive(Debug, PartialEq, Eq)]
enum LineRead {
    /// Input closed.
    Eof,
    /// A complete line (or the final unterminated one) is in the buffer,
    /// without its `\n`.
    Line,
    /// The line exceeded the size cap and was discarded.
    TooLong,
}

/// Read a line from `reader` into `buf`, allowing at most `max_bytes` of
/// content before the terminator.
///
/// An oversized line is drained up to its newline and reported as
/// [`LineRead::TooLong`] so the loop can answer it and keep serving.
fn read_line_limited(
    reader: &mut impl BufRead,
    buf: &mut Vec<u8>,
    max_bytes: usize,
) -> Result<LineRead> {
    let mut overflowed = false;
    loop {
        let available = reader.fill_buf().context("fill_buf failed")?;
        if available.is_empty() {
            return Ok(match (overflowed, buf.is_empty()) {
                (true, _) => LineRead::TooLong,
                (false, true) => LineRead::Eof,
                (false, false) => LineRead::Line,
            });
        }

        let newline = available.iter().position(|&b| b == b'\n');
        let content = newline.unwrap_or(available.len());

        if !overflowed {
            if buf.len() + content > max_bytes {
                overflowed = true;
                buf.clear();
            } else {
                buf.extend_from_slice(&available[..content]);
            }
        }
        reader.consume(newline.map_or(content, |pos| pos + 1));

        if newline.is_some() {
            return Ok(if overflowed {
                LineRead::TooLong
            } else {
                LineRead::Line
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(input: &[u8], cap: usize, chunk: usize) -> Vec<(LineRead, Vec<u8>)> {
        let mut reader = std::io::BufReader::with_capacity(chunk, input);
        let mut out = Vec::new();
        loop {
            let mut buf = Vec::new();
            let read = read_line_limited(&mut reader, &mut buf, cap).expect("read");
            if read == LineRead::Eof {
                return out;
            }
            out.push((read, buf));
        }
    }

    #[test]
    fn test_read_line_limited_lines_and_eof() {
        let lines = read_all(b"one\ntwo", 16, 64);
        assert_eq!(
            lines,
            vec![
                (LineRead::Line, b"one".to_vec()),
                (LineRead::Line, b"two".to_vec()),
            ]
        );
    }

    #[test]
    fn test_read_line_limited_cap_excludes_newline() {
        let lines = read_all(b"12345678\n123456789\n", 8, 64);
        assert_eq!(lines[0], (LineRead::Line, b"12345678".to_vec()));
        assert_eq!(lines[1].0, LineRead::TooLong);
    }

    #[test]
    fn test_read_line_limited_discards_oversized_line() {
        // Small buffer so the long line spans several fill_buf calls.
        let lines = read_all(b"0123456789\nok\n", 8, 4);
        assert_eq!(
            lines,
            vec![
                (LineRead::TooLong, Vec::new()),
                (LineRead::Line, b"ok".to_vec()),
            ]
        );
    }

    #[test]
    fn test_response_shape() {
        let ok = response(Some(json!(7)), Ok(json!({ "x": 1 })));
        assert_eq!(ok, json!({ "jsonrpc": "2.0", "id": 7, "result": { "x": 1 } }));

        let err = response(None, Err(RpcError::new(ErrorCode::MethodNotFound, "nope")));
        assert_eq!(err["id"], Value::Null);
        assert_eq!(err["error"]["code"], json!(-32601));
        assert!(err.get("result").is_none());
    }

    #[test]
    fn test_notification_gets_no_response() {
        let router = ToolRouter::new(Scorer::default());
        let raw = br#"{"jsonrpc":"2.0","method":"bogus/notification"}"#;
        assert!(handle_line(&router, raw).is_none());
    }
}
