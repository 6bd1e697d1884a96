use serde_json::Value;
use thiserror::Error;

/// Number of leading characters of a failed candidate kept for diagnostics.
const SNIPPET_CHARS: usize = 100;

#[derive(Debug, Clone, Error)]
#[error("invalid JSON ({message}) near: {snippet}")]
pub struct ParseError {
    pub message: String,
    pub snippet: String,
}

/// Single strict parse. Structural fixes belong to the repairer, after a successful parse.
pub fn parse(candidate: &str) -> Result<Value, ParseError> {
    serde_json::from_str(candidate).map_err(|e| ParseError {
        message: e.to_string(),
        snippet: candidate.chars().take(SNIPPET_CHARS).collect(),
    })
}
