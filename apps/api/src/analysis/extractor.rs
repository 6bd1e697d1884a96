//! Isolates a JSON object candidate from raw model output.
//!
//! Models wrap JSON in prose and code fences despite being told not to.
//! Extraction is best-effort and never fails; whatever comes out goes to the parser.

use tracing::debug;

const FENCE: &str = "```";

/// Strips code fences and surrounding prose, returning the best JSON object candidate.
///
/// 1. Content of the first ```` ```json ```` block, else of the first fenced block.
/// 2. Within that, the slice from the first `{` to the last `}` inclusive.
/// 3. Trimmed. Without a brace pair the trimmed candidate comes back unchanged.
pub fn extract(raw: &str) -> String {
    let candidate = json_fenced_block(raw)
        .or_else(|| any_fenced_block(raw))
        .unwrap_or(raw);

    match (candidate.find('{'), candidate.rfind('}')) {
        (Some(start), Some(end)) if start < end => candidate[start..=end].trim().to_string(),
        _ => {
            debug!(
                "No JSON object braces found in model output ({} chars)",
                raw.len()
            );
            candidate.trim().to_string()
        }
    }
}

/// Body of the first fence opened as ```` ```json ```` (tag matched case-insensitively).
fn json_fenced_block(raw: &str) -> Option<&str> {
    let mut offset = 0;
    while let Some(pos) = raw[offset..].find(FENCE) {
        let open = offset + pos;
        let after = &raw[open + FENCE.len()..];
        let tag: String = after.chars().take(4).collect();
        if tag.eq_ignore_ascii_case("json") {
            let body_start = open + FENCE.len() + tag.len();
            return Some(fenced_body(&raw[body_start..]));
        }
        offset = open + FENCE.len();
    }
    None
}

/// Body of the first fenced block of any kind, skipping a language tag on the fence line.
fn any_fenced_block(raw: &str) -> Option<&str> {
    let open = raw.find(FENCE)?;
    let mut rest = &raw[open + FENCE.len()..];

    if let Some(line_end) = rest.find('\n') {
        let tag = rest[..line_end].trim();
        if !tag.is_empty() && tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            rest = &rest[line_end + 1..];
        }
    }

    Some(fenced_body(rest))
}

/// Everything up to the closing fence; an unterminated fence runs to the end.
fn fenced_body(rest: &str) -> &str {
    match rest.find(FENCE) {
        Some(close) => &rest[..close],
        None => rest,
    }
}
