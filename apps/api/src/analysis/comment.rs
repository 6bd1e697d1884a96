//! Splits a score comment into its bracketed chain-of-thought sections.
//!
//! Comments look like `【Observation】…【Reasoning】…【Conclusion】…`. ASCII `[..]`
//! headers work too when they open a line. Structural validation treats the
//! comment as a plain string; this parse is only for display.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentSection {
    pub label: String,
    pub body: String,
}

/// Sections in order of appearance. Text before the first header is dropped;
/// a comment with no headers yields a single unlabeled section.
pub fn comment_sections(comment: &str) -> Vec<CommentSection> {
    let mut sections = Vec::new();
    let mut cursor = 0;
    let mut current: Option<String> = None;

    while let Some((open, close, label)) = next_header(comment, cursor) {
        if let Some(label) = current.take() {
            sections.push(CommentSection {
                label,
                body: comment[cursor..open].trim().to_string(),
            });
        }
        current = Some(label.to_string());
        cursor = close;
    }

    match current {
        Some(label) => sections.push(CommentSection {
            label,
            body: comment[cursor..].trim().to_string(),
        }),
        None if !comment.trim().is_empty() => sections.push(CommentSection {
            label: String::new(),
            body: comment.trim().to_string(),
        }),
        None => {}
    }

    sections
}

/// Finds the next header at or after `from`, returning (start, end-after-header, label).
/// `【label】` may appear anywhere; ASCII `[label]` only at the start of a line.
fn next_header(comment: &str, from: usize) -> Option<(usize, usize, &str)> {
    comment[from..].char_indices().find_map(|(offset, open)| {
        let start = from + offset;
        let close = match open {
            '【' => '】',
            '[' if starts_line(comment, start) => ']',
            _ => return None,
        };
        let inner_start = start + open.len_utf8();
        let inner_len = comment[inner_start..].find(close)?;
        let label = comment[inner_start..inner_start + inner_len].trim();
        if label.is_empty() || label.contains('\n') {
            return None;
        }
        Some((start, inner_start + inner_len + close.len_utf8(), label))
    })
}

fn starts_line(comment: &str, at: usize) -> bool {
    let before = comment[..at].trim_end_matches(|c: char| c == ' ' || c == '\t');
    before.is_empty() || before.ends_with('\n')
}
