//! Repairer — narrow, idempotent transforms for parsed-but-misshapen model output.
//!
//! Transforms run in a fixed order:
//! 0. a lone record where a list is expected → one-element list
//! 1. achievements objects → plain strings
//! 2. delimited strings → string lists (and list elements → strings)
//! 3. summaries / lists / `missing_content` defaulted when null or absent
//! 4. record elements completed with every declared sub-field
//! 5. grade symbols normalized
//!
//! The input is never modified; a corrected copy is returned for revalidation.
//! Anything these transforms cannot fix is left in place for the validator to reject.

use serde_json::{Map, Value};
use tracing::debug;

use crate::analysis::grades::score_to_grade;
use crate::analysis::models::{LetterGrade, NO_INFO_PLACEHOLDER};
use crate::analysis::schema::{FieldKind, ValidationError, TOP_LEVEL_FIELDS};

/// Keys tried, in order, when flattening an achievement-like object into text.
const TEXT_KEYS: &[&str] = &["description", "achievement", "title", "name"];

/// Single-pass split set: ASCII comma, full-width comma, semicolons, ideographic comma.
const LIST_DELIMITERS: &[char] = &[',', '，', ';', '；', '、'];

pub fn repair(value: &Value, violations: &[ValidationError]) -> Value {
    let Some(object) = value.as_object() else {
        debug!("Skipping repair: root is not an object");
        return value.clone();
    };
    debug!("Repairing model output with {} violations", violations.len());

    let mut repaired = object.clone();
    wrap_lone_records(&mut repaired);
    normalize_achievements(&mut repaired);
    coerce_text_lists(&mut repaired);
    default_scalars(&mut repaired);
    complete_records(&mut repaired);
    normalize_grades(&mut repaired);
    Value::Object(repaired)
}

// ────────────────────────────────────────────────────────────────────────────
// 0. Lone records
// ────────────────────────────────────────────────────────────────────────────

/// Runs first so the nested-list passes below see the record inside its list.
fn wrap_lone_records(root: &mut Map<String, Value>) {
    for (name, kind) in TOP_LEVEL_FIELDS {
        if !matches!(kind, FieldKind::RecordList(_)) {
            continue;
        }
        if let Some(slot) = root.get_mut(*name) {
            if slot.is_object() {
                let record = slot.take();
                *slot = Value::Array(vec![record]);
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// 1. Achievements
// ────────────────────────────────────────────────────────────────────────────

fn normalize_achievements(root: &mut Map<String, Value>) {
    if let Some(Value::Array(items)) = root.get_mut("achievements") {
        flatten_objects(items);
    }
    if let Some(Value::Array(education)) = root.get_mut("education_background") {
        for entry in education.iter_mut() {
            if let Some(Value::Array(items)) = entry.get_mut("achievements") {
                flatten_objects(items);
            }
        }
    }
}

fn flatten_objects(items: &mut [Value]) {
    for item in items.iter_mut() {
        let text = match &*item {
            Value::Object(record) => record_text(record),
            _ => continue,
        };
        *item = Value::String(text);
    }
}

/// First non-blank of `description`, `achievement`, `title`, `name`; else the object as JSON text.
fn record_text(record: &Map<String, Value>) -> String {
    TEXT_KEYS
        .iter()
        .filter_map(|key| record.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Value::Object(record.clone()).to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// 2. Delimited strings → lists
// ────────────────────────────────────────────────────────────────────────────

/// Coerces every string-list field the schema declares, top-level and nested.
fn coerce_text_lists(root: &mut Map<String, Value>) {
    for (name, kind) in TOP_LEVEL_FIELDS {
        let Some(value) = root.get_mut(*name) else {
            continue;
        };
        match kind {
            FieldKind::TextList => coerce_text_list(value),
            FieldKind::Record(fields) => coerce_record_lists(value, fields),
            FieldKind::RecordList(fields) => {
                if let Value::Array(items) = value {
                    for item in items.iter_mut() {
                        coerce_record_lists(item, fields);
                    }
                }
            }
            _ => {}
        }
    }
}

fn coerce_record_lists(record: &mut Value, fields: &[(&str, FieldKind)]) {
    let Value::Object(record) = record else {
        return;
    };
    for (name, kind) in fields {
        if let (FieldKind::TextList, Some(value)) = (kind, record.get_mut(*name)) {
            coerce_text_list(value);
        }
    }
}

/// Strings become lists; list elements become strings (nulls dropped). Other shapes are left alone.
fn coerce_text_list(value: &mut Value) {
    let texts = match &*value {
        Value::String(text) => split_list(text),
        Value::Array(items) => items.iter().filter_map(element_text).collect(),
        _ => return,
    };
    *value = Value::Array(texts.into_iter().map(Value::String).collect());
}

/// A JSON array literal is honoured first; otherwise one split over every delimiter at once.
fn split_list(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if trimmed.starts_with('[') {
        if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(trimmed) {
            return items.iter().filter_map(element_text).collect();
        }
    }

    if trimmed.contains(LIST_DELIMITERS) {
        return trimmed
            .split(LIST_DELIMITERS)
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(str::to_string)
            .collect();
    }

    vec![trimmed.to_string()]
}

fn element_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(record) => Some(record_text(record)),
        Value::Array(_) => Some(value.to_string()),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// 3. Scalar defaulting
// ────────────────────────────────────────────────────────────────────────────

fn default_scalars(root: &mut Map<String, Value>) {
    for (name, kind) in TOP_LEVEL_FIELDS {
        match kind {
            FieldKind::Summary => default_summary(root.entry(*name).or_insert(Value::Null)),
            FieldKind::TextList | FieldKind::RecordList(_) => {
                let slot = root.entry(*name).or_insert(Value::Null);
                if slot.is_null() {
                    *slot = Value::Array(Vec::new());
                }
            }
            FieldKind::Record(fields) => {
                let slot = root.entry(*name).or_insert(Value::Null);
                if slot.is_null() {
                    *slot = Value::Object(Map::new());
                }
                if let Value::Object(record) = slot {
                    default_record_fields(record, fields);
                }
            }
            _ => {}
        }
    }
}

/// Defaults inside a nested object such as `missing_content`: lists to `[]`, text to the placeholder.
fn default_record_fields(record: &mut Map<String, Value>, fields: &[(&str, FieldKind)]) {
    for (name, kind) in fields {
        let slot = record.entry(*name).or_insert(Value::Null);
        match kind {
            FieldKind::TextList if slot.is_null() => *slot = Value::Array(Vec::new()),
            FieldKind::Text | FieldKind::Summary => default_summary(slot),
            _ => {}
        }
    }
}

fn default_summary(slot: &mut Value) {
    let replacement = match &*slot {
        Value::Null => placeholder(),
        Value::String(s) if s.trim().is_empty() => placeholder(),
        Value::Number(_) | Value::Bool(_) => Value::String(slot.to_string()),
        _ => return,
    };
    *slot = replacement;
}

fn placeholder() -> Value {
    Value::String(NO_INFO_PLACEHOLDER.to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// 4. Record completion
// ────────────────────────────────────────────────────────────────────────────

fn complete_records(root: &mut Map<String, Value>) {
    for (name, kind) in TOP_LEVEL_FIELDS {
        let FieldKind::RecordList(fields) = kind else {
            continue;
        };
        if let Some(Value::Array(items)) = root.get_mut(*name) {
            for item in items.iter_mut() {
                complete_record(item, fields);
            }
        }
    }
}

/// Fills every declared sub-field; a bare scalar element is kept as the record's first field.
fn complete_record(item: &mut Value, fields: &[(&str, FieldKind)]) {
    let replacement = match &*item {
        Value::Object(_) => None,
        Value::Array(_) => return,
        Value::Null => Some(Map::new()),
        scalar => {
            let mut record = Map::new();
            if let Some((first, _)) = fields.first() {
                let text = element_text(scalar).unwrap_or_default();
                record.insert(first.to_string(), Value::String(text));
            }
            Some(record)
        }
    };
    if let Some(record) = replacement {
        *item = Value::Object(record);
    }

    let Value::Object(record) = item else {
        return;
    };
    for (name, kind) in fields {
        let slot = record.entry(*name).or_insert(Value::Null);
        match kind {
            FieldKind::Text => {
                if let Some(text) = scalar_text(slot) {
                    *slot = Value::String(text);
                }
            }
            FieldKind::TextList if slot.is_null() => *slot = Value::Array(Vec::new()),
            FieldKind::Grade if slot.is_null() => {
                // Nothing sensible to invent; leave the gap for the validator.
                record.remove(*name);
            }
            _ => {}
        }
    }
}

/// Replacement text for a null / number / boolean slot; `None` leaves the slot as is.
fn scalar_text(slot: &Value) -> Option<String> {
    match slot {
        Value::Null => Some(String::new()),
        Value::Number(_) | Value::Bool(_) => Some(slot.to_string()),
        _ => None,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// 5. Grades
// ────────────────────────────────────────────────────────────────────────────

fn normalize_grades(root: &mut Map<String, Value>) {
    let Some(Value::Array(scores)) = root.get_mut("scores") else {
        return;
    };
    for score in scores.iter_mut() {
        if let Some(grade) = score.get_mut("grade") {
            normalize_grade(grade);
        }
    }
}

/// Case, spacing and full-width signs are folded; numbers go through the boundary table.
fn normalize_grade(grade: &mut Value) {
    let normalized = match grade {
        Value::String(s) => {
            let folded: String = s
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| match c {
                    '＋' => '+',
                    '－' | '–' => '-',
                    other => other.to_ascii_uppercase(),
                })
                .collect();
            folded.parse::<LetterGrade>().ok()
        }
        Value::Number(n) => n.as_f64().map(|score| score_to_grade(score.round() as i32)),
        _ => None,
    };

    if let Some(letter) = normalized {
        *grade = Value::String(letter.as_str().to_string());
    }
}
