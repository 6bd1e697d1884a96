//! Schema validation of parsed model output.
//!
//! The walk over `serde_json::Value` records every violation with its path, so the
//! repairer sees the whole picture at once. Only a clean walk is decoded into the
//! typed record.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::analysis::models::{LetterGrade, ResumeAnalysisResult};

// ────────────────────────────────────────────────────────────────────────────
// Schema description (shared with the repairer and the default builder)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Any string, empty allowed.
    Text,
    /// Non-empty string.
    Summary,
    TextList,
    Grade,
    Record(&'static [(&'static str, FieldKind)]),
    RecordList(&'static [(&'static str, FieldKind)]),
}

pub const PROJECT_FIELDS: &[(&str, FieldKind)] = &[
    ("name", FieldKind::Text),
    ("description", FieldKind::Text),
    ("technologies", FieldKind::TextList),
    ("role", FieldKind::Text),
    ("contribution", FieldKind::Text),
    ("duration", FieldKind::Text),
];

pub const WORK_EXPERIENCE_FIELDS: &[(&str, FieldKind)] = &[
    ("company", FieldKind::Text),
    ("position", FieldKind::Text),
    ("duration", FieldKind::Text),
    ("description", FieldKind::Text),
    ("contribution", FieldKind::Text),
    ("technologies", FieldKind::TextList),
];

pub const EDUCATION_FIELDS: &[(&str, FieldKind)] = &[
    ("institution", FieldKind::Text),
    ("degree", FieldKind::Text),
    ("major", FieldKind::Text),
    ("duration", FieldKind::Text),
    ("gpa", FieldKind::Text),
    ("courses", FieldKind::TextList),
    ("achievements", FieldKind::TextList),
];

pub const MISSING_CONTENT_FIELDS: &[(&str, FieldKind)] = &[
    ("critical_missing", FieldKind::TextList),
    ("recommended_additions", FieldKind::TextList),
    ("impact_analysis", FieldKind::Text),
    ("priority_suggestions", FieldKind::TextList),
];

pub const SCORE_FIELDS: &[(&str, FieldKind)] = &[
    ("category", FieldKind::Text),
    ("grade", FieldKind::Grade),
    ("description", FieldKind::Text),
    ("comment", FieldKind::Text),
    ("icon", FieldKind::Text),
    ("suggestions", FieldKind::TextList),
];

pub const TOP_LEVEL_FIELDS: &[(&str, FieldKind)] = &[
    ("projects", FieldKind::RecordList(PROJECT_FIELDS)),
    ("projects_summary", FieldKind::Summary),
    ("expertise", FieldKind::TextList),
    ("expertise_summary", FieldKind::Summary),
    ("work_experiences", FieldKind::RecordList(WORK_EXPERIENCE_FIELDS)),
    ("work_experiences_summary", FieldKind::Summary),
    ("education_background", FieldKind::RecordList(EDUCATION_FIELDS)),
    ("education_summary", FieldKind::Summary),
    ("achievements", FieldKind::TextList),
    ("achievements_summary", FieldKind::Summary),
    ("missing_content", FieldKind::Record(MISSING_CONTENT_FIELDS)),
    ("scores", FieldKind::RecordList(SCORE_FIELDS)),
];

// ────────────────────────────────────────────────────────────────────────────
// Violations
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationReason {
    MissingField,
    WrongType {
        expected: &'static str,
        got: &'static str,
    },
    GradeNotInEnum(String),
    Empty,
    Decode(String),
}

impl fmt::Display for ViolationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationReason::MissingField => f.write_str("missing required field"),
            ViolationReason::WrongType { expected, got } => {
                write!(f, "expected {expected}, got {got}")
            }
            ViolationReason::GradeNotInEnum(grade) => write!(f, "grade not in enum: {grade}"),
            ViolationReason::Empty => f.write_str("must not be empty"),
            ViolationReason::Decode(msg) => write!(f, "decode failed: {msg}"),
        }
    }
}

/// One schema violation: a dot/bracket path (`scores[0].grade`) and what was wrong there.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {reason}")]
pub struct ValidationError {
    pub path: String,
    pub reason: ViolationReason,
}

impl ValidationError {
    fn new(path: impl Into<String>, reason: ViolationReason) -> Self {
        Self {
            path: path.into(),
            reason,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

/// Validates a parsed value and decodes it, or returns every violation found.
pub fn validate(value: &Value) -> Result<ResumeAnalysisResult, Vec<ValidationError>> {
    let Some(object) = value.as_object() else {
        return Err(vec![ValidationError::new(
            "$",
            ViolationReason::WrongType {
                expected: "object",
                got: type_name(value),
            },
        )]);
    };

    let mut errors = Vec::new();
    for (name, kind) in TOP_LEVEL_FIELDS {
        check_field(name, *kind, object.get(*name), &mut errors);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    serde_json::from_value(value.clone())
        .map_err(|e| vec![ValidationError::new("$", ViolationReason::Decode(e.to_string()))])
}

/// Validates a single top-level field in isolation. Unknown names are reported missing.
pub fn validate_top_level_field(name: &str, value: Option<&Value>) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    match TOP_LEVEL_FIELDS.iter().find(|(field, _)| *field == name) {
        Some((_, kind)) => check_field(name, *kind, value, &mut errors),
        None => errors.push(ValidationError::new(name, ViolationReason::MissingField)),
    }
    errors
}

fn check_field(path: &str, kind: FieldKind, value: Option<&Value>, errors: &mut Vec<ValidationError>) {
    let Some(value) = value else {
        errors.push(ValidationError::new(path, ViolationReason::MissingField));
        return;
    };

    match kind {
        FieldKind::Text => expect_string(path, value, errors),
        FieldKind::Summary => match value.as_str() {
            Some(s) if s.trim().is_empty() => {
                errors.push(ValidationError::new(path, ViolationReason::Empty))
            }
            Some(_) => {}
            None => errors.push(wrong_type(path, "string", value)),
        },
        FieldKind::TextList => match value.as_array() {
            Some(items) => {
                for (i, item) in items.iter().enumerate() {
                    expect_string(&format!("{path}[{i}]"), item, errors);
                }
            }
            None => errors.push(wrong_type(path, "array", value)),
        },
        FieldKind::Grade => match value.as_str() {
            Some(s) if s.parse::<LetterGrade>().is_ok() => {}
            Some(s) => errors.push(ValidationError::new(
                path,
                ViolationReason::GradeNotInEnum(s.to_string()),
            )),
            None => errors.push(wrong_type(path, "string", value)),
        },
        FieldKind::Record(fields) => check_record(path, fields, value, errors),
        FieldKind::RecordList(fields) => match value.as_array() {
            Some(items) => {
                for (i, item) in items.iter().enumerate() {
                    check_record(&format!("{path}[{i}]"), fields, item, errors);
                }
            }
            None => errors.push(wrong_type(path, "array", value)),
        },
    }
}

fn check_record(
    path: &str,
    fields: &[(&str, FieldKind)],
    value: &Value,
    errors: &mut Vec<ValidationError>,
) {
    let Some(object) = value.as_object() else {
        errors.push(wrong_type(path, "object", value));
        return;
    };
    for (name, kind) in fields {
        check_field(&format!("{path}.{name}"), *kind, object.get(*name), errors);
    }
}

fn expect_string(path: &str, value: &Value, errors: &mut Vec<ValidationError>) {
    if !value.is_string() {
        errors.push(wrong_type(path, "string", value));
    }
}

fn wrong_type(path: &str, expected: &'static str, value: &Value) -> ValidationError {
    ValidationError::new(
        path,
        ViolationReason::WrongType {
            expected,
            got: type_name(value),
        },
    )
}

pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
