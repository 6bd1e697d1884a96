//! Last-resort result: always schema-conformant, so callers can render something
//! even when the model output was unusable.

use serde_json::Value;
use tracing::{debug, warn};

use crate::analysis::models::{MissingContent, ResumeAnalysisResult, NO_INFO_PLACEHOLDER};
use crate::analysis::schema::{validate_top_level_field, TOP_LEVEL_FIELDS};

/// Builds the placeholder result, keeping any top-level field of `partial` that
/// validates on its own (e.g. a usable `projects_summary` next to broken scores).
pub fn build_default(partial: Option<&Value>) -> ResumeAnalysisResult {
    let base = placeholder_result();

    let Some(fragments) = partial.and_then(Value::as_object) else {
        return base;
    };

    let mut merged = match serde_json::to_value(&base) {
        Ok(Value::Object(map)) => map,
        _ => return base,
    };

    let mut kept = Vec::new();
    for (name, _) in TOP_LEVEL_FIELDS {
        let Some(fragment) = fragments.get(*name) else {
            continue;
        };
        if validate_top_level_field(name, Some(fragment)).is_empty() {
            merged.insert(name.to_string(), fragment.clone());
            kept.push(*name);
        }
    }

    if kept.is_empty() {
        return base;
    }
    debug!("Default result keeps valid fragments: {}", kept.join(", "));

    match serde_json::from_value(Value::Object(merged)) {
        Ok(result) => result,
        Err(e) => {
            warn!("Discarding fragments that failed to decode: {e}");
            base
        }
    }
}

fn placeholder_result() -> ResumeAnalysisResult {
    let placeholder = || NO_INFO_PLACEHOLDER.to_string();
    ResumeAnalysisResult {
        projects: Vec::new(),
        projects_summary: placeholder(),
        expertise: Vec::new(),
        expertise_summary: placeholder(),
        work_experiences: Vec::new(),
        work_experiences_summary: placeholder(),
        education_background: Vec::new(),
        education_summary: placeholder(),
        achievements: Vec::new(),
        achievements_summary: placeholder(),
        missing_content: MissingContent {
            critical_missing: vec!["complete resume content".to_string()],
            recommended_additions: vec![
                "work experience with measurable outcomes".to_string(),
                "project descriptions with technologies used".to_string(),
                "education background".to_string(),
            ],
            impact_analysis: "The resume could not be analyzed, so no section can be evaluated yet."
                .to_string(),
            priority_suggestions: vec![
                "Upload a complete, readable resume and run the analysis again".to_string(),
            ],
        },
        scores: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::schema::validate;
    use serde_json::json;

    #[test]
    fn test_default_is_schema_conformant() {
        let result = build_default(None);
        let as_value = serde_json::to_value(&result).unwrap();
        assert!(validate(&as_value).is_ok());
        assert!(result.projects.is_empty());
        assert!(result.scores.is_empty());
        assert_eq!(result.projects_summary, NO_INFO_PLACEHOLDER);
        assert_eq!(
            result.missing_content.critical_missing,
            vec!["complete resume content"]
        );
    }

    #[test]
    fn test_valid_fragments_are_merged() {
        let partial = json!({
            "projects_summary": "Two solid projects.",
            "expertise": ["Rust"],
            "scores": [{"category": "Skills", "grade": "E"}],
            "achievements": "not a list"
        });
        let result = build_default(Some(&partial));
        assert_eq!(result.projects_summary, "Two solid projects.");
        assert_eq!(result.expertise, vec!["Rust"]);
        assert!(result.scores.is_empty());
        assert!(result.achievements.is_empty());
        assert_eq!(result.education_summary, NO_INFO_PLACEHOLDER);
    }

    #[test]
    fn test_non_object_partial_is_ignored() {
        assert_eq!(build_default(Some(&json!([1, 2]))), build_default(None));
    }

    #[test]
    fn test_empty_summary_fragment_is_not_merged() {
        let result = build_default(Some(&json!({"projects_summary": ""})));
        assert_eq!(result.projects_summary, NO_INFO_PLACEHOLDER);
    }
}
