//! Normalization pipeline — turns raw model text into a guaranteed-valid analysis.
//!
//! extract → parse → validate → (repair → validate, once) → default.
//! Malformed model output never surfaces as an error; `AnalysisStage` records how
//! much recovery was needed.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::analysis::defaults::build_default;
use crate::analysis::extractor::extract;
use crate::analysis::models::ResumeAnalysisResult;
use crate::analysis::parser::parse;
use crate::analysis::repair::repair;
use crate::analysis::schema::validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStage {
    /// Model output validated as-is.
    Direct,
    /// Validated after one repair pass.
    Repaired,
    /// Unparseable or unrepairable; placeholder result.
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedAnalysis {
    pub result: ResumeAnalysisResult,
    pub stage: AnalysisStage,
}

/// Stateless; clone freely and call from any number of requests at once.
#[derive(Debug, Clone, Default)]
pub struct AnalysisPipeline;

impl AnalysisPipeline {
    pub fn new() -> Self {
        Self
    }

    pub fn process(&self, raw_llm_text: &str) -> ProcessedAnalysis {
        let (result, stage) = Self::run(raw_llm_text);
        match stage {
            AnalysisStage::Direct => debug!("Model output validated directly"),
            AnalysisStage::Repaired => info!("Model output validated after repair"),
            AnalysisStage::Default => warn!("Model output unusable, returning default analysis"),
        }
        ProcessedAnalysis {
            result: result.with_merged_expertise(),
            stage,
        }
    }

    fn run(raw_llm_text: &str) -> (ResumeAnalysisResult, AnalysisStage) {
        let candidate = extract(raw_llm_text);

        let value = match parse(&candidate) {
            Ok(value) => value,
            Err(e) => {
                warn!("Model output is not valid JSON: {e}");
                return (build_default(None), AnalysisStage::Default);
            }
        };

        let violations = match validate(&value) {
            Ok(result) => return (result, AnalysisStage::Direct),
            Err(violations) => violations,
        };
        debug!(
            "Model output has {} schema violations, first: {}",
            violations.len(),
            violations
                .first()
                .map(ToString::to_string)
                .unwrap_or_default()
        );

        let repaired = repair(&value, &violations);
        match validate(&repaired) {
            Ok(result) => (result, AnalysisStage::Repaired),
            Err(remaining) => {
                warn!(
                    "Repair left {} violations (e.g. {}), falling back to defaults",
                    remaining.len(),
                    remaining
                        .first()
                        .map(ToString::to_string)
                        .unwrap_or_default()
                );
                (build_default(Some(&repaired)), AnalysisStage::Default)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::{LetterGrade, NO_INFO_PLACEHOLDER};
    use crate::analysis::schema::tests::valid_document;
    use serde_json::json;

    fn assert_schema_valid(result: &ResumeAnalysisResult) {
        let value = serde_json::to_value(result).unwrap();
        assert!(validate(&value).is_ok(), "result failed validation: {value}");
    }

    const FENCED_SCENARIO: &str = r#"Here you go:
```json
{"projects": [], "expertise": ["React"], "work_experiences": [], "education_background": [], "achievements": [{"description": "Led team of 5"}], "missing_content": {"critical_missing": "GPA, certifications"}, "scores": [{"category": "Skills", "grade": "B+", "description": "ok", "comment": "x", "icon": "🛠️", "suggestions": "Add more, Be specific"}]}
```
"#;

    #[test]
    fn test_end_to_end_fenced_scenario_is_repaired() {
        let processed = AnalysisPipeline::new().process(FENCED_SCENARIO);
        assert_eq!(processed.stage, AnalysisStage::Repaired);

        let result = processed.result;
        assert_eq!(result.achievements, vec!["Led team of 5"]);
        assert_eq!(
            result.missing_content.critical_missing,
            vec!["GPA", "certifications"]
        );
        assert_eq!(result.scores[0].suggestions, vec!["Add more", "Be specific"]);
        assert_eq!(result.scores[0].grade, LetterGrade::BPlus);
        assert_eq!(result.expertise, vec!["React"]);
        for summary in [
            &result.projects_summary,
            &result.expertise_summary,
            &result.work_experiences_summary,
            &result.education_summary,
            &result.achievements_summary,
        ] {
            assert_eq!(summary, NO_INFO_PLACEHOLDER);
        }
        assert_schema_valid(&result);
    }

    #[test]
    fn test_garbage_input_returns_default() {
        let processed = AnalysisPipeline::new().process("not json at all");
        assert_eq!(processed.stage, AnalysisStage::Default);
        let result = &processed.result;
        assert!(result.projects.is_empty());
        assert!(result.expertise.is_empty());
        assert!(result.work_experiences.is_empty());
        assert!(result.education_background.is_empty());
        assert!(result.achievements.is_empty());
        assert!(result.scores.is_empty());
        assert_schema_valid(result);
    }

    #[test]
    fn test_valid_document_is_direct() {
        let raw = valid_document().to_string();
        let processed = AnalysisPipeline::new().process(&raw);
        assert_eq!(processed.stage, AnalysisStage::Direct);
        assert_eq!(processed.result.projects[0].name, "Payments API");
        // Project and work technologies are folded into expertise.
        assert_eq!(processed.result.expertise, vec!["Rust", "Postgres", "Kafka"]);
    }

    #[test]
    fn test_unrepairable_grade_falls_back_with_valid_fragments() {
        let mut doc = valid_document();
        doc["scores"][0]["grade"] = json!("Excellent");
        let processed = AnalysisPipeline::new().process(&doc.to_string());
        assert_eq!(processed.stage, AnalysisStage::Default);
        assert!(processed.result.scores.is_empty());
        assert_eq!(processed.result.projects_summary, "One backend project.");
        assert_schema_valid(&processed.result);
    }

    #[test]
    fn test_every_input_shape_yields_valid_result() {
        let inputs = [
            String::new(),
            "   ".to_string(),
            "{".to_string(),
            "[1, 2, 3]".to_string(),
            "42".to_string(),
            r#""{\"projects\": []}""#.to_string(),
            "{}".to_string(),
            r#"{"scores": "A+"}"#.to_string(),
            r#"{"projects": "Payments API"}"#.to_string(),
            format!("```json\n{}\n```", valid_document()),
            "```\nno braces here\n```".to_string(),
        ];
        let pipeline = AnalysisPipeline::new();
        for input in inputs {
            let processed = pipeline.process(&input);
            assert_schema_valid(&processed.result);
        }
    }

    #[test]
    fn test_empty_object_is_repaired_not_defaulted() {
        let processed = AnalysisPipeline::new().process("{}");
        assert_eq!(processed.stage, AnalysisStage::Repaired);
        assert_eq!(processed.result.projects_summary, NO_INFO_PLACEHOLDER);
        assert!(processed.result.missing_content.critical_missing.is_empty());
    }

    #[test]
    fn test_lone_records_are_repaired_not_defaulted() {
        let raw = r#"{
            "projects": {"name": "Solo", "technologies": "Rust, Go"},
            "education_background": {"institution": "NTU", "achievements": [{"title": "Dean's list"}]},
            "scores": {"category": "Skills", "grade": "b", "suggestions": "a; b"}
        }"#;
        let processed = AnalysisPipeline::new().process(raw);
        assert_eq!(processed.stage, AnalysisStage::Repaired);

        let result = processed.result;
        assert_eq!(result.projects.len(), 1);
        assert_eq!(result.projects[0].technologies, vec!["Rust", "Go"]);
        assert_eq!(result.education_background[0].achievements, vec!["Dean's list"]);
        assert_eq!(result.scores[0].grade, LetterGrade::B);
        assert_eq!(result.scores[0].suggestions, vec!["a", "b"]);
        assert_eq!(result.expertise, vec!["Rust", "Go"]);
        assert_schema_valid(&result);
    }

    #[test]
    fn test_stage_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&AnalysisStage::Repaired).unwrap(),
            r#""repaired""#
        );
    }
}
