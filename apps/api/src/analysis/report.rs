//! Display projection of a processed analysis: per-category score cards and an
//! overall grade. Numbers here are for rendering only; grades stay authoritative.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::analysis::comment::{comment_sections, CommentSection};
use crate::analysis::grades::{average_grade, grade_to_score};
use crate::analysis::models::{LetterGrade, ResumeAnalysisResult, ScoreEntry};
use crate::analysis::pipeline::{AnalysisStage, ProcessedAnalysis};

#[derive(Debug, Clone, Serialize)]
pub struct ScoreCard {
    pub category: String,
    pub icon: String,
    pub grade: LetterGrade,
    /// Target value for the animated score display.
    pub score: i32,
    pub comment_sections: Vec<CommentSection>,
}

impl From<&ScoreEntry> for ScoreCard {
    fn from(entry: &ScoreEntry) -> Self {
        Self {
            category: entry.category.clone(),
            icon: entry.icon.clone(),
            grade: entry.grade,
            score: grade_to_score(entry.grade),
            comment_sections: comment_sections(&entry.comment),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub stage: AnalysisStage,
    pub overall_grade: Option<LetterGrade>,
    pub overall_score: Option<i32>,
    pub score_cards: Vec<ScoreCard>,
    pub analysis: ResumeAnalysisResult,
}

impl From<ProcessedAnalysis> for AnalysisReport {
    fn from(processed: ProcessedAnalysis) -> Self {
        let overall_grade = average_grade(&processed.result.grades());
        Self {
            analysis_id: Uuid::new_v4(),
            analyzed_at: Utc::now(),
            stage: processed.stage,
            overall_grade,
            overall_score: overall_grade.map(grade_to_score),
            score_cards: processed.result.scores.iter().map(ScoreCard::from).collect(),
            analysis: processed.result,
        }
    }
}
