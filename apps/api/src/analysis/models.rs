//! Typed resume analysis record produced by the normalization pipeline.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Placeholder written into summary fields the model left blank ("no relevant information").
pub const NO_INFO_PLACEHOLDER: &str = "無相關資訊";

// ────────────────────────────────────────────────────────────────────────────
// Letter grades
// ────────────────────────────────────────────────────────────────────────────

/// Closed grade scale, declared worst → best so `Ord` follows grade quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    #[serde(rename = "F")]
    F,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A+")]
    APlus,
}

impl LetterGrade {
    pub const ALL: [LetterGrade; 11] = [
        LetterGrade::F,
        LetterGrade::D,
        LetterGrade::CMinus,
        LetterGrade::C,
        LetterGrade::CPlus,
        LetterGrade::BMinus,
        LetterGrade::B,
        LetterGrade::BPlus,
        LetterGrade::AMinus,
        LetterGrade::A,
        LetterGrade::APlus,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LetterGrade::F => "F",
            LetterGrade::D => "D",
            LetterGrade::CMinus => "C-",
            LetterGrade::C => "C",
            LetterGrade::CPlus => "C+",
            LetterGrade::BMinus => "B-",
            LetterGrade::B => "B",
            LetterGrade::BPlus => "B+",
            LetterGrade::AMinus => "A-",
            LetterGrade::A => "A",
            LetterGrade::APlus => "A+",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a letter grade")]
pub struct UnknownGrade(pub String);

impl FromStr for LetterGrade {
    type Err = UnknownGrade;

    /// Exact symbol match only; case folding is a repair concern.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LetterGrade::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| UnknownGrade(s.to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Record types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub role: String,
    pub contribution: String,
    pub duration: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub company: String,
    pub position: String,
    pub duration: String,
    pub description: String,
    pub contribution: String,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub major: String,
    pub duration: String,
    pub gpa: String,
    pub courses: Vec<String>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissingContent {
    pub critical_missing: Vec<String>,
    pub recommended_additions: Vec<String>,
    pub impact_analysis: String,
    pub priority_suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub category: String,
    pub grade: LetterGrade,
    pub description: String,
    /// Free-form chain-of-thought text; see `analysis::comment` for its sections.
    pub comment: String,
    pub icon: String,
    pub suggestions: Vec<String>,
}

/// The fully-typed analysis handed to callers. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalysisResult {
    pub projects: Vec<Project>,
    pub projects_summary: String,
    pub expertise: Vec<String>,
    pub expertise_summary: String,
    pub work_experiences: Vec<WorkExperience>,
    pub work_experiences_summary: String,
    pub education_background: Vec<Education>,
    pub education_summary: String,
    pub achievements: Vec<String>,
    pub achievements_summary: String,
    pub missing_content: MissingContent,
    pub scores: Vec<ScoreEntry>,
}

impl ResumeAnalysisResult {
    /// Returns a copy whose `expertise` is the union of stated skills and every
    /// project / work technology, deduplicated case-insensitively (first spelling wins).
    pub fn with_merged_expertise(mut self) -> Self {
        let mut seen = HashSet::new();
        let mut merged = Vec::new();

        let candidates = self
            .expertise
            .iter()
            .chain(self.projects.iter().flat_map(|p| p.technologies.iter()))
            .chain(
                self.work_experiences
                    .iter()
                    .flat_map(|w| w.technologies.iter()),
            );

        for skill in candidates {
            let trimmed = skill.trim();
            if trimmed.is_empty() {
                continue;
            }
            if seen.insert(trimmed.to_lowercase()) {
                merged.push(trimmed.to_string());
            }
        }

        self.expertise = merged;
        self
    }

    pub fn grades(&self) -> Vec<LetterGrade> {
        self.scores.iter().map(|s| s.grade).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_serde_uses_symbols() {
        let json = serde_json::to_string(&LetterGrade::BPlus).unwrap();
        assert_eq!(json, r#""B+""#);
        let grade: LetterGrade = serde_json::from_str(r#""C-""#).unwrap();
        assert_eq!(grade, LetterGrade::CMinus);
    }

    #[test]
    fn test_grade_order_is_worst_to_best() {
        assert!(LetterGrade::F < LetterGrade::D);
        assert!(LetterGrade::CMinus < LetterGrade::C);
        assert!(LetterGrade::A < LetterGrade::APlus);
        let mut sorted = LetterGrade::ALL;
        sorted.sort();
        assert_eq!(sorted, LetterGrade::ALL);
    }

    #[test]
    fn test_grade_from_str_is_exact() {
        assert_eq!("A+".parse::<LetterGrade>().unwrap(), LetterGrade::APlus);
        assert!("a+".parse::<LetterGrade>().is_err());
        assert!("E".parse::<LetterGrade>().is_err());
        assert!(" B".parse::<LetterGrade>().is_err());
    }

    #[test]
    fn test_merged_expertise_dedups_case_insensitively() {
        let result = ResumeAnalysisResult {
            projects: vec![Project {
                technologies: vec!["react".to_string(), "Rust".to_string()],
                ..Default::default()
            }],
            projects_summary: NO_INFO_PLACEHOLDER.to_string(),
            expertise: vec!["React".to_string(), " ".to_string()],
            expertise_summary: NO_INFO_PLACEHOLDER.to_string(),
            work_experiences: vec![WorkExperience {
                technologies: vec!["Postgres".to_string(), "rust".to_string()],
                ..Default::default()
            }],
            work_experiences_summary: NO_INFO_PLACEHOLDER.to_string(),
            education_background: vec![],
            education_summary: NO_INFO_PLACEHOLDER.to_string(),
            achievements: vec![],
            achievements_summary: NO_INFO_PLACEHOLDER.to_string(),
            missing_content: MissingContent::default(),
            scores: vec![],
        };

        let merged = result.with_merged_expertise();
        assert_eq!(merged.expertise, vec!["React", "Rust", "Postgres"]);
    }
}
