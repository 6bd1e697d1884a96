// All LLM prompt constants for the Analysis module.
// Reuses cross-cutting fragments from llm_client::prompts.

use serde::{Deserialize, Serialize};

use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, JSON_ONLY_SYSTEM};

/// One evaluation category the model must grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCategory {
    pub name: String,
    pub icon: String,
    /// What the grader should look at for this category.
    pub focus: String,
}

impl ScoreCategory {
    fn new(name: &str, icon: &str, focus: &str) -> Self {
        Self {
            name: name.to_string(),
            icon: icon.to_string(),
            focus: focus.to_string(),
        }
    }
}

pub fn default_categories() -> Vec<ScoreCategory> {
    vec![
        ScoreCategory::new(
            "Projects",
            "🚀",
            "scope, ownership and technical depth of listed projects",
        ),
        ScoreCategory::new(
            "Skills",
            "🛠️",
            "breadth and evidence of the stated technical skills",
        ),
        ScoreCategory::new(
            "Work Experience",
            "💼",
            "responsibilities, measurable impact and career progression",
        ),
        ScoreCategory::new(
            "Education",
            "🎓",
            "degree relevance, coursework and academic results",
        ),
        ScoreCategory::new(
            "Achievements",
            "🏆",
            "awards, competitions and recognised contributions",
        ),
        ScoreCategory::new(
            "Completeness",
            "📋",
            "whether the resume covers what recruiters expect to find",
        ),
    ]
}

/// Resume analysis prompt template. Replace `{resume_text}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following resume and return a JSON object with this EXACT schema:
{
  "projects": [
    {"name": "", "description": "", "technologies": [""], "role": "", "contribution": "", "duration": ""}
  ],
  "projects_summary": "",
  "expertise": [""],
  "expertise_summary": "",
  "work_experiences": [
    {"company": "", "position": "", "duration": "", "description": "", "contribution": "", "technologies": [""]}
  ],
  "work_experiences_summary": "",
  "education_background": [
    {"institution": "", "degree": "", "major": "", "duration": "", "gpa": "", "courses": [""], "achievements": [""]}
  ],
  "education_summary": "",
  "achievements": [""],
  "achievements_summary": "",
  "missing_content": {
    "critical_missing": [""],
    "recommended_additions": [""],
    "impact_analysis": "",
    "priority_suggestions": [""]
  },
  "scores": [
    {"category": "", "grade": "B+", "description": "", "comment": "【Observation】...【Reasoning】...【Conclusion】...", "icon": "", "suggestions": [""]}
  ]
}

Rules:
- Every list field is a JSON array of strings, never a comma-separated string.
- "achievements" items are plain strings, not objects.
- "grade" is exactly one of: F, D, C-, C, C+, B-, B, B+, A-, A, A+.
- "comment" has three sections headed 【Observation】, 【Reasoning】 and 【Conclusion】.

RESUME:
{resume_text}"#;

/// System prompt assembled from the configured category list.
pub fn build_system_prompt(categories: &[ScoreCategory]) -> String {
    let category_lines: Vec<String> = categories
        .iter()
        .map(|c| format!("- {} (icon \"{}\"): {}", c.name, c.icon, c.focus))
        .collect();

    format!(
        "You are an experienced technical recruiter reviewing a resume. \
        Extract its content and grade it in exactly these categories, one score entry each, \
        using the given icon:\n{}\n\n{}\n\n{}",
        category_lines.join("\n"),
        GROUNDING_INSTRUCTION,
        JSON_ONLY_SYSTEM
    )
}

pub fn build_user_prompt(resume_text: &str) -> String {
    ANALYSIS_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}
