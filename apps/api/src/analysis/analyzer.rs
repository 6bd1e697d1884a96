//! Resume analyzer — sends the resume to the LLM and normalizes whatever comes back.
//!
//! Model, temperature and category list arrive through explicit configuration;
//! nothing here reads environment or global state.

use std::sync::Arc;

use tracing::info;

use crate::analysis::pipeline::{AnalysisPipeline, ProcessedAnalysis};
use crate::analysis::prompts::{
    build_system_prompt, build_user_prompt, default_categories, ScoreCategory,
};
use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::{ChatCompleter, ChatMessage, ChatOptions};

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub temperature: f32,
    pub categories: Vec<ScoreCategory>,
}

impl AnalyzerConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            temperature: config.openai_temperature,
            categories: default_categories(),
        }
    }
}

#[derive(Clone)]
pub struct ResumeAnalyzer {
    llm: Arc<dyn ChatCompleter>,
    pipeline: AnalysisPipeline,
    system_prompt: String,
    temperature: f32,
}

impl ResumeAnalyzer {
    pub fn new(llm: Arc<dyn ChatCompleter>, config: AnalyzerConfig) -> Self {
        Self {
            llm,
            pipeline: AnalysisPipeline::new(),
            system_prompt: build_system_prompt(&config.categories),
            temperature: config.temperature,
        }
    }

    /// One LLM round-trip followed by normalization. Only transport failures are errors;
    /// bad model output comes back as a `Default`-stage analysis.
    pub async fn analyze(&self, resume_text: &str) -> Result<ProcessedAnalysis, AppError> {
        if resume_text.trim().is_empty() {
            return Err(AppError::Validation("resume_text cannot be empty".to_string()));
        }

        let messages = [
            ChatMessage::system(self.system_prompt.as_str()),
            ChatMessage::user(build_user_prompt(resume_text)),
        ];
        let options = ChatOptions {
            temperature: self.temperature,
            json_mode: true,
        };

        let completion = self
            .llm
            .complete_chat(&messages, options)
            .await
            .map_err(|e| AppError::Llm(format!("Resume analysis failed: {e}")))?;

        let processed = self.pipeline.process(&completion.text);
        info!(
            "Resume analyzed: stage={:?}, scores={}",
            processed.stage,
            processed.result.scores.len()
        );
        Ok(processed)
    }

    /// Normalizes previously captured model output without calling the LLM.
    pub fn normalize(&self, raw_llm_text: &str) -> ProcessedAnalysis {
        self.pipeline.process(raw_llm_text)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::analysis::pipeline::AnalysisStage;
    use crate::analysis::schema::tests::valid_document;
    use crate::llm_client::{ChatCompletion, LlmError};

    /// Replies with canned text and remembers what it was asked.
    pub(crate) struct CannedCompleter {
        pub reply: Option<String>,
        pub seen: Mutex<Vec<(Vec<ChatMessage>, ChatOptions)>>,
    }

    impl CannedCompleter {
        pub(crate) fn replying(text: &str) -> Self {
            Self {
                reply: Some(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                reply: None,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatCompleter for CannedCompleter {
        async fn complete_chat(
            &self,
            messages: &[ChatMessage],
            options: ChatOptions,
        ) -> Result<ChatCompletion, LlmError> {
            self.seen
                .lock()
                .unwrap()
                .push((messages.to_vec(), options));
            match &self.reply {
                Some(text) => Ok(ChatCompletion { text: text.clone() }),
                None => Err(LlmError::EmptyContent),
            }
        }
    }

    fn config() -> AnalyzerConfig {
        AnalyzerConfig {
            temperature: 0.2,
            categories: default_categories(),
        }
    }

    #[tokio::test]
    async fn test_analyze_sends_prompts_and_normalizes() {
        let llm = Arc::new(CannedCompleter::replying(&format!(
            "```json\n{}\n```",
            valid_document()
        )));
        let analyzer = ResumeAnalyzer::new(llm.clone(), config());

        let processed = analyzer.analyze("Jane Doe, Rust engineer").await.unwrap();
        assert_eq!(processed.stage, AnalysisStage::Direct);

        let seen = llm.seen.lock().unwrap();
        let (messages, options) = &seen[0];
        assert_eq!(messages[0].role, "system");
        assert!(messages[0].content.contains("Work Experience"));
        assert!(messages[1].content.contains("Jane Doe, Rust engineer"));
        assert!(options.json_mode);
        assert!((options.temperature - 0.2).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_analyze_rejects_blank_resume() {
        let llm = Arc::new(CannedCompleter::replying("{}"));
        let analyzer = ResumeAnalyzer::new(llm.clone(), config());
        let err = analyzer.analyze("  ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(llm.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let analyzer = ResumeAnalyzer::new(Arc::new(CannedCompleter::failing()), config());
        let err = analyzer.analyze("resume").await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }

    #[tokio::test]
    async fn test_bad_model_output_is_not_an_error() {
        let analyzer =
            ResumeAnalyzer::new(Arc::new(CannedCompleter::replying("Sorry, I can't.")), config());
        let processed = analyzer.analyze("resume").await.unwrap();
        assert_eq!(processed.stage, AnalysisStage::Default);
    }
}
