// Resume Analysis
// Implements: LLM call, output extraction, parsing, schema validation, repair,
// default fallback, grade derivation and the display report.
// All LLM calls go through llm_client — no direct OpenAI calls here.

pub mod analyzer;
pub mod comment;
pub mod defaults;
pub mod extractor;
pub mod grades;
pub mod handlers;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod prompts;
pub mod repair;
pub mod report;
pub mod schema;
