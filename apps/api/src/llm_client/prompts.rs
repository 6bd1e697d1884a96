// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction that keeps extraction grounded in the submitted document.
pub const GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: Extract only what the resume actually states. \
    Do NOT infer, interpolate, or invent employers, dates, grades or technologies. \
    When a section is absent, return an empty list for it and say so in its summary.";
