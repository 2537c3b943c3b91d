//! Prompt assembly - turns a tool definition and user text into a strict request.
//!
//! The system instructions are built in a fixed order: persona, absolute rules,
//! the tool's own instructions, then the tool's output schema. The backend must
//! see the rules before the task-specific contract.
//!
//! This module does not classify anything. The safety gate runs before it.

use super::GenerationRequest;
use crate::domain::tools::ToolDefinition;

/// Temperature used when the caller supplies a non-finite value.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

pub const PERSONA: &str = "You are PowerDash Medical, an internal Medical Affairs drafting \
assistant for the UK and Ireland. You produce draft material for qualified medical reviewers.";

pub const RULES: &str = "Absolute rules:
1. Respond with one valid JSON object only. No prose, no markdown fences, no commentary.
2. Never invent references, citations, study names or data.
3. Keep the tone scientific, balanced and non-promotional. This is drafting support only; medical review is required.
4. If the input contains an adverse event or patient-identifiable information, do not draft. Respond only with:
{\"blocked\": true, \"reason\": \"<what was found>\", \"next_step\": \"<what the user should change>\"}";

pub const CONFIDENTIAL_PREFACE: &str =
    "CONFIDENTIAL INTERNAL BRIEF (session-only; do not retain or reuse):";

/// Builds the generation request for `tool` over `user_text`.
///
/// `user_text` is inlined verbatim after the confidential preface. Temperature
/// is clamped into [0, 1].
pub fn build_request(
    tool: &ToolDefinition,
    user_text: &str,
    temperature: f32,
    model_id: &str,
) -> GenerationRequest {
    GenerationRequest {
        tool_name: tool.name().to_string(),
        system_instructions: system_instructions(tool),
        user_content: format!("{CONFIDENTIAL_PREFACE}\n\n{user_text}"),
        temperature: clamp_temperature(temperature),
        model_id: model_id.to_string(),
    }
}

fn system_instructions(tool: &ToolDefinition) -> String {
    format!(
        "{PERSONA}\n\n{RULES}\n\nTool: {name}\n\nInstructions:\n{instructions}\n\nOutput schema:\n{schema}",
        name = tool.name(),
        instructions = tool.instructions().trim(),
        schema = tool.output_schema(),
    )
}

fn clamp_temperature(temperature: f32) -> f32 {
    if temperature.is_finite() {
        temperature.clamp(0.0, 1.0)
    } else {
        DEFAULT_TEMPERATURE
    }
}
