//! Drafting tools - definitions and the static registry.

mod registry;
mod tool_definition;

pub use registry::{
    all_tools, find_tool, tools_in_group, CONGRESS_INSIGHTS_SUMMARY,
    MEDICAL_INFORMATION_RESPONSE, MSL_BRIEFING_PACK, SCIENTIFIC_NARRATIVE,
};
pub use tool_definition::ToolDefinition;
