//! Tool registry - the fixed table of drafting tools.
//!
//! Populated at compile time and read-only for the life of the process.

use super::ToolDefinition;

pub const SCIENTIFIC_NARRATIVE: ToolDefinition = ToolDefinition::new(
    "Scientific Narrative Generator",
    "Create a conservative scientific narrative from the brief. Stay within the \
     evidence supplied; where the brief is silent, say so rather than filling gaps.",
    r#"{
  "core_scientific_narrative": "string",
  "disease_state_overview": "string",
  "short_form_variants": {
    "msl_conversation": "string",
    "internal_training": "string",
    "congress_discussion": "string"
  }
}"#,
)
.in_group("Medical Strategy");

pub const MSL_BRIEFING_PACK: ToolDefinition = ToolDefinition::new(
    "MSL Briefing Pack",
    "Prepare a field medical briefing for Medical Science Liaisons. Summarise the \
     scientific context, list likely HCP questions with balanced, non-promotional \
     answers, and note where data are limited.",
    r#"{
  "briefing_summary": "string",
  "key_scientific_messages": ["string"],
  "anticipated_questions": [
    { "question": "string", "suggested_response": "string" }
  ],
  "data_limitations": "string"
}"#,
)
.in_group("Field Medical");

pub const MEDICAL_INFORMATION_RESPONSE: ToolDefinition = ToolDefinition::new(
    "Medical Information Response",
    "Draft a standard response to an unsolicited medical information enquiry. \
     Answer only the question asked, reference the supplied sources by name, and \
     flag any off-label aspect for medical review.",
    r#"{
  "enquiry_summary": "string",
  "response_body": "string",
  "references_cited": ["string"],
  "off_label_flag": "boolean",
  "reviewer_notes": "string"
}"#,
)
.in_group("Medical Information");

pub const CONGRESS_INSIGHTS_SUMMARY: ToolDefinition = ToolDefinition::new(
    "Congress Insights Summary",
    "Summarise congress notes into internal insights. Separate reported data from \
     commentary and keep competitor references factual.",
    r#"{
  "session_overview": "string",
  "key_data_presented": ["string"],
  "emerging_insights": ["string"],
  "follow_up_actions": ["string"]
}"#,
)
.in_group("Field Medical");

static TOOLS: [ToolDefinition; 4] = [
    SCIENTIFIC_NARRATIVE,
    MSL_BRIEFING_PACK,
    MEDICAL_INFORMATION_RESPONSE,
    CONGRESS_INSIGHTS_SUMMARY,
];

/// All registered tools, in navigation order.
pub fn all_tools() -> &'static [ToolDefinition] {
    &TOOLS
}

/// Looks a tool up by display name or slug, ignoring case.
pub fn find_tool(query: &str) -> Option<&'static ToolDefinition> {
    TOOLS.iter().find(|tool| tool.matches(query))
}

/// Tools carrying the given group tag, in navigation order.
pub fn tools_in_group(group: &str) -> Vec<&'static ToolDefinition> {
    TOOLS
        .iter()
        .filter(|tool| tool.group().is_some_and(|g| g.eq_ignore_ascii_case(group)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn registry_lists_tools_in_navigation_order() {
        let names: Vec<_> = all_tools().iter().map(|t| t.name()).collect();
        assert_eq!(names[0], "Scientific Narrative Generator");
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn tool_slugs_are_unique() {
        let slugs: HashSet<_> = all_tools().iter().map(|t| t.slug()).collect();
        assert_eq!(slugs.len(), all_tools().len());
    }

    #[test]
    fn find_tool_by_name_and_slug() {
        assert_eq!(
            find_tool("scientific narrative generator").map(|t| t.name()),
            Some("Scientific Narrative Generator")
        );
        assert_eq!(
            find_tool("msl-briefing-pack").map(|t| t.name()),
            Some("MSL Briefing Pack")
        );
        assert!(find_tool("unknown tool").is_none());
    }

    #[test]
    fn scientific_narrative_schema_names_expected_keys() {
        let schema = SCIENTIFIC_NARRATIVE.output_schema();
        for key in [
            "core_scientific_narrative",
            "disease_state_overview",
            "short_form_variants",
            "msl_conversation",
            "internal_training",
            "congress_discussion",
        ] {
            assert!(schema.contains(key), "schema missing {key}");
        }
    }

    #[test]
    fn every_schema_is_valid_json_object() {
        for tool in all_tools() {
            let parsed: serde_json::Value = serde_json::from_str(tool.output_schema())
                .unwrap_or_else(|e| panic!("{} schema: {e}", tool.name()));
            assert!(parsed.is_object());
        }
    }

    #[test]
    fn tools_in_group_filters_by_tag() {
        let field: Vec<_> = tools_in_group("field medical")
            .iter()
            .map(|t| t.name())
            .collect();
        assert_eq!(field, vec!["MSL Briefing Pack", "Congress Insights Summary"]);
        assert!(tools_in_group("Commercial").is_empty());
    }
}
