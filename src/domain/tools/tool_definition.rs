//! Tool definition - fixed instructions and output contract for a drafting tool.

use serde::Serialize;

/// A drafting tool the generation backend can be asked to run.
///
/// Definitions live in a static table and are never mutated, so every field is
/// a `&'static str`.
///
/// # Examples
///
/// ```
/// use powerdash_medical::domain::tools::ToolDefinition;
///
/// const SUMMARY: ToolDefinition = ToolDefinition::new(
///     "Congress Summary",
///     "Summarise the congress session conservatively.",
///     r#"{ "summary": "string" }"#,
/// );
///
/// assert_eq!(SUMMARY.slug(), "congress-summary");
/// assert!(SUMMARY.group().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolDefinition {
    /// Display name (e.g., "Scientific Narrative Generator")
    name: &'static str,

    /// Task guidance handed to the backend verbatim
    instructions: &'static str,

    /// Textual description of the required output keys and shape
    output_schema: &'static str,

    /// Optional grouping tag for navigation
    group: Option<&'static str>,
}

impl ToolDefinition {
    /// Creates an ungrouped tool definition.
    pub const fn new(
        name: &'static str,
        instructions: &'static str,
        output_schema: &'static str,
    ) -> Self {
        Self {
            name,
            instructions,
            output_schema,
            group: None,
        }
    }

    /// Sets the grouping tag.
    pub const fn in_group(mut self, group: &'static str) -> Self {
        self.group = Some(group);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn instructions(&self) -> &'static str {
        self.instructions
    }

    pub fn output_schema(&self) -> &'static str {
        self.output_schema
    }

    pub fn group(&self) -> Option<&'static str> {
        self.group
    }

    /// Lowercase, hyphen-separated form of the name, used for CLI lookup
    /// and export filenames.
    pub fn slug(&self) -> String {
        self.name
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|part| !part.is_empty())
            .map(|part| part.to_ascii_lowercase())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// True when `query` names this tool, by display name or slug, ignoring case.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        self.name.eq_ignore_ascii_case(query) || self.slug().eq_ignore_ascii_case(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: ToolDefinition =
        ToolDefinition::new("MSL Briefing Pack", "Brief the MSL.", "{}").in_group("Field Medical");

    #[test]
    fn const_construction_keeps_fields() {
        assert_eq!(SAMPLE.name(), "MSL Briefing Pack");
        assert_eq!(SAMPLE.instructions(), "Brief the MSL.");
        assert_eq!(SAMPLE.output_schema(), "{}");
        assert_eq!(SAMPLE.group(), Some("Field Medical"));
    }

    #[test]
    fn slug_collapses_separators() {
        let def = ToolDefinition::new("Q&A  /  Objection Handler", "", "");
        assert_eq!(def.slug(), "q-a-objection-handler");
        assert_eq!(SAMPLE.slug(), "msl-briefing-pack");
    }

    #[test]
    fn matches_name_or_slug_case_insensitively() {
        assert!(SAMPLE.matches("msl briefing pack"));
        assert!(SAMPLE.matches("MSL-BRIEFING-PACK"));
        assert!(SAMPLE.matches("  msl-briefing-pack "));
        assert!(!SAMPLE.matches("briefing"));
    }
}
