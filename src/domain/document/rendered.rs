//! Rendered document - the export-neutral form of a successful result.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::generation::GenerationResult;

/// One heading/body pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub heading: String,
    pub body: String,
}

/// A titled, ordered list of sections. Every export format serializes this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDocument {
    pub title: String,
    pub sections: Vec<Section>,
}

impl RenderedDocument {
    /// Renders structured fields, keeping their original order.
    ///
    /// Keys become humanized headings. Strings, numbers and booleans are
    /// stringified directly, `null` becomes an empty body, and arrays or
    /// objects are pretty-printed with two-space indentation.
    pub fn render(title: impl Into<String>, fields: &Map<String, Value>) -> Self {
        let sections = fields
            .iter()
            .map(|(key, value)| Section {
                heading: humanize_key(key),
                body: render_value(value),
            })
            .collect();

        Self {
            title: title.into(),
            sections,
        }
    }

    /// Renders a result if, and only if, it is a success.
    pub fn from_result(title: impl Into<String>, result: &GenerationResult) -> Option<Self> {
        result.fields().map(|fields| Self::render(title, fields))
    }

    /// Plain-text export: title, `=` underline, then each heading with a `-`
    /// underline followed by its body. Sections are separated by a blank line.
    pub fn to_flat_text(&self) -> String {
        let mut lines = vec![
            self.title.clone(),
            underline(&self.title, '='),
            String::new(),
        ];

        for section in &self.sections {
            lines.push(section.heading.clone());
            lines.push(underline(&section.heading, '-'));
            lines.push(section.body.clone());
            lines.push(String::new());
        }

        lines.join("\n")
    }
}

/// Turns a schema key into a heading: separators become spaces and each word
/// is capitalised (`disease_state_overview` -> `Disease State Overview`).
pub fn humanize_key(key: &str) -> String {
    let heading = key
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(capitalise)
        .collect::<Vec<_>>()
        .join(" ");

    if heading.is_empty() {
        key.to_string()
    } else {
        heading
    }
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
    }
}

fn underline(text: &str, mark: char) -> String {
    std::iter::repeat(mark).take(text.chars().count()).collect()
}
