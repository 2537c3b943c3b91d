//! Document Export Service Port - paginated rendering interface.
//!
//! Flat text is produced in the domain (`RenderedDocument::to_flat_text`).
//! Paginated output needs a rendering backend, so it sits behind this port;
//! builds without one use an adapter that reports itself unavailable.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::document::RenderedDocument;

/// Port for rendering a document into a paginated format.
///
/// # Contract
///
/// Implementations must:
/// - Produce a complete, self-contained file (not a fragment)
/// - Render every section in order, breaking pages as needed
/// - Report `is_available() == false` instead of failing when the backend
///   is compiled out
///
/// # Usage
///
/// ```rust,ignore
/// let service: &dyn DocumentExportService = get_service();
/// if service.is_available() {
///     let bytes = service.to_paginated(&document)?;
/// }
/// ```
pub trait DocumentExportService: Send + Sync {
    /// Format this service produces.
    fn format(&self) -> ExportFormat;

    /// Renders `document` into paginated bytes.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if the backend is unavailable or rendering fails.
    fn to_paginated(&self, document: &RenderedDocument) -> Result<Vec<u8>, ExportError>;

    /// Whether the rendering backend is present in this build.
    fn is_available(&self) -> bool;
}

/// Export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Flat UTF-8 text.
    Text,
    /// PDF document.
    Pdf,
}

impl ExportFormat {
    /// MIME content type for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Text => "text/plain; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
        }
    }

    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Text => write!(f, "text"),
            ExportFormat::Pdf => write!(f, "pdf"),
        }
    }
}

/// Exported document with content and metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub content: Vec<u8>,
    pub content_type: String,
    /// Suggested filename, including extension.
    pub filename: String,
    pub format: ExportFormat,
}

impl ExportedDocument {
    pub fn new(content: Vec<u8>, format: ExportFormat, base_filename: &str) -> Self {
        Self {
            content,
            content_type: format.content_type().to_string(),
            filename: format!("{}.{}", base_filename, format.extension()),
            format,
        }
    }

    pub fn from_text(text: String, base_filename: &str) -> Self {
        Self::new(text.into_bytes(), ExportFormat::Text, base_filename)
    }
}

/// Errors that can occur during document export.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// The rendering backend is not compiled into this build.
    #[error("Export service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("PDF conversion failed: {0}")]
    PdfConversionFailed(String),

    /// Page geometry leaves no room for text.
    #[error("Invalid page layout: {0}")]
    InvalidLayout(String),
}

impl ExportError {
    pub fn service_unavailable(reason: impl Into<String>) -> Self {
        Self::ServiceUnavailable(reason.into())
    }

    pub fn pdf_failed(reason: impl Into<String>) -> Self {
        Self::PdfConversionFailed(reason.into())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
