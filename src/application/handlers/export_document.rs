//! ExportDocumentHandler - turns a successful draft into downloadable files.
//!
//! Flat text is always produced. Paginated output is added when the export
//! service is available; when it is not, the bundle simply has no PDF.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::document::RenderedDocument;
use crate::domain::foundation::Timestamp;
use crate::domain::generation::GenerationResult;
use crate::domain::tools::ToolDefinition;
use crate::ports::{DocumentExportService, ExportError, ExportedDocument};

/// Files produced for one draft.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportBundle {
    pub document: RenderedDocument,
    pub text: ExportedDocument,
    /// `None` when no paginated renderer is available.
    pub paginated: Option<ExportedDocument>,
}

impl ExportBundle {
    /// Writes every file in the bundle into `dir`, creating it if needed.
    /// Returns the written paths, text first.
    pub fn write_to(&self, dir: &Path) -> std::io::Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;

        let mut written = Vec::new();
        for exported in std::iter::once(&self.text).chain(self.paginated.as_ref()) {
            let path = dir.join(&exported.filename);
            std::fs::write(&path, &exported.content)?;
            written.push(path);
        }
        Ok(written)
    }
}

/// Error type for document export.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExportDocumentError {
    /// Only successful results have content to export.
    #[error("Nothing to export: the draft did not succeed")]
    NotExportable,

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Handler for exporting drafts.
///
/// # Usage
///
/// ```rust,ignore
/// let handler = ExportDocumentHandler::new(paginated_export_service(geometry));
/// let bundle = handler.handle(&tool, &outcome.result)?;
/// bundle.write_to(Path::new("out"))?;
/// ```
pub struct ExportDocumentHandler {
    paginated: Arc<dyn DocumentExportService>,
}

impl ExportDocumentHandler {
    pub fn new(paginated: Arc<dyn DocumentExportService>) -> Self {
        Self { paginated }
    }

    /// Exports `result` with filenames stamped with the current time.
    pub fn handle(
        &self,
        tool: &ToolDefinition,
        result: &GenerationResult,
    ) -> Result<ExportBundle, ExportDocumentError> {
        self.handle_at(tool, result, Timestamp::now())
    }

    /// Exports `result` with filenames stamped with `at`.
    ///
    /// Filenames are `<tool-slug>-<YYYYMMDD-HHMMSS>.<ext>`.
    pub fn handle_at(
        &self,
        tool: &ToolDefinition,
        result: &GenerationResult,
        at: Timestamp,
    ) -> Result<ExportBundle, ExportDocumentError> {
        let document = RenderedDocument::from_result(tool.name(), result)
            .ok_or(ExportDocumentError::NotExportable)?;
        let base_filename = format!("{}-{}", tool.slug(), at.file_stamp());

        let text = ExportedDocument::from_text(document.to_flat_text(), &base_filename);

        let paginated = if self.paginated.is_available() {
            let bytes = self.paginated.to_paginated(&document)?;
            Some(ExportedDocument::new(
                bytes,
                self.paginated.format(),
                &base_filename,
            ))
        } else {
            tracing::info!(format = %self.paginated.format(), "paginated export unavailable, skipping");
            None
        };

        tracing::info!(
            sections = document.sections.len(),
            paginated = paginated.is_some(),
            "document exported"
        );

        Ok(ExportBundle {
            document,
            text,
            paginated,
        })
    }
}
