//! Stand-in used when the build carries no paginated renderer.

use crate::domain::document::RenderedDocument;
use crate::ports::{DocumentExportService, ExportError, ExportFormat};

/// Always reports itself unavailable; callers skip paginated export.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableExportService;

impl DocumentExportService for UnavailableExportService {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn to_paginated(&self, _document: &RenderedDocument) -> Result<Vec<u8>, ExportError> {
        Err(ExportError::service_unavailable(
            "built without the `pdf` feature",
        ))
    }

    fn is_available(&self) -> bool {
        false
    }
}
