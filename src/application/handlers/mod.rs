//! Application handlers.
//!
//! Command handlers that orchestrate domain operations over the ports.

mod draft_document;
mod export_document;

pub use draft_document::{DraftDocumentCommand, DraftDocumentHandler, DraftDocumentResult};
pub use export_document::{ExportBundle, ExportDocumentError, ExportDocumentHandler};
