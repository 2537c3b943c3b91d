//! Application layer - commands and handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    DraftDocumentCommand, DraftDocumentHandler, DraftDocumentResult, ExportBundle,
    ExportDocumentError, ExportDocumentHandler,
};
