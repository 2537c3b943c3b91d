//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Structured-generation backend
//! - `DocumentExportService` - Paginated document rendering

mod ai_provider;
mod document_export_service;

pub use ai_provider::{AIError, AIProvider, CompletionResponse, ExtractionTier, ProviderInfo};
pub use document_export_service::{
    DocumentExportService, ExportError, ExportFormat, ExportedDocument,
};
