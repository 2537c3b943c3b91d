//! Document adapters - implementations of the export port.
//!
//! - `PdfExportService` - A4 PDF via `printpdf` (feature `pdf`, on by default)
//! - `UnavailableExportService` - placeholder when no renderer is compiled in

#[cfg(feature = "pdf")]
mod pdf_export_service;
mod unavailable_export_service;

#[cfg(feature = "pdf")]
pub use pdf_export_service::PdfExportService;
pub use unavailable_export_service::UnavailableExportService;

use std::sync::Arc;

use crate::domain::document::PageGeometry;
use crate::ports::DocumentExportService;

/// The best paginated exporter this build offers.
#[cfg(feature = "pdf")]
pub fn paginated_export_service(geometry: PageGeometry) -> Arc<dyn DocumentExportService> {
    Arc::new(PdfExportService::new(geometry))
}

/// The best paginated exporter this build offers.
#[cfg(not(feature = "pdf"))]
pub fn paginated_export_service(_geometry: PageGeometry) -> Arc<dyn DocumentExportService> {
    Arc::new(UnavailableExportService)
}
