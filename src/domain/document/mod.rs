//! Document rendering and layout.
//!
//! A successful [`GenerationResult`](crate::domain::generation::GenerationResult)
//! is rendered once into a [`RenderedDocument`]; the flat-text and paginated
//! exports both derive from it.

mod layout;
mod rendered;

pub use layout::{paginate, wrap_text, LineStyle, PageGeometry, PageLayout, PlacedLine};
pub use rendered::{humanize_key, RenderedDocument, Section};
