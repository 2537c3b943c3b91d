//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Generation backends (OpenAI, mock)
//! - `document` - Paginated export renderers

pub mod ai;
pub mod document;
