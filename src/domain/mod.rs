//! Domain layer containing the drafting rules and value types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (request IDs, timestamps)
//! - `safety` - Content classifier gating what may reach the backend
//! - `tools` - Drafting tool definitions and the static registry
//! - `generation` - Request assembly, response recovery and results
//! - `document` - Rendering results for text and paginated export

pub mod document;
pub mod foundation;
pub mod generation;
pub mod safety;
pub mod tools;
