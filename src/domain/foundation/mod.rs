//! Foundation module - shared domain primitives.

mod ids;
mod timestamp;

pub use ids::RequestId;
pub use timestamp::Timestamp;
