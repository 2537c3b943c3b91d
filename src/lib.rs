//! PowerDash Medical - safety-gated structured drafting for Medical Affairs.
//!
//! Free text from a drafting form is screened for adverse-event and
//! patient-identifiable content, sent to a generation backend with a strict
//! output contract, recovered into ordered fields and exported as text or PDF.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
