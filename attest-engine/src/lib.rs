//! # attest-engine
//!
//! The facade over the evidentiary core: validated event intake, per-scope
//! write serialization, self-healing projection reads, retraction, and the
//! calibration audit.

pub mod engine;
pub mod inputs;
pub mod locks;

pub use engine::TrustEngine;
pub use inputs::{RecordClaim, RecordVerification, RetractEvent};
pub use locks::ScopeLocks;
