//! # attest-calibration
//!
//! Read-only diagnostics over a person's trust states: how well the
//! system's confidence predicted actual outcomes, where it is going stale,
//! and how honest the person's self-reports are.

pub mod auditor;
pub mod prediction;
pub mod recommendation;

pub use auditor::CalibrationAuditor;
pub use prediction::{evaluate, PredictionOutcome};
