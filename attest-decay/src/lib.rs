//! # attest-decay
//!
//! Time-based confidence decay. Pure: nothing here reads a clock or a
//! store, so decay is always applied at read time and never persisted.

pub mod engine;
pub mod formula;
pub mod half_life;

pub use engine::DecayEngine;
pub use formula::{compute, DecayInput};
pub use half_life::effective_half_life;
