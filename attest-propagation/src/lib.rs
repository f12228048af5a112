//! # attest-propagation
//!
//! Ripple effects: one verification event at a source concept produces
//! attenuated confidence deltas at every reachable concept in scope.
//! Five fixed rules, applied by an iterative work-queue walk over an owned
//! accumulator map — propagated trust can never masquerade as direct.

pub mod graph;
pub mod signal;
pub mod walk;

pub use graph::{EdgeWeight, ScopeGraph};
pub use signal::{base_signal, Signal, SignalKind};
pub use walk::propagate;
