//! # attest-core
//!
//! Foundation crate for the Attest trust system.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod graph;
pub mod models;
pub mod traits;
pub mod trust;

// Re-export the most commonly used types at the crate root.
pub use config::AttestConfig;
pub use errors::{TrustError, TrustResult};
pub use events::{ClaimEvent, EventSource, Modality, VerificationEvent, VerificationResult};
pub use graph::{ConceptEdge, ConceptNode, EdgeType};
pub use trust::{Confidence, TrustLevel, TrustSnapshot, TrustState, VersionStamp};
