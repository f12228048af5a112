//! # attest-scoring
//!
//! Pure function from a concept's direct verification history (plus the
//! prior state, for the failure-downgrade rule) to a trust level and
//! confidence. No storage, no clocks: replayable and deterministic.

pub mod partition;
pub mod score;

pub use partition::Partitioned;
pub use score::{score_history, ScoredTrust};
