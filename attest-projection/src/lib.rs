//! # attest-projection
//!
//! The caching/consistency core. A scope's trust states are a materialized
//! view over the event log; this crate decides when that view can be served
//! (versioned invalidation keys, enumerated stale reasons) and rebuilds it
//! deterministically when it cannot. Rebuilds are all-or-nothing: readers
//! never observe a partially-updated scope.

pub mod freshness;
pub mod projector;
pub mod scope;

pub use freshness::check_freshness;
pub use projector::{ensure_fresh, project_scope};
pub use scope::{resolve, Scope, ScopeMembers};
