use serde::{Deserialize, Serialize};
use std::fmt;

/// The four derived trust levels for a (person, concept) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustLevel {
    /// No usable evidence yet.
    Untested,
    /// At least one direct success-class event and no unresolved failures.
    Verified,
    /// Trust arrived only via propagation from connected concepts.
    Inferred,
    /// Confirming and disconfirming evidence coexist.
    Contested,
}

impl TrustLevel {
    pub const COUNT: usize = 4;

    pub const ALL: [TrustLevel; 4] = [
        Self::Untested,
        Self::Verified,
        Self::Inferred,
        Self::Contested,
    ];

    /// Whether this level was ever backed by positive evidence,
    /// direct or propagated.
    pub fn has_positive_evidence(self) -> bool {
        matches!(self, Self::Verified | Self::Inferred)
    }
}

impl Default for TrustLevel {
    fn default() -> Self {
        Self::Untested
    }
}

impl fmt::Display for TrustLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Untested => "untested",
            Self::Verified => "verified",
            Self::Inferred => "inferred",
            Self::Contested => "contested",
        };
        write!(f, "{s}")
    }
}
