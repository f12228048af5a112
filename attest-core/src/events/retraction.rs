use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::TrustError;

/// Which log a retraction targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Verification,
    Claim,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Verification => "verification",
            Self::Claim => "claim",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = TrustError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "verification" => Ok(Self::Verification),
            "claim" => Ok(Self::Claim),
            other => Err(TrustError::InvalidInput {
                message: format!("unknown event kind '{other}' (expected 'verification' or 'claim')"),
            }),
        }
    }
}

/// Audit record written alongside the retracted-flag flip. The original
/// event stays in the log forever.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetractionRecord {
    pub event_id: String,
    pub event_kind: EventKind,
    pub reason: String,
    pub retracted_by: String,
    pub timestamp: DateTime<Utc>,
}
