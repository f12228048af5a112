use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::TrustError;

/// The three typed relationships between concepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    /// `from` must be understood before `to`.
    Prerequisite,
    /// `from` is a part of `to`.
    ComponentOf,
    /// Loose association.
    RelatedTo,
}

impl EdgeType {
    pub const COUNT: usize = 3;

    pub const ALL: [EdgeType; 3] = [Self::Prerequisite, Self::ComponentOf, Self::RelatedTo];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prerequisite => "prerequisite",
            Self::ComponentOf => "component_of",
            Self::RelatedTo => "related_to",
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EdgeType {
    type Err = TrustError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prerequisite" => Ok(Self::Prerequisite),
            "component_of" => Ok(Self::ComponentOf),
            "related_to" => Ok(Self::RelatedTo),
            other => Err(TrustError::InvalidInput {
                message: format!(
                    "unknown edge type '{other}' \
                     (expected 'prerequisite', 'component_of', or 'related_to')"
                ),
            }),
        }
    }
}

/// A directed, weighted edge in the concept graph. Propagation flows only
/// along outgoing edges from a verified or changed node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptEdge {
    pub id: String,
    pub from: String,
    pub to: String,
    pub edge_type: EdgeType,
    /// How strongly trust in `from` implies trust in `to`, in (0, 1].
    pub inference_strength: f64,
}

impl ConceptEdge {
    pub fn new(from: &str, to: &str, edge_type: EdgeType, inference_strength: f64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            from: from.to_string(),
            to: to.to_string(),
            edge_type,
            // Zero-strength edges carry no inference; floor just above it.
            inference_strength: inference_strength.clamp(f64::EPSILON, 1.0),
        }
    }
}

impl PartialEq for ConceptEdge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
