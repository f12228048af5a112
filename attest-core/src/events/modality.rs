use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::TrustError;

/// The twelve channels through which understanding can be tested.
///
/// Each modality carries a fixed evidentiary strength in [0.30, 0.95]:
/// a recall question proves far less than unprompted integrated use.
/// Adding, removing, or reweighting variants is a taxonomy change and
/// must bump the taxonomy version in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Modality {
    /// Answered a direct recall question.
    #[serde(rename = "grill:recall")]
    GrillRecall,
    /// Explained the concept in their own words.
    #[serde(rename = "grill:explain")]
    GrillExplain,
    /// Applied the concept to a posed problem.
    #[serde(rename = "grill:apply")]
    GrillApply,
    /// Transferred the concept to an unfamiliar domain.
    #[serde(rename = "grill:transfer")]
    GrillTransfer,
    /// Predicted the behavior of code before running it.
    #[serde(rename = "sandbox:trace")]
    SandboxTrace,
    /// Wrote and ran code exercising the concept.
    #[serde(rename = "sandbox:execute")]
    SandboxExecute,
    /// Diagnosed and fixed a seeded defect.
    #[serde(rename = "sandbox:debug")]
    SandboxDebug,
    /// Extended working code with new behavior.
    #[serde(rename = "sandbox:extend")]
    SandboxExtend,
    /// Reviewed an artifact and caught its issues.
    #[serde(rename = "review:artifact")]
    ReviewArtifact,
    /// Taught the concept to someone else.
    #[serde(rename = "integrated:teach")]
    IntegratedTeach,
    /// Authored production work observed to rely on the concept.
    #[serde(rename = "observed:authored")]
    ObservedAuthored,
    /// Used the concept naturally, unprompted, in real work.
    #[serde(rename = "integrated:use")]
    IntegratedUse,
}

impl Modality {
    pub const COUNT: usize = 12;

    pub const ALL: [Modality; 12] = [
        Self::GrillRecall,
        Self::GrillExplain,
        Self::GrillApply,
        Self::GrillTransfer,
        Self::SandboxTrace,
        Self::SandboxExecute,
        Self::SandboxDebug,
        Self::SandboxExtend,
        Self::ReviewArtifact,
        Self::IntegratedTeach,
        Self::ObservedAuthored,
        Self::IntegratedUse,
    ];

    /// Fixed evidentiary strength weight for this modality.
    pub fn strength(self) -> f64 {
        match self {
            Self::GrillRecall => 0.30,
            Self::GrillExplain => 0.45,
            Self::GrillApply => 0.55,
            Self::GrillTransfer => 0.70,
            Self::SandboxTrace => 0.50,
            Self::SandboxExecute => 0.75,
            Self::SandboxDebug => 0.80,
            Self::SandboxExtend => 0.85,
            Self::ReviewArtifact => 0.60,
            Self::IntegratedTeach => 0.85,
            Self::ObservedAuthored => 0.90,
            Self::IntegratedUse => 0.95,
        }
    }

    /// The wire string for this modality (e.g. `grill:recall`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GrillRecall => "grill:recall",
            Self::GrillExplain => "grill:explain",
            Self::GrillApply => "grill:apply",
            Self::GrillTransfer => "grill:transfer",
            Self::SandboxTrace => "sandbox:trace",
            Self::SandboxExecute => "sandbox:execute",
            Self::SandboxDebug => "sandbox:debug",
            Self::SandboxExtend => "sandbox:extend",
            Self::ReviewArtifact => "review:artifact",
            Self::IntegratedTeach => "integrated:teach",
            Self::ObservedAuthored => "observed:authored",
            Self::IntegratedUse => "integrated:use",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Modality {
    type Err = TrustError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| TrustError::InvalidInput {
                message: format!(
                    "unknown modality '{s}' (expected one of the {} taxonomy strings, \
                     e.g. 'grill:recall', 'integrated:use')",
                    Self::COUNT
                ),
            })
    }
}
