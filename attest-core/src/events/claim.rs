use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A self-reported confidence statement. Claims never move trust levels;
/// they only feed the calibration gap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimEvent {
    /// UUID v4 identifier.
    pub id: String,
    pub person_id: String,
    pub concept_id: String,
    /// Self-reported confidence, clamped to [0, 1] at the boundary.
    pub self_reported_confidence: f64,
    pub context: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub retracted: bool,
}

impl ClaimEvent {
    pub fn new(
        person_id: &str,
        concept_id: &str,
        self_reported_confidence: f64,
        context: &str,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            person_id: person_id.to_string(),
            concept_id: concept_id.to_string(),
            self_reported_confidence: self_reported_confidence.clamp(0.0, 1.0),
            context: context.to_string(),
            timestamp,
            retracted: false,
        }
    }
}

impl PartialEq for ClaimEvent {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
