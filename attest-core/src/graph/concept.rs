use serde::{Deserialize, Serialize};

/// A node in the concept graph. Immutable once loaded: domain packs may add
/// concepts, but changing an existing id's relationships requires a graph
/// version bump.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptNode {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl ConceptNode {
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

impl PartialEq for ConceptNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
