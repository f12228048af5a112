//! Scope resolution: the unit of cache invalidation is one concept or the
//! whole connected component around an anchor, for one person.

use std::collections::{BTreeSet, VecDeque};

use attest_core::constants::MAX_TRAVERSAL_DEPTH;
use attest_core::errors::TrustResult;
use attest_core::traits::ITrustStore;

/// What to project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Just the one concept.
    Concept(String),
    /// The full connected component (closure over incoming and outgoing
    /// edges) reachable from the anchor.
    Component(String),
}

impl Scope {
    pub fn anchor(&self) -> &str {
        match self {
            Self::Concept(id) | Self::Component(id) => id,
        }
    }
}

/// A resolved scope: the sorted member set and its content-derived key.
/// The key doubles as the checkpoint/invalidation key — same person, same
/// member set, same key, regardless of which member anchored the walk.
#[derive(Debug, Clone)]
pub struct ScopeMembers {
    pub key: String,
    pub person_id: String,
    pub concept_ids: Vec<String>,
}

impl ScopeMembers {
    fn new(person_id: &str, concept_ids: Vec<String>) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(person_id.as_bytes());
        for id in &concept_ids {
            hasher.update(&[0x1f]);
            hasher.update(id.as_bytes());
        }
        Self {
            key: hasher.finalize().to_hex().to_string(),
            person_id: person_id.to_string(),
            concept_ids,
        }
    }

    pub fn contains(&self, concept_id: &str) -> bool {
        self.concept_ids.binary_search_by(|c| c.as_str().cmp(concept_id)).is_ok()
    }
}

/// Resolve a scope against the stored graph.
pub fn resolve(
    store: &dyn ITrustStore,
    person_id: &str,
    scope: &Scope,
) -> TrustResult<ScopeMembers> {
    let members = match scope {
        Scope::Concept(id) => vec![id.clone()],
        Scope::Component(anchor) => connected_component(store, anchor)?,
    };
    Ok(ScopeMembers::new(person_id, members))
}

/// Undirected BFS closure over the edge set, depth-capped as a backstop.
fn connected_component(store: &dyn ITrustStore, anchor: &str) -> TrustResult<Vec<String>> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut queue: VecDeque<(String, usize)> = VecDeque::new();
    seen.insert(anchor.to_string());
    queue.push_back((anchor.to_string(), 0));

    while let Some((concept_id, depth)) = queue.pop_front() {
        if depth >= MAX_TRAVERSAL_DEPTH {
            continue;
        }
        for edge in store.edges_from(&concept_id)? {
            if seen.insert(edge.to.clone()) {
                queue.push_back((edge.to, depth + 1));
            }
        }
        for edge in store.edges_to(&concept_id)? {
            if seen.insert(edge.from.clone()) {
                queue.push_back((edge.from, depth + 1));
            }
        }
    }

    Ok(seen.into_iter().collect())
}
