use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};

use attest_core::graph::{ConceptEdge, EdgeType};

/// Edge payload inside a scope graph.
#[derive(Debug, Clone, Copy)]
pub struct EdgeWeight {
    pub edge_type: EdgeType,
    pub inference_strength: f64,
}

/// A petgraph view of one scope's concepts, with an id → index map so walks
/// never chase strings. Built once per projection, discarded after.
pub struct ScopeGraph {
    pub graph: DiGraph<String, EdgeWeight>,
    index: HashMap<String, NodeIndex>,
}

impl ScopeGraph {
    /// Build from the scope's member concepts and the edges between them.
    /// Edges reaching outside the member set are dropped: propagation never
    /// escapes its scope.
    pub fn build(concept_ids: &[String], edges: &[ConceptEdge]) -> Self {
        let mut graph = DiGraph::with_capacity(concept_ids.len(), edges.len());
        let mut index = HashMap::with_capacity(concept_ids.len());

        for id in concept_ids {
            if !index.contains_key(id) {
                let idx = graph.add_node(id.clone());
                index.insert(id.clone(), idx);
            }
        }

        for edge in edges {
            if let (Some(&from), Some(&to)) = (index.get(&edge.from), index.get(&edge.to)) {
                graph.add_edge(
                    from,
                    to,
                    EdgeWeight {
                        edge_type: edge.edge_type,
                        inference_strength: edge.inference_strength,
                    },
                );
            }
        }

        Self { graph, index }
    }

    pub fn node(&self, concept_id: &str) -> Option<NodeIndex> {
        self.index.get(concept_id).copied()
    }

    pub fn concept_id(&self, idx: NodeIndex) -> &str {
        &self.graph[idx]
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }
}
