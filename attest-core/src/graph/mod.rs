pub mod concept;
pub mod edge;

pub use concept::ConceptNode;
pub use edge::{ConceptEdge, EdgeType};
