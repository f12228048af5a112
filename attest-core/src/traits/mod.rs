pub mod llm;
pub mod store;

pub use llm::{Completion, LlmMessage, LlmProvider};
pub use store::ITrustStore;
