pub mod claim;
pub mod modality;
pub mod retraction;
pub mod verification;

pub use claim::ClaimEvent;
pub use modality::Modality;
pub use retraction::{EventKind, RetractionRecord};
pub use verification::{EventSource, VerificationEvent, VerificationResult};
