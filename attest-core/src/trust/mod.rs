pub mod confidence;
pub mod level;
pub mod state;

pub use confidence::Confidence;
pub use level::TrustLevel;
pub use state::{TrustSnapshot, TrustState, VersionStamp};
