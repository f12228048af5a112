pub mod storage_error;

pub use storage_error::StorageError;

/// Top-level error type for the Attest workspace.
///
/// Expected absences — retracting an unknown event, querying an unknown
/// concept — are NOT errors: those paths return typed no-op results or
/// `Option`. Errors are reserved for malformed input at the boundary and
/// for infrastructure failures.
#[derive(Debug, thiserror::Error)]
pub enum TrustError {
    /// Malformed input rejected at the boundary, never silently coerced.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Recording evidence against a concept the graph does not contain.
    #[error("unknown concept '{concept_id}'")]
    UnknownConcept { concept_id: String },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Workspace-wide result alias.
pub type TrustResult<T> = Result<T, TrustError>;
