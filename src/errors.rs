// File: src/errors.rs
use thiserror::Error;

/// Result type used throughout the crate, defaulting to [`LexiconError`].
pub type Result<T, E = LexiconError> = std::result::Result<T, E>;

/// Errors raised while summarizing, pruning, converting or storing a lexicon.
///
/// `InvalidInput` and `InvalidState` come from the in-memory computations.
/// Every other variant is an I/O failure at a load/store boundary.
#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("binary (de)serialization failed: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("JSON (de)serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not persist temporary file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl LexiconError {
    /// Whether this error came from a load/store boundary rather than the computation itself.
    pub fn is_io_failure(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::Serialization(_) | Self::Json(_) | Self::Persist(_)
        )
    }
}
