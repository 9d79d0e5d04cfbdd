//! Error types for risk engine

use thiserror::Error;

/// Risk engine error
#[derive(Debug, Error)]
pub enum Error {
    /// Feature vector rejected before scoring
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Classifier failed or produced an unusable probability
    #[error("Classifier error: {0}")]
    Classifier(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
