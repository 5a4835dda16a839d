//! Error types for ModelCascade
//!
//! Centralized error handling using thiserror. Only setup problems are errors;
//! a failed pull is an outcome, not an error.

use std::path::PathBuf;

use thiserror::Error;

/// All error types that can occur in ModelCascade
#[derive(Debug, Error)]
pub enum CascadeError {
    /// The item source produced nothing at all
    #[error("No models provided")]
    NoItems,

    /// Every candidate name was rejected by validation
    #[error("No valid models to pull")]
    NoValidItems,

    /// The interactive input-method menu got an unknown answer
    #[error("Invalid choice: {0:?} (expected 1 or 2)")]
    InvalidChoice(String),

    /// Configuration values that cannot drive a run
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A model list file could not be read
    #[error("Cannot read model file {path}: {source}")]
    ItemFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML config parse error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for ModelCascade operations
pub type Result<T> = std::result::Result<T, CascadeError>;
