//! Error types for effort scoring.
//!
//! Provider failures are kept as their own type so the aggregator can
//! surface them verbatim instead of translating them.

use thiserror::Error;

/// Failures raised by a score provider while querying the analysis graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("File not found in analysis graph: {0}")]
    FileNotFound(String),

    #[error("Classification '{classification}' referenced by file '{file}' not found")]
    ClassificationNotFound { file: String, classification: String },

    #[error("Effort overflow while scoring file '{0}'")]
    Overflow(String),
}

/// Failures raised while building an analysis graph from a snapshot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Duplicate file id in snapshot: {0}")]
    DuplicateFile(String),

    #[error("Duplicate classification id in snapshot: {0}")]
    DuplicateClassification(String),

    #[error("Hint '{hint}' points at unknown file '{file}'")]
    DanglingHint { hint: String, file: String },
}

/// Errors surfaced by the aggregator and the template adapter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EffortError {
    #[error("Error, method {method} expects one argument (FileUnit), got {actual}")]
    InvalidArgumentCount { method: String, actual: usize },

    #[error("Error, method {method} expects a FileUnit argument, got {found}")]
    InvalidArgumentType { method: String, found: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unknown template method: {0}")]
    UnknownMethod(String),

    #[error("Template method {method} returned {found}, expected a number")]
    UnexpectedReturn { method: String, found: String },

    #[error("Effort overflow while summing contributions for '{0}'")]
    Overflow(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

pub type Result<T> = std::result::Result<T, EffortError>;
