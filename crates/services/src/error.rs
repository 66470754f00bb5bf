//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::SessionError;

/// Errors emitted while loading a question set.
///
/// All of these are fatal to session start; there is no automatic retry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("unknown category: {slug}")]
    UnknownCategory { slug: String },
    #[error("question resource request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("malformed question resource: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Per-URL prefetch failures. Logged only: never surfaced, never retried,
/// never allowed to block navigation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PrefetchError {
    #[error("image request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors resolving a session configuration into a mode.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("unknown mode: {0}")]
    UnknownMode(String),
    #[error("category mode requires a category slug")]
    MissingCategory,
    #[error("unknown exam type: {0}")]
    UnknownExamType(String),
}

/// Errors emitted when starting a session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StartError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
