//! Error types for field injection.

use thiserror::Error;

/// Failures a dispatch can report back to the persistence layer.
///
/// Misconfiguration (unknown field names, unsupported field types, missing
/// actors) is never an error; it is skipped and surfaces only as a
/// [`Diagnostic`](crate::Diagnostic).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The actor context holds a non-string value under a configured key.
    #[error("actor context value for key `{key}` must be a string, found {found}")]
    ActorNotString { key: String, found: &'static str },
}

/// Result type for field injection.
pub type FieldResult<T> = Result<T, FieldError>;
