//! Core type definitions for docstamp.
//!
//! This crate defines the collaborator types the field injection engine
//! consumes from the surrounding persistence layer:
//! - Object identifiers (UUID v7) and random unique string ids
//! - Epoch-millisecond timestamps and the clocks that produce them
//! - Operation phases of a document store write/read lifecycle
//! - The per-call actor context holding the acting user's identity
//!
//! Nothing in here knows about records or fields; that lives in
//! `docstamp-field`.

mod context;
mod ids;
mod phase;
mod timestamp;

pub use context::ActorContext;
pub use ids::{ObjectId, unique_string};
pub use phase::Phase;
pub use timestamp::{Clock, ManualClock, SystemClock, Timestamp};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid object id: {0}")]
    InvalidObjectId(#[from] uuid::Error),

    #[error("unknown operation phase: {0}")]
    UnknownPhase(String),
}
