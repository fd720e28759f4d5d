//! Identifier types for stored documents.
//!
//! `ObjectId` is the canonical binary identifier of a document. Unlike most
//! id types its default is the *zero* id, because "not yet assigned" is a
//! meaningful state the injection engine tests for.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Binary identifier of a stored document.
///
/// The nil UUID is the unassigned id; [`ObjectId::new`] hands out v7
/// UUIDs, so ids assigned later sort after earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(Uuid);

impl ObjectId {
    /// The zero id, meaning "not assigned yet".
    pub const ZERO: Self = Self(Uuid::nil());

    /// Creates a fresh id with the current timestamp.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates an id from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Returns true if this is the zero id.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_nil()
    }

    /// Parses an id from its hyphenated string form.
    pub fn parse(s: &str) -> crate::Result<Self> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ObjectId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Generates a random unique string id (UUID v4, hyphenated).
///
/// Used for records that keep their identifier as plain text.
#[must_use]
pub fn unique_string() -> String {
    Uuid::new_v4().to_string()
}
