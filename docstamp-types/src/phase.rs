//! Operation phases of a document store.
//!
//! The persistence layer classifies every command it issues and reports the
//! phase it is in. The injection engine only acts on the `Before*` write
//! phases; the rest exist so callers can route every lifecycle point through
//! one entry point.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A lifecycle point around a store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    BeforeInsert,
    AfterInsert,
    BeforeUpdate,
    AfterUpdate,
    BeforeReplace,
    AfterReplace,
    BeforeUpsert,
    AfterUpsert,
    BeforeRemove,
    AfterRemove,
    BeforeQuery,
    AfterQuery,
}

impl Phase {
    /// Every phase, in lifecycle order.
    pub const ALL: [Phase; 12] = [
        Phase::BeforeInsert,
        Phase::AfterInsert,
        Phase::BeforeUpdate,
        Phase::AfterUpdate,
        Phase::BeforeReplace,
        Phase::AfterReplace,
        Phase::BeforeUpsert,
        Phase::AfterUpsert,
        Phase::BeforeRemove,
        Phase::AfterRemove,
        Phase::BeforeQuery,
        Phase::AfterQuery,
    ];

    /// Stable snake_case name, matching the serde form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Phase::BeforeInsert => "before_insert",
            Phase::AfterInsert => "after_insert",
            Phase::BeforeUpdate => "before_update",
            Phase::AfterUpdate => "after_update",
            Phase::BeforeReplace => "before_replace",
            Phase::AfterReplace => "after_replace",
            Phase::BeforeUpsert => "before_upsert",
            Phase::AfterUpsert => "after_upsert",
            Phase::BeforeRemove => "before_remove",
            Phase::AfterRemove => "after_remove",
            Phase::BeforeQuery => "before_query",
            Phase::AfterQuery => "after_query",
        }
    }

    /// Returns true for phases that run before the store command is issued.
    #[must_use]
    pub const fn is_before(&self) -> bool {
        matches!(
            self,
            Phase::BeforeInsert
                | Phase::BeforeUpdate
                | Phase::BeforeReplace
                | Phase::BeforeUpsert
                | Phase::BeforeRemove
                | Phase::BeforeQuery
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::ALL
            .iter()
            .copied()
            .find(|phase| phase.as_str() == s)
            .ok_or_else(|| crate::Error::UnknownPhase(s.to_string()))
    }
}
