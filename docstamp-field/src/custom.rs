//! Role-to-field configuration for [`CustomFieldsHook`](crate::CustomFieldsHook).
//!
//! Names are plain strings resolved against the record's field table when
//! the type is bound; nothing is checked here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A bookkeeping role a field can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Id,
    CreateAt,
    CreateBy,
    UpdateAt,
    UpdateBy,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Id => "id",
            Role::CreateAt => "create_at",
            Role::CreateBy => "create_by",
            Role::UpdateAt => "update_at",
            Role::UpdateBy => "update_by",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field filled from the actor context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorField {
    /// Field name on the record.
    pub field: String,
    /// Key to read from the [`ActorContext`](docstamp_types::ActorContext).
    pub context_key: String,
}

/// Declares which fields of a record type play each bookkeeping role.
///
/// Names are not checked here; a name the record type does not declare is
/// simply never matched. An empty name leaves the role unset.
///
/// Serializes as a flat object so it can be kept in configuration:
/// `{"update_at": "modified", "update_by": {"field": "editor", "context_key": "user"}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    create_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    create_by: Option<ActorField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    update_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    update_by: Option<ActorField>,
}

impl CustomFields {
    /// Creates a configuration with no roles set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Field that receives the creation time (only when empty).
    #[must_use]
    pub fn set_create_at(mut self, field: impl Into<String>) -> Self {
        self.create_at = non_empty(field.into());
        self
    }

    /// Field that receives the creating actor, read from `context_key`.
    #[must_use]
    pub fn set_create_by(mut self, field: impl Into<String>, context_key: impl Into<String>) -> Self {
        self.create_by = actor_field(field.into(), context_key.into());
        self
    }

    /// Field that receives the update time (always refreshed).
    #[must_use]
    pub fn set_update_at(mut self, field: impl Into<String>) -> Self {
        self.update_at = non_empty(field.into());
        self
    }

    /// Field that receives the updating actor, read from `context_key`.
    #[must_use]
    pub fn set_update_by(mut self, field: impl Into<String>, context_key: impl Into<String>) -> Self {
        self.update_by = actor_field(field.into(), context_key.into());
        self
    }

    /// Field that receives a generated identifier (only when empty).
    #[must_use]
    pub fn set_id(mut self, field: impl Into<String>) -> Self {
        self.id = non_empty(field.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|name| !name.is_empty())
    }

    pub fn create_at(&self) -> Option<&str> {
        self.create_at.as_deref().filter(|name| !name.is_empty())
    }

    pub fn create_by(&self) -> Option<&ActorField> {
        self.create_by.as_ref().filter(|actor| !actor.field.is_empty())
    }

    pub fn update_at(&self) -> Option<&str> {
        self.update_at.as_deref().filter(|name| !name.is_empty())
    }

    pub fn update_by(&self) -> Option<&ActorField> {
        self.update_by.as_ref().filter(|actor| !actor.field.is_empty())
    }

    /// Configured `(role, field name)` pairs in create-dispatch order.
    pub fn roles(&self) -> Vec<(Role, &str)> {
        [
            (Role::Id, self.id()),
            (Role::CreateAt, self.create_at()),
            (Role::CreateBy, self.create_by().map(|actor| actor.field.as_str())),
            (Role::UpdateAt, self.update_at()),
            (Role::UpdateBy, self.update_by().map(|actor| actor.field.as_str())),
        ]
        .into_iter()
        .filter_map(|(role, name)| name.map(|name| (role, name)))
        .collect()
    }

    /// True when no role is configured.
    pub fn is_empty(&self) -> bool {
        self.roles().is_empty()
    }
}

fn non_empty(field: String) -> Option<String> {
    (!field.is_empty()).then_some(field)
}

fn actor_field(field: String, context_key: String) -> Option<ActorField> {
    non_empty(field).map(|field| ActorField { field, context_key })
}
