use docstamp_types::{ObjectId, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::binding::Binding;
use crate::custom::{CustomFields, Role};
use crate::locator::{FieldMut, FieldTable};

/// Field names used by the default hooks. Not configurable.
pub mod convention {
    pub const ID: &str = "id";
    pub const CREATE_AT: &str = "create_at";
    pub const UPDATE_AT: &str = "update_at";
}

/// A record type the engine can fill in.
///
/// `fields` lists the fields the engine may touch; `hooks` declares which
/// capabilities the type opts into. Both are read once per type and cached.
pub trait Document: Sized + 'static {
    fn fields() -> FieldTable<Self>;

    fn hooks() -> Hooks<Self> {
        Hooks::new()
    }
}

/// Convention-based defaults: `id`, `create_at` and `update_at`.
///
/// The provided methods act on the fields declared under the
/// [`convention`] names. Id and create time are only filled when empty;
/// update time is always refreshed. Override a method to take over a field.
pub trait DefaultFieldHook: Document {
    fn default_id(&mut self) {
        Binding::<Self>::cached().fill_convention(self, Role::Id, Timestamp::ZERO);
    }

    fn default_create_at(&mut self, now: Timestamp) {
        Binding::<Self>::cached().fill_convention(self, Role::CreateAt, now);
    }

    fn default_update_at(&mut self, now: Timestamp) {
        Binding::<Self>::cached().fill_convention(self, Role::UpdateAt, now);
    }
}

/// Configuration-driven fields, including actor propagation.
pub trait CustomFieldsHook: Document {
    fn custom_fields() -> CustomFields;
}

/// Which hook sets a record type runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    NoHooks,
    DefaultOnly,
    CustomOnly,
    Both,
}

impl Capability {
    #[must_use]
    pub const fn from_parts(default: bool, custom: bool) -> Self {
        match (default, custom) {
            (false, false) => Capability::NoHooks,
            (true, false) => Capability::DefaultOnly,
            (false, true) => Capability::CustomOnly,
            (true, true) => Capability::Both,
        }
    }

    #[must_use]
    pub const fn has_default(&self) -> bool {
        matches!(self, Capability::DefaultOnly | Capability::Both)
    }

    #[must_use]
    pub const fn has_custom(&self) -> bool {
        matches!(self, Capability::CustomOnly | Capability::Both)
    }
}

pub(crate) struct DefaultOps<T> {
    pub(crate) id: fn(&mut T),
    pub(crate) create_at: fn(&mut T, Timestamp),
    pub(crate) update_at: fn(&mut T, Timestamp),
}

impl<T> Clone for DefaultOps<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            create_at: self.create_at,
            update_at: self.update_at,
        }
    }
}

/// Declared capabilities of a record type.
///
/// ```ignore
/// fn hooks() -> Hooks<Self> {
///     Hooks::new().with_default().with_custom()
/// }
/// ```
pub struct Hooks<T> {
    pub(crate) defaults: Option<DefaultOps<T>>,
    pub(crate) custom: Option<CustomFields>,
}

impl<T: Document> Hooks<T> {
    /// No hooks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            defaults: None,
            custom: None,
        }
    }

    /// Runs the type's [`DefaultFieldHook`] methods.
    #[must_use]
    pub fn with_default(mut self) -> Self
    where
        T: DefaultFieldHook,
    {
        self.defaults = Some(DefaultOps {
            id: T::default_id,
            create_at: T::default_create_at,
            update_at: T::default_update_at,
        });
        self
    }

    /// Runs the type's [`CustomFieldsHook`] configuration.
    #[must_use]
    pub fn with_custom(mut self) -> Self
    where
        T: CustomFieldsHook,
    {
        self.custom = Some(T::custom_fields());
        self
    }

    #[must_use]
    pub fn capability(&self) -> Capability {
        Capability::from_parts(self.defaults.is_some(), self.custom.is_some())
    }
}

impl<T: Document> Default for Hooks<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Hooks<T> {
    fn clone(&self) -> Self {
        Self {
            defaults: self.defaults.clone(),
            custom: self.custom.clone(),
        }
    }
}

impl<T> fmt::Debug for Hooks<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("default", &self.defaults.is_some())
            .field("custom", &self.custom)
            .finish()
    }
}

/// Ready-made bookkeeping fields to embed in a record.
///
/// Serializes with document-store names (`_id`, `createAt`, `updateAt`).
/// A record embedding it can forward its [`DefaultFieldHook`] methods:
///
/// ```ignore
/// impl DefaultFieldHook for User {
///     fn default_id(&mut self) {
///         self.base.default_id();
///     }
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultField {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "createAt")]
    pub create_at: Timestamp,
    #[serde(rename = "updateAt")]
    pub update_at: Timestamp,
}

impl Document for DefaultField {
    fn fields() -> FieldTable<Self> {
        FieldTable::<Self>::new()
            .field(convention::ID, |base| FieldMut::ObjectId(&mut base.id))
            .field(convention::CREATE_AT, |base| FieldMut::Timestamp(&mut base.create_at))
            .field(convention::UPDATE_AT, |base| FieldMut::Timestamp(&mut base.update_at))
    }

    fn hooks() -> Hooks<Self> {
        Hooks::new().with_default()
    }
}

impl DefaultFieldHook for DefaultField {}
