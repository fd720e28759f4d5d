//! Field locator: typed, mutable access to a record's bookkeeping fields.
//!
//! A record type describes its fields once in a [`FieldTable`], mapping a
//! field name to an [`Accessor`]. The engine resolves names against that
//! table when a record type is first bound, never by inspecting values at
//! dispatch time.

use docstamp_types::{ObjectId, Timestamp};
use std::fmt;

/// A mutable handle to one field, tagged with its representation.
#[derive(Debug)]
pub enum FieldMut<'a> {
    Timestamp(&'a mut Timestamp),
    I64(&'a mut i64),
    U64(&'a mut u64),
    Text(&'a mut String),
    ObjectId(&'a mut ObjectId),
    /// A declared field the engine does not know how to write.
    /// Holds the field's type name.
    Unsupported(&'static str),
}

impl FieldMut<'_> {
    /// Handle for a declared field of type `V` that setters must leave alone.
    #[must_use]
    pub fn unsupported<V: ?Sized>() -> Self {
        FieldMut::Unsupported(std::any::type_name::<V>())
    }

    /// The representation behind this handle.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldMut::Timestamp(_) => FieldKind::Timestamp,
            FieldMut::I64(_) => FieldKind::I64,
            FieldMut::U64(_) => FieldKind::U64,
            FieldMut::Text(_) => FieldKind::Text,
            FieldMut::ObjectId(_) => FieldKind::ObjectId,
            FieldMut::Unsupported(type_name) => FieldKind::Unsupported(type_name),
        }
    }
}

/// Field representation, without the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Timestamp,
    I64,
    U64,
    Text,
    ObjectId,
    Unsupported(&'static str),
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Timestamp => f.write_str("timestamp"),
            FieldKind::I64 => f.write_str("i64"),
            FieldKind::U64 => f.write_str("u64"),
            FieldKind::Text => f.write_str("string"),
            FieldKind::ObjectId => f.write_str("object id"),
            FieldKind::Unsupported(type_name) => f.write_str(type_name),
        }
    }
}

/// Projects a record onto one of its fields.
pub type Accessor<T> = for<'a> fn(&'a mut T) -> FieldMut<'a>;

struct FieldEntry<T> {
    name: &'static str,
    accessor: Accessor<T>,
}

impl<T> Clone for FieldEntry<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            accessor: self.accessor,
        }
    }
}

/// Name-to-accessor table for one record type.
///
/// ```
/// use docstamp_field::{FieldMut, FieldTable};
///
/// struct Note {
///     id: String,
///     create_at: i64,
/// }
///
/// let table = FieldTable::<Note>::new()
///     .field("id", |note| FieldMut::Text(&mut note.id))
///     .field("create_at", |note| FieldMut::I64(&mut note.create_at));
///
/// assert!(table.locate("create_at").is_some());
/// assert!(table.locate("update_at").is_none());
/// ```
pub struct FieldTable<T> {
    entries: Vec<FieldEntry<T>>,
}

impl<T> FieldTable<T> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Declares a field. Declaring the same name again replaces the accessor.
    #[must_use]
    pub fn field(mut self, name: &'static str, accessor: Accessor<T>) -> Self {
        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry.accessor = accessor,
            None => self.entries.push(FieldEntry { name, accessor }),
        }
        self
    }

    /// Looks up the accessor for `name`.
    #[must_use]
    pub fn locate(&self, name: &str) -> Option<Accessor<T>> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.accessor)
    }

    /// Declared field names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for FieldTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for FieldTable<T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<T> fmt::Debug for FieldTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
