//! Opt-in reporting of skipped configuration.
//!
//! Injection never fails on a misconfigured record type; the affected field
//! is simply left alone. Attach a [`DiagnosticSink`] to an
//! [`Injector`](crate::Injector) to find out when that happens.

use serde::Serialize;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use crate::custom::Role;
use crate::locator::FieldKind;

/// Why a configured field was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The name is not declared in the record's field table.
    UnknownField,
    /// The field's representation is not supported for its role.
    UnsupportedType(FieldKind),
    /// The actor context had no non-empty string under the key.
    NoActor { key: String },
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::UnknownField => f.write_str("field is not declared"),
            DiagnosticKind::UnsupportedType(kind) => write!(f, "unsupported field type {kind}"),
            DiagnosticKind::NoActor { key } => write!(f, "no actor under context key `{key}`"),
        }
    }
}

/// The hook set a skipped field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HookKind {
    /// A convention field of [`DefaultFieldHook`](crate::DefaultFieldHook).
    Default,
    /// A field named in [`CustomFields`](crate::CustomFields).
    Custom,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookKind::Default => f.write_str("default"),
            HookKind::Custom => f.write_str("custom"),
        }
    }
}

/// One skipped field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Type name of the record.
    pub record: &'static str,
    pub hook: HookKind,
    pub role: Role,
    /// Configured or convention field name.
    pub field: String,
    #[serde(serialize_with = "serialize_kind")]
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {} field `{}` skipped: {}",
            self.record, self.hook, self.role, self.field, self.kind
        )
    }
}

fn serialize_kind<S: serde::Serializer>(kind: &DiagnosticKind, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(kind)
}

/// Receives diagnostics as they happen.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// A sink that keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct DiagnosticLog {
    entries: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns everything collected so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for DiagnosticLog {
    fn report(&self, diagnostic: Diagnostic) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic);
    }
}
