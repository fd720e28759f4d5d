//! Typed field setters.
//!
//! Each setter branches on the declared representation of the target field,
//! never on the value being written. A representation a setter does not
//! support is left untouched and reported as [`SetOutcome::Unsupported`].

use docstamp_types::{ActorContext, ObjectId, Timestamp, unique_string};
use serde_json::Value;

use crate::error::{FieldError, FieldResult};
use crate::locator::{FieldKind, FieldMut};

/// What a setter did to its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// A new value was written.
    Written,
    /// The field already held a value and was not overwritten.
    Kept,
    /// The actor context had no usable value for the configured key.
    NoActor,
    /// The field's representation is not handled by this setter.
    Unsupported(FieldKind),
}

/// Writes `now` into a timestamp-like field if it is zero, or always when
/// `overwrite` is set. Numeric fields receive epoch milliseconds.
pub fn set_time(field: FieldMut<'_>, now: Timestamp, overwrite: bool) -> SetOutcome {
    match field {
        FieldMut::Timestamp(slot) => {
            let empty = slot.is_zero();
            fill(slot, now, empty, overwrite)
        }
        FieldMut::I64(slot) => {
            let empty = *slot == 0;
            fill(slot, now.as_millis(), empty, overwrite)
        }
        FieldMut::U64(slot) => {
            let empty = *slot == 0;
            fill(slot, now.as_unsigned_millis(), empty, overwrite)
        }
        other => SetOutcome::Unsupported(other.kind()),
    }
}

/// Writes `now` into a timestamp-like field regardless of its current value.
pub fn set_updated_time(field: FieldMut<'_>, now: Timestamp) -> SetOutcome {
    match field {
        FieldMut::Timestamp(slot) => fill(slot, now, true, true),
        FieldMut::I64(slot) => fill(slot, now.as_millis(), true, true),
        FieldMut::U64(slot) => fill(slot, now.as_unsigned_millis(), true, true),
        other => SetOutcome::Unsupported(other.kind()),
    }
}

/// Copies the actor stored under `key` into a string field.
///
/// An absent, null or empty actor leaves the field as it is. A value of any
/// other JSON type is an error.
pub fn set_by(field: FieldMut<'_>, ctx: &ActorContext, key: &str) -> FieldResult<SetOutcome> {
    let slot = match field {
        FieldMut::Text(slot) => slot,
        other => return Ok(SetOutcome::Unsupported(other.kind())),
    };
    match ctx.get(key) {
        None | Some(Value::Null) => Ok(SetOutcome::NoActor),
        Some(Value::String(actor)) if actor.is_empty() => Ok(SetOutcome::NoActor),
        Some(Value::String(actor)) => {
            slot.clone_from(actor);
            Ok(SetOutcome::Written)
        }
        Some(other) => Err(FieldError::ActorNotString {
            key: key.to_string(),
            found: json_type(other),
        }),
    }
}

/// Assigns a fresh identifier if the field is still empty.
///
/// Object id fields get a new [`ObjectId`]; string fields get a random
/// unique string.
pub fn set_id(field: FieldMut<'_>) -> SetOutcome {
    match field {
        FieldMut::ObjectId(slot) => {
            if slot.is_zero() {
                *slot = ObjectId::new();
                SetOutcome::Written
            } else {
                SetOutcome::Kept
            }
        }
        FieldMut::Text(slot) => {
            if slot.is_empty() {
                *slot = unique_string();
                SetOutcome::Written
            } else {
                SetOutcome::Kept
            }
        }
        other => SetOutcome::Unsupported(other.kind()),
    }
}

fn fill<V>(slot: &mut V, value: V, empty: bool, overwrite: bool) -> SetOutcome {
    if empty || overwrite {
        *slot = value;
        SetOutcome::Written
    } else {
        SetOutcome::Kept
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
