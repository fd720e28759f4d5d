//! Field lifecycle injection for docstamp.
//!
//! Right before a document is inserted, updated, replaced or upserted, the
//! persistence layer hands the record(s) to this crate, which fills in the
//! bookkeeping fields the caller did not set:
//! - [`Document`]: every record type lists its fillable fields in a
//!   [`FieldTable`] and declares its [`Hooks`]
//! - [`DefaultFieldHook`]: convention fields `id`, `create_at`, `update_at`
//! - [`CustomFieldsHook`]: [`CustomFields`] maps roles to any field names and
//!   wires actor identity from the [`ActorContext`](docstamp_types::ActorContext)
//! - [`Injector`] / [`do_fields`]: the dispatcher called per phase
//!
//! Misconfiguration is never fatal: unknown names and unsupported field types
//! are skipped, optionally reported through a [`DiagnosticSink`]. The only
//! error a dispatch returns is [`FieldError`].
//!
//! ```
//! use docstamp_field::{
//!     CustomFields, CustomFieldsHook, DefaultFieldHook, Docs, Document, FieldMut, FieldTable,
//!     Hooks, do_fields,
//! };
//! use docstamp_types::{ActorContext, Phase};
//!
//! #[derive(Default)]
//! struct Article {
//!     id: String,
//!     create_at: i64,
//!     update_at: i64,
//!     editor: String,
//! }
//!
//! impl Document for Article {
//!     fn fields() -> FieldTable<Self> {
//!         FieldTable::<Self>::new()
//!             .field("id", |a| FieldMut::Text(&mut a.id))
//!             .field("create_at", |a| FieldMut::I64(&mut a.create_at))
//!             .field("update_at", |a| FieldMut::I64(&mut a.update_at))
//!             .field("editor", |a| FieldMut::Text(&mut a.editor))
//!     }
//!
//!     fn hooks() -> Hooks<Self> {
//!         Hooks::new().with_default().with_custom()
//!     }
//! }
//!
//! impl DefaultFieldHook for Article {}
//!
//! impl CustomFieldsHook for Article {
//!     fn custom_fields() -> CustomFields {
//!         CustomFields::new().set_update_by("editor", "user")
//!     }
//! }
//!
//! let ctx = ActorContext::new().with("user", "alice");
//! let mut article = Article::default();
//! do_fields(&ctx, Docs::one(&mut article), Phase::BeforeInsert).unwrap();
//!
//! assert!(!article.id.is_empty());
//! assert_eq!(article.create_at, article.update_at);
//! assert_eq!(article.editor, "alice");
//! ```

mod binding;
mod custom;
mod diagnostic;
mod dispatch;
mod error;
mod hook;
mod locator;
mod setter;

pub use binding::Binding;
pub use custom::{ActorField, CustomFields, Role};
pub use diagnostic::{Diagnostic, DiagnosticKind, DiagnosticLog, DiagnosticSink, HookKind};
pub use dispatch::{Docs, Injector, Record, Scope, do_fields, is_handled};
pub use error::{FieldError, FieldResult};
pub use hook::{Capability, CustomFieldsHook, DefaultField, DefaultFieldHook, Document, Hooks, convention};
pub use locator::{Accessor, FieldKind, FieldMut, FieldTable};
pub use setter::{SetOutcome, set_by, set_id, set_time, set_updated_time};
