//! Per-type resolution of hooks and field names.
//!
//! A [`Binding`] is everything the dispatcher needs to fill one record type:
//! its capability, its default hook functions, the accessors behind the
//! convention names and behind every configured custom name. It is built
//! once per type and shared through a process-wide cache.

use docstamp_types::{Phase, Timestamp};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::{debug, trace, warn};

use crate::custom::{CustomFields, Role};
use crate::diagnostic::{Diagnostic, DiagnosticKind, HookKind};
use crate::dispatch::{Handler, Scope};
use crate::error::FieldResult;
use crate::hook::{Capability, DefaultOps, Document, convention};
use crate::locator::{Accessor, FieldKind, FieldTable};
use crate::setter::{SetOutcome, set_by, set_id, set_time, set_updated_time};

struct Slot<T> {
    role: Role,
    field: String,
    context_key: Option<String>,
    accessor: Option<Accessor<T>>,
}

struct Convention<T> {
    id: Option<Accessor<T>>,
    create_at: Option<Accessor<T>>,
    update_at: Option<Accessor<T>>,
}

/// Resolved injection plan for record type `T`.
pub struct Binding<T> {
    record: &'static str,
    capability: Capability,
    defaults: Option<DefaultOps<T>>,
    convention: Convention<T>,
    // Create-dispatch order: id, create_at, create_by, update_at, update_by.
    custom: Vec<Slot<T>>,
}

impl<T: Document> Binding<T> {
    /// Builds the binding from `T::fields()` and `T::hooks()`.
    ///
    /// Prefer [`Binding::cached`]; this always does the work again.
    #[must_use]
    pub fn resolve() -> Self {
        let record = std::any::type_name::<T>();
        let table = T::fields();
        let hooks = T::hooks();
        let capability = hooks.capability();
        let custom = hooks
            .custom
            .as_ref()
            .map(|fields| resolve_custom(&table, fields, record))
            .unwrap_or_default();

        debug!(
            record,
            ?capability,
            declared = table.len(),
            configured = custom.len(),
            "bound record type"
        );

        Self {
            record,
            capability,
            defaults: hooks.defaults,
            convention: Convention {
                id: table.locate(convention::ID),
                create_at: table.locate(convention::CREATE_AT),
                update_at: table.locate(convention::UPDATE_AT),
            },
            custom,
        }
    }

    /// The shared binding for `T`, resolved on first use.
    pub fn cached() -> Arc<Self> {
        let key = TypeId::of::<T>();
        let hit = bindings()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();
        if let Some(Ok(binding)) = hit.map(|erased| erased.downcast::<Self>()) {
            return binding;
        }

        // `T::fields` and `T::hooks` are user code; no lock is held while they run.
        let resolved = Arc::new(Self::resolve());
        let erased = bindings()
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert_with(|| resolved.clone() as Arc<dyn Any + Send + Sync>)
            .clone();
        erased.downcast::<Self>().unwrap_or(resolved)
    }

    /// Type name of the bound record.
    pub fn record(&self) -> &'static str {
        self.record
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// Configured custom fields that the record type does not declare.
    pub fn unresolved(&self) -> Vec<(Role, &str)> {
        self.custom
            .iter()
            .filter(|slot| slot.accessor.is_none())
            .map(|slot| (slot.role, slot.field.as_str()))
            .collect()
    }

    /// Runs the handler sequence for `phase` on one record.
    ///
    /// Default hooks run before custom fields. The first failing custom
    /// field aborts the rest of the sequence. Convention fields whose type
    /// the default hooks cannot write are reported to the scope's sink.
    pub fn apply(&self, doc: &mut T, phase: Phase, scope: &Scope<'_>) -> FieldResult<()> {
        let Some(handler) = Handler::for_phase(phase) else {
            trace!(record = self.record, %phase, "no field handler for phase");
            return Ok(());
        };
        if self.capability == Capability::NoHooks {
            return Ok(());
        }
        debug!(
            record = self.record,
            %phase,
            capability = ?self.capability,
            "filling bookkeeping fields"
        );

        let now = scope.now();
        if let Some(ops) = &self.defaults {
            let roles: &[Role] = match handler {
                Handler::Create => &[Role::Id, Role::CreateAt, Role::UpdateAt],
                Handler::Update => &[Role::UpdateAt],
            };
            for role in roles {
                self.check_convention(doc, *role, scope);
            }
            match handler {
                Handler::Create => {
                    (ops.id)(doc);
                    (ops.create_at)(doc, now);
                    (ops.update_at)(doc, now);
                }
                Handler::Update => (ops.update_at)(doc, now),
            }
        }

        for slot in self.custom.iter().filter(|slot| handler.fills(slot.role)) {
            self.fill_custom(slot, doc, scope)?;
        }
        Ok(())
    }

    /// Fills one convention-named field. Backs the provided
    /// [`DefaultFieldHook`](crate::DefaultFieldHook) methods.
    pub(crate) fn fill_convention(&self, doc: &mut T, role: Role, now: Timestamp) {
        let Some((accessor, name)) = self.convention_field(role) else {
            return;
        };
        let outcome = match role {
            Role::Id => set_id(accessor(doc)),
            Role::CreateAt => set_time(accessor(doc), now, false),
            _ => set_updated_time(accessor(doc), now),
        };
        trace!(record = self.record, field = name, ?outcome, "default field");
    }

    fn convention_field(&self, role: Role) -> Option<(Accessor<T>, &'static str)> {
        let (accessor, name) = match role {
            Role::Id => (self.convention.id, convention::ID),
            Role::CreateAt => (self.convention.create_at, convention::CREATE_AT),
            Role::UpdateAt => (self.convention.update_at, convention::UPDATE_AT),
            Role::CreateBy | Role::UpdateBy => return None,
        };
        accessor.map(|accessor| (accessor, name))
    }

    // Undeclared convention names are not reported: a type may override
    // the hook method and keep the field elsewhere.
    fn check_convention(&self, doc: &mut T, role: Role, scope: &Scope<'_>) {
        let Some((accessor, name)) = self.convention_field(role) else {
            return;
        };
        let kind = accessor(doc).kind();
        let supported = match role {
            Role::Id => matches!(kind, FieldKind::ObjectId | FieldKind::Text),
            _ => matches!(kind, FieldKind::Timestamp | FieldKind::I64 | FieldKind::U64),
        };
        if !supported {
            self.skip(HookKind::Default, role, name, scope, DiagnosticKind::UnsupportedType(kind));
        }
    }

    fn fill_custom(&self, slot: &Slot<T>, doc: &mut T, scope: &Scope<'_>) -> FieldResult<()> {
        let Some(accessor) = slot.accessor else {
            self.skip_custom(slot, scope, DiagnosticKind::UnknownField);
            return Ok(());
        };

        let field = accessor(doc);
        let outcome = match slot.role {
            Role::Id => set_id(field),
            Role::CreateAt => set_time(field, scope.now(), false),
            Role::UpdateAt => set_updated_time(field, scope.now()),
            Role::CreateBy | Role::UpdateBy => {
                let key = slot.context_key.as_deref().unwrap_or_default();
                set_by(field, scope.context(), key).inspect_err(|err| {
                    warn!(
                        record = self.record,
                        role = %slot.role,
                        field = %slot.field,
                        error = %err,
                        "custom field rejected"
                    );
                })?
            }
        };

        match outcome {
            SetOutcome::Unsupported(kind) => {
                self.skip_custom(slot, scope, DiagnosticKind::UnsupportedType(kind));
            }
            SetOutcome::NoActor => {
                let key = slot.context_key.clone().unwrap_or_default();
                self.skip_custom(slot, scope, DiagnosticKind::NoActor { key });
            }
            SetOutcome::Written | SetOutcome::Kept => {
                trace!(record = self.record, role = %slot.role, field = %slot.field, ?outcome, "custom field");
            }
        }
        Ok(())
    }

    fn skip_custom(&self, slot: &Slot<T>, scope: &Scope<'_>, kind: DiagnosticKind) {
        self.skip(HookKind::Custom, slot.role, &slot.field, scope, kind);
    }

    fn skip(&self, hook: HookKind, role: Role, field: &str, scope: &Scope<'_>, kind: DiagnosticKind) {
        debug!(record = self.record, %hook, %role, field, %kind, "field skipped");
        scope.report(|| Diagnostic {
            record: self.record,
            hook,
            role,
            field: field.to_string(),
            kind,
        });
    }
}

impl<T> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("record", &self.record)
            .field("capability", &self.capability)
            .field(
                "custom",
                &self
                    .custom
                    .iter()
                    .map(|slot| (slot.role, slot.field.as_str(), slot.accessor.is_some()))
                    .collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

fn resolve_custom<T>(table: &FieldTable<T>, fields: &CustomFields, record: &str) -> Vec<Slot<T>> {
    fields
        .roles()
        .into_iter()
        .map(|(role, name)| {
            let accessor = table.locate(name);
            if accessor.is_none() {
                debug!(record, %role, field = name, "configured field is not declared");
            }
            let context_key = match role {
                Role::CreateBy => fields.create_by().map(|actor| actor.context_key.clone()),
                Role::UpdateBy => fields.update_by().map(|actor| actor.context_key.clone()),
                _ => None,
            };
            Slot {
                role,
                field: name.to_string(),
                context_key,
                accessor,
            }
        })
        .collect()
}

type BindingCache = RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>;

fn bindings() -> &'static BindingCache {
    static BINDINGS: OnceLock<BindingCache> = OnceLock::new();
    BINDINGS.get_or_init(Default::default)
}
