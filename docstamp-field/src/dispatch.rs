//! Lifecycle dispatcher.
//!
//! The persistence layer calls [`Injector::run`] (or [`do_fields`]) at each
//! lifecycle phase, before it issues the store command. The dispatcher
//! normalizes its input into a sequence of records and runs the phase's
//! handler sequence on each, stopping at the first failure.

use docstamp_types::{ActorContext, Clock, Phase, SystemClock, Timestamp};
use std::fmt;
use std::sync::Arc;
use tracing::{trace, warn};

use crate::binding::Binding;
use crate::custom::Role;
use crate::diagnostic::{Diagnostic, DiagnosticSink};
use crate::error::FieldResult;
use crate::hook::Document;

/// Handler sequence selected by a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Handler {
    /// Insert and upsert: id, create time, create by, update time, update by.
    Create,
    /// Update and replace: update time, update by.
    Update,
}

const FIELD_HANDLERS: &[(Phase, Handler)] = &[
    (Phase::BeforeInsert, Handler::Create),
    (Phase::BeforeUpdate, Handler::Update),
    (Phase::BeforeReplace, Handler::Update),
    (Phase::BeforeUpsert, Handler::Create),
];

impl Handler {
    pub(crate) fn for_phase(phase: Phase) -> Option<Self> {
        FIELD_HANDLERS
            .iter()
            .find(|(handled, _)| *handled == phase)
            .map(|(_, handler)| *handler)
    }

    pub(crate) fn fills(self, role: Role) -> bool {
        match self {
            Handler::Create => true,
            Handler::Update => matches!(role, Role::UpdateAt | Role::UpdateBy),
        }
    }
}

/// Returns true if `phase` has a field handler.
#[must_use]
pub fn is_handled(phase: Phase) -> bool {
    Handler::for_phase(phase).is_some()
}

/// Per-call state shared by every record in one dispatch.
pub struct Scope<'a> {
    ctx: &'a ActorContext,
    now: Timestamp,
    diagnostics: Option<&'a dyn DiagnosticSink>,
}

impl<'a> Scope<'a> {
    #[must_use]
    pub fn new(ctx: &'a ActorContext, now: Timestamp) -> Self {
        Self {
            ctx,
            now,
            diagnostics: None,
        }
    }

    #[must_use]
    pub fn with_diagnostics(mut self, sink: &'a dyn DiagnosticSink) -> Self {
        self.diagnostics = Some(sink);
        self
    }

    /// The instant written into every time field of this dispatch.
    pub fn now(&self) -> Timestamp {
        self.now
    }

    pub fn context(&self) -> &ActorContext {
        self.ctx
    }

    pub(crate) fn report(&self, diagnostic: impl FnOnce() -> Diagnostic) {
        if let Some(sink) = self.diagnostics {
            sink.report(diagnostic());
        }
    }
}

/// A record of any [`Document`] type, erased so batches can mix types.
///
/// Implemented for every `Document`; not meant to be implemented by hand.
pub trait Record {
    /// Type name of the record.
    fn record_type(&self) -> &'static str;

    /// Runs the handler sequence for `phase` on this record.
    fn inject(&mut self, phase: Phase, scope: &Scope<'_>) -> FieldResult<()>;
}

impl<T: Document> Record for T {
    fn record_type(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn inject(&mut self, phase: Phase, scope: &Scope<'_>) -> FieldResult<()> {
        Binding::<T>::cached().apply(self, phase, scope)
    }
}

/// Records handed to one dispatch: a single record or an ordered batch.
pub enum Docs<'a> {
    One(&'a mut dyn Record),
    Many(Vec<&'a mut dyn Record>),
}

impl<'a> Docs<'a> {
    pub fn one<T: Record + 'a>(doc: &'a mut T) -> Self {
        Docs::One(doc)
    }

    /// A homogeneous batch, processed in slice order.
    pub fn many<T: Record + 'a>(docs: &'a mut [T]) -> Self {
        Docs::Many(
            docs.iter_mut()
                .map(|doc| -> &'a mut dyn Record { doc })
                .collect(),
        )
    }

    /// A batch of records of different types, processed in order.
    pub fn mixed(docs: Vec<&'a mut dyn Record>) -> Self {
        Docs::Many(docs)
    }

    pub fn len(&self) -> usize {
        match self {
            Docs::One(_) => 1,
            Docs::Many(docs) => docs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> From<Vec<&'a mut dyn Record>> for Docs<'a> {
    fn from(docs: Vec<&'a mut dyn Record>) -> Self {
        Docs::Many(docs)
    }
}

impl fmt::Debug for Docs<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Docs::One(doc) => f.debug_tuple("One").field(&doc.record_type()).finish(),
            Docs::Many(docs) => f
                .debug_tuple("Many")
                .field(&docs.iter().map(|doc| doc.record_type()).collect::<Vec<_>>())
                .finish(),
        }
    }
}

/// Entry point for the persistence layer.
///
/// Holds the clock that supplies "now" and an optional diagnostic sink.
/// Cheap to clone and safe to share between threads.
#[derive(Clone)]
pub struct Injector {
    clock: Arc<dyn Clock>,
    diagnostics: Option<Arc<dyn DiagnosticSink>>,
}

impl Injector {
    /// System clock, no diagnostics.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            diagnostics: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Reports skipped configuration to `sink`.
    #[must_use]
    pub fn with_diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = Some(sink);
        self
    }

    /// Fills the bookkeeping fields of `docs` for `phase`.
    ///
    /// Phases without a handler do nothing. Batches run in order and stop at
    /// the first record that fails; records already filled stay filled.
    pub fn run(&self, ctx: &ActorContext, docs: Docs<'_>, phase: Phase) -> FieldResult<()> {
        if !is_handled(phase) {
            trace!(%phase, "no field handler for phase");
            return Ok(());
        }

        let mut scope = Scope::new(ctx, self.clock.now());
        if let Some(sink) = self.diagnostics.as_deref() {
            scope = scope.with_diagnostics(sink);
        }

        match docs {
            Docs::One(doc) => doc.inject(phase, &scope),
            Docs::Many(docs) => {
                for (index, doc) in docs.into_iter().enumerate() {
                    if let Err(err) = doc.inject(phase, &scope) {
                        warn!(index, record = doc.record_type(), %phase, error = %err, "batch stopped");
                        return Err(err);
                    }
                }
                Ok(())
            }
        }
    }
}

impl Default for Injector {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Injector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Injector")
            .field("now", &self.clock.now())
            .field("diagnostics", &self.diagnostics.is_some())
            .finish()
    }
}

/// Fills bookkeeping fields with the system clock and no diagnostics.
pub fn do_fields(ctx: &ActorContext, docs: Docs<'_>, phase: Phase) -> FieldResult<()> {
    Injector::new().run(ctx, docs, phase)
}
