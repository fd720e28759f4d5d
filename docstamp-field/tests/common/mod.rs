#![allow(dead_code)]

use docstamp_field::{
    CustomFields, CustomFieldsHook, DefaultField, DefaultFieldHook, DiagnosticLog, Document,
    FieldMut, FieldTable, Hooks, Injector,
};
use docstamp_types::{ActorContext, ManualClock, ObjectId, Timestamp};
use std::sync::Arc;

pub const T0: i64 = 1_700_000_000_000;

/// An injector frozen at `T0`, plus its clock.
pub fn frozen_injector() -> (Injector, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(Timestamp::from_millis(T0)));
    (Injector::new().with_clock(clock.clone()), clock)
}

/// A frozen injector that reports into the returned log.
pub fn observed_injector() -> (Injector, Arc<DiagnosticLog>) {
    let log = Arc::new(DiagnosticLog::new());
    let (injector, _) = frozen_injector();
    (injector.with_diagnostics(log.clone()), log)
}

pub fn make_ctx(pairs: &[(&str, &str)]) -> ActorContext {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}

// ── Plain: no hooks ──────────────────────────────────────────────

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Plain {
    pub id: String,
    pub create_at: i64,
    pub update_at: i64,
}

impl Document for Plain {
    fn fields() -> FieldTable<Self> {
        FieldTable::<Self>::new()
            .field("id", |p| FieldMut::Text(&mut p.id))
            .field("create_at", |p| FieldMut::I64(&mut p.create_at))
            .field("update_at", |p| FieldMut::I64(&mut p.update_at))
    }
}

// ── Article: default hook, string id, epoch-millis times ─────────

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Article {
    pub id: String,
    pub create_at: i64,
    pub update_at: i64,
    pub title: String,
}

impl Document for Article {
    fn fields() -> FieldTable<Self> {
        FieldTable::<Self>::new()
            .field("id", |a| FieldMut::Text(&mut a.id))
            .field("create_at", |a| FieldMut::I64(&mut a.create_at))
            .field("update_at", |a| FieldMut::I64(&mut a.update_at))
    }

    fn hooks() -> Hooks<Self> {
        Hooks::new().with_default()
    }
}

impl DefaultFieldHook for Article {}

// ── Order: default hook, native id and time types ────────────────

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Order {
    pub id: ObjectId,
    pub create_at: Timestamp,
    pub update_at: u64,
}

impl Document for Order {
    fn fields() -> FieldTable<Self> {
        FieldTable::<Self>::new()
            .field("id", |o| FieldMut::ObjectId(&mut o.id))
            .field("create_at", |o| FieldMut::Timestamp(&mut o.create_at))
            .field("update_at", |o| FieldMut::U64(&mut o.update_at))
    }

    fn hooks() -> Hooks<Self> {
        Hooks::new().with_default()
    }
}

impl DefaultFieldHook for Order {}

// ── Post: custom hook, every role ────────────────────────────────

pub const AUTHOR_KEY: &str = "author_ctx_key";
pub const EDITOR_KEY: &str = "editor_ctx_key";

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Post {
    pub key: String,
    pub created: Timestamp,
    pub author: String,
    pub modified: i64,
    pub editor: String,
}

impl Document for Post {
    fn fields() -> FieldTable<Self> {
        FieldTable::<Self>::new()
            .field("key", |p| FieldMut::Text(&mut p.key))
            .field("created", |p| FieldMut::Timestamp(&mut p.created))
            .field("author", |p| FieldMut::Text(&mut p.author))
            .field("modified", |p| FieldMut::I64(&mut p.modified))
            .field("editor", |p| FieldMut::Text(&mut p.editor))
    }

    fn hooks() -> Hooks<Self> {
        Hooks::new().with_custom()
    }
}

impl CustomFieldsHook for Post {
    fn custom_fields() -> CustomFields {
        CustomFields::new()
            .set_id("key")
            .set_create_at("created")
            .set_create_by("author", AUTHOR_KEY)
            .set_update_at("modified")
            .set_update_by("editor", EDITOR_KEY)
    }
}

// ── Memo: custom hook, update_by only ────────────────────────────

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Memo {
    pub body: String,
    pub editor: String,
}

impl Document for Memo {
    fn fields() -> FieldTable<Self> {
        FieldTable::<Self>::new().field("editor", |m| FieldMut::Text(&mut m.editor))
    }

    fn hooks() -> Hooks<Self> {
        Hooks::new().with_custom()
    }
}

impl CustomFieldsHook for Memo {
    fn custom_fields() -> CustomFields {
        CustomFields::new().set_update_by("editor", EDITOR_KEY)
    }
}

// ── Ticket: both hooks ───────────────────────────────────────────

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Ticket {
    pub id: ObjectId,
    pub create_at: Timestamp,
    pub update_at: Timestamp,
    pub opened_by: String,
    pub touched_by: String,
}

impl Document for Ticket {
    fn fields() -> FieldTable<Self> {
        FieldTable::<Self>::new()
            .field("id", |t| FieldMut::ObjectId(&mut t.id))
            .field("create_at", |t| FieldMut::Timestamp(&mut t.create_at))
            .field("update_at", |t| FieldMut::Timestamp(&mut t.update_at))
            .field("opened_by", |t| FieldMut::Text(&mut t.opened_by))
            .field("touched_by", |t| FieldMut::Text(&mut t.touched_by))
    }

    fn hooks() -> Hooks<Self> {
        Hooks::new().with_default().with_custom()
    }
}

impl DefaultFieldHook for Ticket {}

impl CustomFieldsHook for Ticket {
    fn custom_fields() -> CustomFields {
        CustomFields::new()
            .set_create_by("opened_by", "user")
            .set_update_by("touched_by", "user")
    }
}

// ── Broken: actor key points at a number ─────────────────────────

pub const TENANT_KEY: &str = "tenant";

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Broken {
    pub owner: String,
}

impl Document for Broken {
    fn fields() -> FieldTable<Self> {
        FieldTable::<Self>::new().field("owner", |b| FieldMut::Text(&mut b.owner))
    }

    fn hooks() -> Hooks<Self> {
        Hooks::new().with_custom()
    }
}

impl CustomFieldsHook for Broken {
    fn custom_fields() -> CustomFields {
        CustomFields::new().set_create_by("owner", TENANT_KEY)
    }
}

// ── Mismatched: unknown and unsupported names ────────────────────

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Mismatched {
    pub archived: bool,
    pub revision: i64,
    pub stamp: String,
}

impl Document for Mismatched {
    fn fields() -> FieldTable<Self> {
        FieldTable::<Self>::new()
            .field("archived", |_| FieldMut::unsupported::<bool>())
            .field("revision", |m| FieldMut::I64(&mut m.revision))
            .field("stamp", |m| FieldMut::Text(&mut m.stamp))
    }

    fn hooks() -> Hooks<Self> {
        Hooks::new().with_custom()
    }
}

impl CustomFieldsHook for Mismatched {
    fn custom_fields() -> CustomFields {
        CustomFields::new()
            .set_id("revision")
            .set_create_at("missing")
            .set_update_at("stamp")
            .set_update_by("archived", "user")
    }
}

// ── Account: embeds DefaultField ─────────────────────────────────

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Account {
    pub base: DefaultField,
    pub email: String,
}

impl Document for Account {
    fn fields() -> FieldTable<Self> {
        FieldTable::<Self>::new()
    }

    fn hooks() -> Hooks<Self> {
        Hooks::new().with_default()
    }
}

impl DefaultFieldHook for Account {
    fn default_id(&mut self) {
        self.base.default_id();
    }

    fn default_create_at(&mut self, now: Timestamp) {
        self.base.default_create_at(now);
    }

    fn default_update_at(&mut self, now: Timestamp) {
        self.base.default_update_at(now);
    }
}

// ── Odd: default hook, convention names with unwritable types ────

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Odd {
    pub id: i64,
    pub create_at: String,
    pub update_at: Timestamp,
}

impl Document for Odd {
    fn fields() -> FieldTable<Self> {
        FieldTable::<Self>::new()
            .field("id", |o| FieldMut::I64(&mut o.id))
            .field("create_at", |o| FieldMut::Text(&mut o.create_at))
            .field("update_at", |o| FieldMut::Timestamp(&mut o.update_at))
    }

    fn hooks() -> Hooks<Self> {
        Hooks::new().with_default()
    }
}

impl DefaultFieldHook for Odd {}
