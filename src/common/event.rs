use crate::{
    common::money::Money,
    domain::entry::{EntryId, EntryKind},
};

/// Caller-supplied fields of a new entry, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub kind: EntryKind,
    pub label: String,
    pub total: Money,
    pub owner: String,
    pub participants: Vec<String>,
}

/// A command sent from an adapter to the engine for processing.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerCommand {
    Create(NewEntry),
    List { kind: Option<EntryKind> },
    MarkPaid { entry: EntryId, name: String },
    Contribute { entry: EntryId, name: String, amount: Money },
}
