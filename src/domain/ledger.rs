use std::collections::HashMap;

use crate::{
    common::error::LedgerError,
    domain::entry::{EntryId, EntryKind, LedgerEntry},
};

/// Entry store of one ledger: entries by id plus their insertion order.
#[derive(Debug)]
pub struct Ledger {
    entries: HashMap<EntryId, LedgerEntry>,
    order: Vec<EntryId>,
    next_id: EntryId,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
            next_id: 1,
        }
    }

    /// Hands out the next id. Ids are never handed out twice, even across a reset.
    pub fn allocate_id(&mut self) -> EntryId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn insert(&mut self, entry: LedgerEntry) -> Result<(), LedgerError> {
        let id = entry.id();
        if self.entries.contains_key(&id) {
            return Err(LedgerError::IdentityCollision(id));
        }
        self.entries.insert(id, entry);
        self.order.push(id);
        Ok(())
    }

    pub fn get(&self, id: EntryId) -> Option<&LedgerEntry> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut LedgerEntry> {
        self.entries.get_mut(&id)
    }

    /// Entries in insertion order, optionally restricted to one kind.
    pub fn entries(&self, kind: Option<EntryKind>) -> impl Iterator<Item = &LedgerEntry> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id))
            .filter(move |e| kind.is_none_or(|k| e.kind() == k))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(any(test, feature = "test-util"))]
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
