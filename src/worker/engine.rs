//! Shared handle over one ledger.
//!
//! Every mutation runs its whole validate-then-apply sequence under the write
//! lock, so concurrent creations never share an id and concurrent
//! contributions are never lost. Reads take the read lock and hand back
//! cloned snapshots.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{
    common::{
        error::LedgerError,
        event::{LedgerCommand, NewEntry},
        money::Money,
    },
    domain::{
        entry::{Allocation, EntryId, EntryKind, LedgerEntry},
        ledger::Ledger,
    },
    worker::{
        handlers::{contribute, create, mark_paid},
        processor::{Outcome, Processor},
    },
};

#[derive(Debug, Clone, Default)]
pub struct Engine {
    ledger: Arc<RwLock<Ledger>>,
    processor: Processor,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_processor(processor: Processor) -> Self {
        Self {
            ledger: Arc::default(),
            processor,
        }
    }

    /// Runs a command and reports the full outcome, including whether a
    /// settlement changed anything.
    pub fn execute(&self, command: LedgerCommand) -> Result<Outcome, LedgerError> {
        match command {
            LedgerCommand::List { kind } => Ok(Outcome::Entries(self.list_entries(kind))),
            command => {
                let mut ledger = self.write();
                self.processor.process(&mut ledger, command)
            }
        }
    }

    pub fn create_entry(&self, request: NewEntry) -> Result<LedgerEntry, LedgerError> {
        let mut ledger = self.write();
        create::handle(&mut ledger, request, self.processor.now())
    }

    /// All entries in creation order, optionally restricted to one kind.
    pub fn list_entries(&self, kind: Option<EntryKind>) -> Vec<LedgerEntry> {
        self.read().entries(kind).cloned().collect()
    }

    /// Entries that still have something owed or left to save.
    pub fn list_outstanding(&self, kind: Option<EntryKind>) -> Vec<LedgerEntry> {
        self.read()
            .entries(kind)
            .filter(|e| !e.is_settled())
            .cloned()
            .collect()
    }

    pub fn find_by_id(&self, id: EntryId) -> Result<LedgerEntry, LedgerError> {
        self.read()
            .get(id)
            .cloned()
            .ok_or(LedgerError::EntryNotFound(id))
    }

    pub fn mark_paid(&self, id: EntryId, name: &str) -> Result<Vec<Allocation>, LedgerError> {
        let mut ledger = self.write();
        let (_, allocations) = mark_paid::handle(&mut ledger, id, name)?;
        Ok(allocations)
    }

    pub fn contribute(
        &self,
        id: EntryId,
        name: &str,
        amount: Money,
    ) -> Result<Vec<Allocation>, LedgerError> {
        let mut ledger = self.write();
        let (_, allocations) = contribute::handle(&mut ledger, id, name, amount)?;
        Ok(allocations)
    }

    /// Sum of contributions towards a goal.
    pub fn total_saved(&self, id: EntryId) -> Result<Money, LedgerError> {
        let ledger = self.read();
        let entry = ledger.get(id).ok_or(LedgerError::EntryNotFound(id))?;
        entry.total_saved().ok_or(LedgerError::SettlementMismatch {
            entry: id,
            kind: entry.kind(),
        })
    }

    /// Drops every entry. Ids handed out before the reset stay retired.
    #[cfg(any(test, feature = "test-util"))]
    pub fn reset_all(&self) {
        self.write().clear();
    }

    // Handlers validate before mutating, so a guard recovered from a
    // poisoned lock never holds a half-applied change.
    fn read(&self) -> RwLockReadGuard<'_, Ledger> {
        self.ledger.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Ledger> {
        self.ledger.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::thread;

    use super::*;
    use crate::domain::entry::PaymentStatus;

    fn bill(owner: &str, names: &[&str], cents: i64) -> NewEntry {
        NewEntry {
            kind: EntryKind::Bill,
            label: "Utilities".into(),
            total: Money::from_cents(cents),
            owner: owner.into(),
            participants: names.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn goal(owner: &str, names: &[&str], cents: i64) -> NewEntry {
        NewEntry {
            kind: EntryKind::Goal,
            ..bill(owner, names, cents)
        }
    }

    #[test]
    fn burst_creation_across_threads_yields_distinct_ids() {
        let engine = Engine::new();

        let ids: Vec<EntryId> = thread::scope(|s| {
            let workers: Vec<_> = (0..8)
                .map(|_| {
                    let engine = engine.clone();
                    s.spawn(move || {
                        (0..125)
                            .map(|_| engine.create_entry(bill("Alex", &["Sam"], 1000)).unwrap().id())
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            workers
                .into_iter()
                .flat_map(|w| w.join().unwrap())
                .collect()
        });

        let distinct: HashSet<EntryId> = ids.iter().copied().collect();
        assert_eq!(ids.len(), 1000);
        assert_eq!(distinct.len(), 1000);
        assert_eq!(engine.list_entries(None).len(), 1000);
    }

    #[test]
    fn concurrent_contributions_are_all_applied() {
        let engine = Engine::new();
        let id = engine
            .create_entry(goal("Alex", &["Alex", "Sam"], 10_000))
            .unwrap()
            .id();

        thread::scope(|s| {
            for _ in 0..4 {
                let engine = engine.clone();
                s.spawn(move || {
                    for _ in 0..50 {
                        engine.contribute(id, "Sam", Money::from_cents(1)).unwrap();
                    }
                });
            }
        });

        let entry = engine.find_by_id(id).unwrap();
        assert_eq!(
            entry.allocation("Sam").unwrap().contributed(),
            Some(Money::from_cents(200))
        );
        assert_eq!(engine.total_saved(id).unwrap(), Money::from_cents(200));
    }

    #[test]
    fn outstanding_hides_settled_entries() {
        let engine = Engine::new();
        let paid = engine.create_entry(bill("Alex", &["Sam"], 2000)).unwrap().id();
        let open = engine
            .create_entry(bill("Alex", &["Sam", "Jordan"], 3000))
            .unwrap()
            .id();

        engine.mark_paid(paid, "Sam").unwrap();
        engine.mark_paid(open, "Sam").unwrap();

        let outstanding: Vec<EntryId> = engine
            .list_outstanding(Some(EntryKind::Bill))
            .iter()
            .map(LedgerEntry::id)
            .collect();
        assert_eq!(outstanding, vec![open]);

        let entry = engine.find_by_id(open).unwrap();
        let pending: Vec<&str> = entry.outstanding().map(|a| a.participant()).collect();
        assert_eq!(pending, vec!["Jordan"]);
    }

    #[test]
    fn snapshots_do_not_follow_later_mutations() {
        let engine = Engine::new();
        let id = engine
            .create_entry(bill("Alex", &["Alex", "Sam"], 5000))
            .unwrap()
            .id();

        let before = engine.find_by_id(id).unwrap();
        engine.mark_paid(id, "Sam").unwrap();

        assert_eq!(
            before.allocation("Sam").unwrap().status(),
            Some(PaymentStatus::Pending)
        );
        assert_eq!(
            engine.find_by_id(id).unwrap().allocation("Sam").unwrap().status(),
            Some(PaymentStatus::Paid)
        );
    }

    #[test]
    fn total_saved_is_only_defined_for_goals() {
        let engine = Engine::new();
        let id = engine.create_entry(bill("Alex", &["Sam"], 2000)).unwrap().id();

        assert!(matches!(
            engine.total_saved(id),
            Err(LedgerError::SettlementMismatch { .. })
        ));
        assert_eq!(
            engine.total_saved(99).unwrap_err(),
            LedgerError::EntryNotFound(99)
        );
    }

    #[test]
    fn reset_clears_entries_but_never_reuses_ids() {
        let engine = Engine::new();
        let first = engine.create_entry(bill("Alex", &["Sam"], 2000)).unwrap().id();

        engine.reset_all();
        assert!(engine.list_entries(None).is_empty());
        assert_eq!(
            engine.find_by_id(first).unwrap_err(),
            LedgerError::EntryNotFound(first)
        );

        let second = engine.create_entry(bill("Alex", &["Sam"], 2000)).unwrap().id();
        assert_ne!(first, second);
    }

    #[test]
    fn clones_share_one_ledger() {
        let engine = Engine::new();
        let other = engine.clone();

        let id = engine
            .create_entry(goal("Alex", &["Sam"], 4000))
            .unwrap()
            .id();
        other.contribute(id, "Sam", Money::from_cents(500)).unwrap();

        assert_eq!(engine.total_saved(id).unwrap(), Money::from_cents(500));
    }
}
