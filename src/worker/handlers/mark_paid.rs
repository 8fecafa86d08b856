use crate::{
    common::error::LedgerError,
    domain::{
        entry::{Allocation, EntryId, SettlementOutcome},
        ledger::Ledger,
    },
};

/// Marks `name`'s share of a debt entry as paid.
///
/// Paying an already paid share succeeds without changing anything.
pub fn handle(
    ledger: &mut Ledger,
    entry_id: EntryId,
    name: &str,
) -> Result<(SettlementOutcome, Vec<Allocation>), LedgerError> {
    let name = name.trim();
    let entry = ledger
        .get_mut(entry_id)
        .ok_or(LedgerError::EntryNotFound(entry_id))?;

    if !entry.kind().is_debt() {
        return Err(LedgerError::SettlementMismatch {
            entry: entry_id,
            kind: entry.kind(),
        });
    }

    let kind = entry.kind();
    let allocation = entry
        .allocation_mut(name)
        .ok_or_else(|| LedgerError::ParticipantNotFound {
            entry: entry_id,
            name: name.to_string(),
        })?;

    let outcome = allocation
        .mark_paid()
        .ok_or(LedgerError::SettlementMismatch {
            entry: entry_id,
            kind,
        })?;

    Ok((outcome, entry.allocations().to_vec()))
}
