use crate::{
    common::{error::LedgerError, money::Money},
    domain::{
        entry::{Allocation, EntryId, SettlementOutcome},
        ledger::Ledger,
    },
};

/// Adds `amount` to `name`'s running contribution towards a goal.
///
/// Contributions may exceed the participant's share.
pub fn handle(
    ledger: &mut Ledger,
    entry_id: EntryId,
    name: &str,
    amount: Money,
) -> Result<(SettlementOutcome, Vec<Allocation>), LedgerError> {
    let name = name.trim();
    let entry = ledger
        .get_mut(entry_id)
        .ok_or(LedgerError::EntryNotFound(entry_id))?;

    if entry.kind().is_debt() {
        return Err(LedgerError::SettlementMismatch {
            entry: entry_id,
            kind: entry.kind(),
        });
    }

    if !amount.is_positive() {
        return Err(LedgerError::InvalidAmount(format!(
            "contribution must be positive, got {amount}"
        )));
    }

    // every running total is bounded by the goal's total saved
    let overflow = || {
        LedgerError::InvalidAmount(format!(
            "contribution of {amount} overflows the saved total of entry {entry_id}"
        ))
    };
    entry
        .total_saved()
        .and_then(|saved| saved.checked_add(amount))
        .ok_or_else(overflow)?;

    let allocation = entry
        .allocation_mut(name)
        .ok_or_else(|| LedgerError::ParticipantNotFound {
            entry: entry_id,
            name: name.to_string(),
        })?;

    let outcome = allocation.add_contribution(amount).ok_or_else(overflow)?;

    Ok((outcome, entry.allocations().to_vec()))
}
