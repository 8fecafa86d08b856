use chrono::{DateTime, Utc};

use crate::{
    common::{error::LedgerError, event::NewEntry},
    domain::{
        entry::{Allocation, LedgerEntry},
        ledger::Ledger,
        participants::Participants,
        split,
    },
};

/// Validates the request, splits the total and stores the new entry.
///
/// Nothing is written to the ledger unless every check passes.
pub fn handle(
    ledger: &mut Ledger,
    request: NewEntry,
    now: DateTime<Utc>,
) -> Result<LedgerEntry, LedgerError> {
    let participants = Participants::normalize(&request.owner, &request.participants)?;
    let owner = request.owner.trim().to_string();
    let debt = request.kind.is_debt();

    let allocations = split::compute_split(request.total, &participants, debt, &owner)?
        .into_iter()
        .map(|(name, share)| {
            if debt {
                Allocation::debt(name, &owner, share)
            } else {
                Allocation::contribution(name, share)
            }
        })
        .collect();

    let entry = LedgerEntry {
        id: ledger.allocate_id(),
        kind: request.kind,
        label: request.label.trim().to_string(),
        total: request.total,
        owner,
        participants,
        allocations,
        created_at: now,
    };

    ledger.insert(entry.clone())?;
    Ok(entry)
}
