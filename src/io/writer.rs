use std::io::Write;

use crate::domain::entry::LedgerEntry;

const HEADERS: [&str; 9] = [
    "id",
    "kind",
    "label",
    "owner",
    "participant",
    "owed_to",
    "share",
    "status",
    "contributed",
];

#[derive(serde::Serialize)]
/// Internal CSV output row, one per allocation.
///
/// Headers written (in this order):
/// `id,kind,label,owner,participant,owed_to,share,status,contributed`.
/// `status` is empty for goals and `contributed` is empty for debts.
struct OutputRow<'a> {
    id: u64,
    kind: &'a str,
    label: &'a str,
    owner: &'a str,
    participant: &'a str,
    owed_to: String,
    share: String,
    status: Option<String>,
    contributed: Option<String>,
}

/// Writes the allocations of `entries` to a CSV writer, in the order given.
///
/// The header row is always written. Amounts are formatted with exactly 2
/// decimal places. Entries without allocations (a payer splitting with
/// nobody) produce no rows.
///
/// # Errors
///
/// Returns a `csv::Error` if writing/serializing any row fails.
pub fn write_entries<'a, W, I>(writer: W, entries: I) -> Result<(), csv::Error>
where
    W: Write,
    I: IntoIterator<Item = &'a LedgerEntry>,
{
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(HEADERS)?;

    for entry in entries {
        for allocation in entry.allocations() {
            let row = OutputRow {
                id: entry.id(),
                kind: entry.kind().as_str(),
                label: entry.label(),
                owner: entry.owner(),
                participant: allocation.participant(),
                owed_to: allocation.owed_to().to_string(),
                share: allocation.share().to_string_2dp(),
                status: allocation.status().map(|s| s.to_string()),
                contributed: allocation.contributed().map(|c| c.to_string_2dp()),
            };
            wtr.serialize(row)?;
        }
    }

    wtr.flush()?;
    Ok(())
}
