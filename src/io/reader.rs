use crate::{
    common::{
        event::{LedgerCommand, NewEntry},
        money::Money,
    },
    domain::entry::{EntryId, EntryKind},
};
use std::{io::Read, str::FromStr};

/// Separator between names in the `participants` column.
pub const PARTICIPANT_SEPARATOR: char = ';';

#[derive(serde::Deserialize)]
/// Internal CSV row representation matching the input headers. Columns an
/// operation does not use stay empty.
struct CsvRow {
    op: String,
    kind: Option<String>,
    id: Option<EntryId>,
    label: Option<String>,
    amount: Option<String>,
    owner: Option<String>,
    participants: Option<String>,
    name: Option<String>,
}

/// Reads and validates command rows from a CSV reader.
///
/// Supported headers: `op,kind,id,label,amount,owner,participants,name`.
/// Operations are `create`, `pay` and `contribute`, matched
/// case-insensitively. Participants are separated by `;`. Errors carry the
/// row's operation and entry id.
///
/// # Examples
///
/// ```
/// use split_ledger::io::reader::read_commands;
/// use split_ledger::common::event::LedgerCommand;
/// use csv::ReaderBuilder;
///
/// let data = "op,kind,id,label,amount,owner,participants,name\n\
/// create,bill,,Dinner,90.00,Alex,Alex;Sam;Jordan,\n\
/// pay,,1,,,,,Sam\n";
/// let mut rdr = ReaderBuilder::new().from_reader(data.as_bytes());
/// let commands: Vec<_> = read_commands(&mut rdr).collect();
///
/// assert!(matches!(commands[0], Ok(LedgerCommand::Create(_))));
/// assert!(matches!(commands[1], Ok(LedgerCommand::MarkPaid { entry: 1, .. })));
/// ```
pub fn read_commands<R: Read>(
    rdr: &mut csv::Reader<R>,
) -> impl Iterator<Item = Result<LedgerCommand, String>> + '_ {
    rdr.deserialize::<CsvRow>().map(|res| {
        let row = res.map_err(|e| e.to_string())?;
        let op = row.op.trim().to_ascii_lowercase();

        match op.as_str() {
            "create" => {
                let kind = required(row.kind, "kind", &op, row.id)?;
                let kind = EntryKind::from_str(&kind).map_err(|e| e.to_string())?;
                let amount = required(row.amount, "amount", &op, row.id)?;
                let total = Money::from_str(&amount).map_err(|e| e.to_string())?;
                let owner = required(row.owner, "owner", &op, row.id)?;
                let participants = row
                    .participants
                    .as_deref()
                    .map(split_participants)
                    .unwrap_or_default();

                Ok(LedgerCommand::Create(NewEntry {
                    kind,
                    label: row.label.unwrap_or_default(),
                    total,
                    owner,
                    participants,
                }))
            }
            "pay" => {
                let entry = row
                    .id
                    .ok_or_else(|| format!("{op} missing id"))?;
                let name = required(row.name, "name", &op, row.id)?;
                Ok(LedgerCommand::MarkPaid { entry, name })
            }
            "contribute" => {
                let entry = row
                    .id
                    .ok_or_else(|| format!("{op} missing id"))?;
                let name = required(row.name, "name", &op, row.id)?;
                let amount = required(row.amount, "amount", &op, row.id)?;
                let amount = Money::from_str(&amount).map_err(|e| e.to_string())?;
                Ok(LedgerCommand::Contribute {
                    entry,
                    name,
                    amount,
                })
            }
            other => Err(format!("unknown operation: {other}")),
        }
    })
}

fn required(
    value: Option<String>,
    field: &str,
    op: &str,
    id: Option<EntryId>,
) -> Result<String, String> {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(v) => Ok(v),
        None => match id {
            Some(id) => Err(format!("{op} missing {field} for entry {id}")),
            None => Err(format!("{op} missing {field}")),
        },
    }
}

/// An empty column is an empty list. Blank names between separators are kept
/// so that validation rejects them.
fn split_participants(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(PARTICIPANT_SEPARATOR)
        .map(str::trim)
        .map(String::from)
        .collect()
}
