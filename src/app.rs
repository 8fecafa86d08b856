use std::io::{BufWriter, Read, Write, stdout};

use crate::{
    common::error::{AppError, ErrorClass},
    domain::entry::SettlementOutcome,
    io::{reader, writer},
    settings::Settings,
    worker::{engine::Engine, processor::Outcome},
};

/// Counts of commands the engine accepted and rejected during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub applied: usize,
    pub rejected: usize,
}

pub fn run<I, S>(args: I, settings: &Settings) -> Result<RunSummary, AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(|s| s.into()).collect();
    if args.len() < 2 {
        return Err(AppError::MissingArg);
    }
    let input_path = &args[1];

    let file = std::fs::File::open(input_path)?;
    let stdout = stdout();
    let writer = BufWriter::new(stdout.lock());
    run_commands(file, writer, settings)
}

/// Applies every command from `input` to a fresh ledger and writes the
/// resulting allocations to `output`.
///
/// Commands the engine rejects (validation or not-found) are logged and
/// skipped; malformed rows abort the run.
pub fn run_commands<R: Read, W: Write>(
    input: R,
    output: W,
    settings: &Settings,
) -> Result<RunSummary, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);
    let commands = reader::read_commands(&mut reader);

    let engine = Engine::new();
    let mut summary = RunSummary::default();

    for command in commands {
        let command = command.map_err(AppError::Parse)?;
        tracing::debug!(?command, "processing command");

        match engine.execute(command) {
            Ok(Outcome::Created(entry)) => {
                tracing::debug!(id = entry.id(), kind = %entry.kind(), "entry created");
                summary.applied += 1;
            }
            Ok(Outcome::Settled {
                outcome: SettlementOutcome::Unchanged,
                ..
            }) => {
                tracing::debug!("settlement already applied");
                summary.applied += 1;
            }
            Ok(_) => summary.applied += 1,
            Err(err) if err.class() == ErrorClass::Concurrency => return Err(err.into()),
            Err(err) => {
                tracing::warn!(error = %err, class = ?err.class(), "command rejected");
                summary.rejected += 1;
            }
        }
    }

    let entries = if settings.report.outstanding_only {
        engine.list_outstanding(None)
    } else {
        engine.list_entries(None)
    };
    writer::write_entries(output, &entries)?;

    tracing::info!(
        applied = summary.applied,
        rejected = summary.rejected,
        entries = entries.len(),
        "run complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_is_reported() {
        let err = run(["split_ledger"], &Settings::default()).unwrap_err();
        assert!(matches!(err, AppError::MissingArg));
    }

    #[test]
    fn unreadable_path_is_reported() {
        let err = run(
            ["split_ledger", "no/such/commands.csv"],
            &Settings::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::OpenInput(_)));
    }

    #[test]
    fn malformed_row_aborts() {
        let input = "op,kind,id,label,amount,owner,participants,name\nrefund,,1,,,,,Sam\n";
        let mut out = Vec::new();

        let err = run_commands(input.as_bytes(), &mut out, &Settings::default()).unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn blank_participant_name_is_rejected_not_dropped() {
        let input = "op,kind,id,label,amount,owner,participants,name\n\
                     create,bill,,Rent,1200,Alex,Sam;;,\n\
                     create,bill,,Rent,1200,Alex,Sam,\n";
        let mut out = Vec::new();

        let summary = run_commands(input.as_bytes(), &mut out, &Settings::default()).unwrap();
        assert_eq!(summary, RunSummary { applied: 1, rejected: 1 });
    }
}
