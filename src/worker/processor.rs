use chrono::{DateTime, Utc};

use crate::{
    common::{error::LedgerError, event::LedgerCommand},
    domain::{
        entry::{Allocation, LedgerEntry, SettlementOutcome},
        ledger::Ledger,
    },
    worker::handlers::{contribute, create, mark_paid},
};

/// Result of a processed command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Created(LedgerEntry),
    Entries(Vec<LedgerEntry>),
    Settled {
        outcome: SettlementOutcome,
        allocations: Vec<Allocation>,
    },
}

/// Routes commands to their handlers. Holds the clock used to stamp new entries.
#[derive(Debug, Clone, Copy)]
pub struct Processor {
    clock: fn() -> DateTime<Utc>,
}

impl Default for Processor {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor {
    pub fn new() -> Self {
        Self { clock: Utc::now }
    }

    pub fn with_clock(clock: fn() -> DateTime<Utc>) -> Self {
        Self { clock }
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    pub fn process(
        &self,
        ledger: &mut Ledger,
        command: LedgerCommand,
    ) -> Result<Outcome, LedgerError> {
        match command {
            LedgerCommand::Create(request) => {
                create::handle(ledger, request, self.now()).map(Outcome::Created)
            }
            LedgerCommand::List { kind } => Ok(Outcome::Entries(
                ledger.entries(kind).cloned().collect(),
            )),
            LedgerCommand::MarkPaid { entry, name } => {
                let (outcome, allocations) = mark_paid::handle(ledger, entry, &name)?;
                Ok(Outcome::Settled {
                    outcome,
                    allocations,
                })
            }
            LedgerCommand::Contribute {
                entry,
                name,
                amount,
            } => {
                let (outcome, allocations) = contribute::handle(ledger, entry, &name, amount)?;
                Ok(Outcome::Settled {
                    outcome,
                    allocations,
                })
            }
        }
    }
}
