use crate::domain::entry::{EntryId, EntryKind};

/// Coarse error class an adapter maps to a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Malformed input. Raised before any mutation.
    Validation,
    /// Unknown entry id or participant name. The store is unchanged.
    NotFound,
    /// Identity generation failed to produce a fresh id.
    Concurrency,
}

/// Errors returned by the ledger engine.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("invalid participants: {0}")]
    InvalidParticipants(String),
    #[error("unknown entry kind: {0}")]
    UnknownKind(String),
    #[error("entry {entry} is a {kind} and does not support this settlement")]
    SettlementMismatch { entry: EntryId, kind: EntryKind },
    #[error("entry {0} not found")]
    EntryNotFound(EntryId),
    #[error("participant {name} not found in entry {entry}")]
    ParticipantNotFound { entry: EntryId, name: String },
    #[error("entry id {0} already assigned")]
    IdentityCollision(EntryId),
}

impl LedgerError {
    pub fn class(&self) -> ErrorClass {
        match self {
            LedgerError::InvalidAmount(_)
            | LedgerError::InvalidParticipants(_)
            | LedgerError::UnknownKind(_)
            | LedgerError::SettlementMismatch { .. } => ErrorClass::Validation,
            LedgerError::EntryNotFound(_) | LedgerError::ParticipantNotFound { .. } => {
                ErrorClass::NotFound
            }
            LedgerError::IdentityCollision(_) => ErrorClass::Concurrency,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("missing input csv path. usage: split_ledger <commands.csv>")]
    MissingArg,
    #[error("failed to open input file: {0}")]
    OpenInput(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("settings error: {0}")]
    Settings(#[from] config::ConfigError),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}
