use std::collections::HashSet;

use serde::Serialize;

use crate::common::error::LedgerError;

/// Ordered, duplicate-free set of participant names that always contains the owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Participants(Vec<String>);

impl Participants {
    /// Builds the participant set for a new entry from the caller's list.
    ///
    /// Names are trimmed. The owner is appended when the caller left them out;
    /// the caller's list itself is never touched.
    pub fn normalize(owner: &str, requested: &[String]) -> Result<Self, LedgerError> {
        let owner = owner.trim();
        if owner.is_empty() {
            return Err(LedgerError::InvalidParticipants(
                "owner name is empty".into(),
            ));
        }
        if requested.is_empty() {
            return Err(LedgerError::InvalidParticipants(
                "participant list is empty".into(),
            ));
        }

        let mut seen = HashSet::with_capacity(requested.len() + 1);
        let mut names = Vec::with_capacity(requested.len() + 1);
        for raw in requested {
            let name = raw.trim();
            if name.is_empty() {
                return Err(LedgerError::InvalidParticipants(
                    "participant name is empty".into(),
                ));
            }
            if !seen.insert(name) {
                return Err(LedgerError::InvalidParticipants(format!(
                    "duplicate participant: {name}"
                )));
            }
            names.push(name.to_string());
        }

        if !seen.contains(owner) {
            names.push(owner.to_string());
        }

        Ok(Self(names))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}
