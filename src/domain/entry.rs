use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::{
    common::{error::LedgerError, money::Money},
    domain::participants::Participants,
};

pub type EntryId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Bill,
    Subscription,
    Expense,
    Goal,
}

impl EntryKind {
    pub const ALL: [EntryKind; 4] = [
        EntryKind::Bill,
        EntryKind::Subscription,
        EntryKind::Expense,
        EntryKind::Goal,
    ];

    /// Debt entries settle per participant through Pending/Paid; goals accumulate contributions.
    pub fn is_debt(self) -> bool {
        !matches!(self, EntryKind::Goal)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Bill => "bill",
            EntryKind::Subscription => "subscription",
            EntryKind::Expense => "expense",
            EntryKind::Goal => "goal",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = s.trim().to_ascii_lowercase();
        EntryKind::ALL
            .into_iter()
            .find(|k| k.as_str() == kind)
            .ok_or_else(|| LedgerError::UnknownKind(s.trim().to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Pending => f.write_str("pending"),
            PaymentStatus::Paid => f.write_str("paid"),
        }
    }
}

/// Settlement state of one allocation. Which variant applies follows the entry kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Settlement {
    Debt { status: PaymentStatus },
    Contribution { contributed: Money },
}

/// Whether a settlement operation changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementOutcome {
    Changed,
    Unchanged,
}

/// Who an allocation is owed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwedTo {
    Owner(String),
    /// The goal itself, for contribution entries.
    Goal,
}

impl fmt::Display for OwedTo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwedTo::Owner(name) => f.write_str(name),
            OwedTo::Goal => f.write_str("goal"),
        }
    }
}

impl Serialize for OwedTo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One participant's share within an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allocation {
    participant: String,
    owed_to: OwedTo,
    share: Money,
    #[serde(flatten)]
    settlement: Settlement,
}

impl Allocation {
    pub(crate) fn debt(participant: String, owner: &str, share: Money) -> Self {
        Self {
            participant,
            owed_to: OwedTo::Owner(owner.to_string()),
            share,
            settlement: Settlement::Debt {
                status: PaymentStatus::Pending,
            },
        }
    }

    pub(crate) fn contribution(participant: String, share: Money) -> Self {
        Self {
            participant,
            owed_to: OwedTo::Goal,
            share,
            settlement: Settlement::Contribution {
                contributed: Money::zero(),
            },
        }
    }

    pub fn participant(&self) -> &str {
        &self.participant
    }

    pub fn owed_to(&self) -> &OwedTo {
        &self.owed_to
    }

    pub fn share(&self) -> Money {
        self.share
    }

    pub fn settlement(&self) -> Settlement {
        self.settlement
    }

    pub fn status(&self) -> Option<PaymentStatus> {
        match self.settlement {
            Settlement::Debt { status } => Some(status),
            Settlement::Contribution { .. } => None,
        }
    }

    pub fn contributed(&self) -> Option<Money> {
        match self.settlement {
            Settlement::Contribution { contributed } => Some(contributed),
            Settlement::Debt { .. } => None,
        }
    }

    /// Amount still missing towards the target share. Never negative.
    pub fn remaining(&self) -> Money {
        match self.settlement {
            Settlement::Debt {
                status: PaymentStatus::Paid,
            } => Money::zero(),
            Settlement::Debt {
                status: PaymentStatus::Pending,
            } => self.share,
            Settlement::Contribution { contributed } if contributed >= self.share => Money::zero(),
            Settlement::Contribution { contributed } => self.share - contributed,
        }
    }

    pub fn is_outstanding(&self) -> bool {
        self.remaining().is_positive()
    }

    /// Pending -> Paid. Paid is terminal, so a repeat is a no-op.
    /// Returns `None` for contribution allocations.
    pub(crate) fn mark_paid(&mut self) -> Option<SettlementOutcome> {
        match &mut self.settlement {
            Settlement::Debt { status } if *status == PaymentStatus::Paid => {
                Some(SettlementOutcome::Unchanged)
            }
            Settlement::Debt { status } => {
                *status = PaymentStatus::Paid;
                Some(SettlementOutcome::Changed)
            }
            Settlement::Contribution { .. } => None,
        }
    }

    /// Returns `None` for debt allocations, and when the new running total
    /// would not fit; in both cases nothing changes.
    pub(crate) fn add_contribution(&mut self, amount: Money) -> Option<SettlementOutcome> {
        match &mut self.settlement {
            Settlement::Contribution { contributed } => {
                *contributed = contributed.checked_add(amount)?;
                Some(SettlementOutcome::Changed)
            }
            Settlement::Debt { .. } => None,
        }
    }
}

/// One shared obligation: a bill, a subscription charge, an expense or a savings goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    pub(crate) id: EntryId,
    pub(crate) kind: EntryKind,
    pub(crate) label: String,
    pub(crate) total: Money,
    pub(crate) owner: String,
    pub(crate) participants: Participants,
    pub(crate) allocations: Vec<Allocation>,
    pub(crate) created_at: DateTime<Utc>,
}

impl LedgerEntry {
    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn participants(&self) -> &Participants {
        &self.participants
    }

    pub fn allocations(&self) -> &[Allocation] {
        &self.allocations
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn allocation(&self, name: &str) -> Option<&Allocation> {
        self.allocations.iter().find(|a| a.participant == name)
    }

    pub(crate) fn allocation_mut(&mut self, name: &str) -> Option<&mut Allocation> {
        self.allocations.iter_mut().find(|a| a.participant == name)
    }

    /// Allocations that still owe something: pending debts, or goal shares not yet reached.
    pub fn outstanding(&self) -> impl Iterator<Item = &Allocation> {
        self.allocations.iter().filter(|a| a.is_outstanding())
    }

    pub fn is_settled(&self) -> bool {
        self.outstanding().next().is_none()
    }

    /// Sum of contributions for a goal, computed on every read.
    ///
    /// `None` for debt entries, or if the sum does not fit (contributions are
    /// refused before that can happen).
    pub fn total_saved(&self) -> Option<Money> {
        if self.kind.is_debt() {
            return None;
        }
        self.allocations
            .iter()
            .filter_map(Allocation::contributed)
            .try_fold(Money::zero(), Money::checked_add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("Bill".parse::<EntryKind>().unwrap(), EntryKind::Bill);
        assert_eq!(
            " SUBSCRIPTION ".parse::<EntryKind>().unwrap(),
            EntryKind::Subscription
        );
        assert_eq!("goal".parse::<EntryKind>().unwrap(), EntryKind::Goal);
        assert_eq!(
            "loan".parse::<EntryKind>().unwrap_err(),
            LedgerError::UnknownKind("loan".into())
        );
    }

    #[test]
    fn only_goal_is_contribution_based() {
        assert!(EntryKind::Bill.is_debt());
        assert!(EntryKind::Subscription.is_debt());
        assert!(EntryKind::Expense.is_debt());
        assert!(!EntryKind::Goal.is_debt());
    }

    #[test]
    fn debt_allocation_mark_paid_is_idempotent() {
        let mut a = Allocation::debt("Sam".into(), "Alex", Money::from_cents(3000));
        assert_eq!(a.status(), Some(PaymentStatus::Pending));
        assert_eq!(a.remaining(), Money::from_cents(3000));

        assert_eq!(a.mark_paid(), Some(SettlementOutcome::Changed));
        assert_eq!(a.mark_paid(), Some(SettlementOutcome::Unchanged));
        assert_eq!(a.status(), Some(PaymentStatus::Paid));
        assert_eq!(a.share(), Money::from_cents(3000));
        assert_eq!(a.remaining(), Money::zero());
        assert_eq!(a.add_contribution(Money::from_cents(1)), None);
    }

    #[test]
    fn contribution_allocation_accumulates_and_allows_overshoot() {
        let mut a = Allocation::contribution("Sam".into(), Money::from_cents(5000));
        assert_eq!(a.owed_to(), &OwedTo::Goal);

        a.add_contribution(Money::from_cents(4000));
        assert_eq!(a.remaining(), Money::from_cents(1000));

        a.add_contribution(Money::from_cents(3000));
        assert_eq!(a.contributed(), Some(Money::from_cents(7000)));
        assert_eq!(a.remaining(), Money::zero());
        assert!(!a.is_outstanding());
        assert_eq!(a.mark_paid(), None);
    }

    #[test]
    fn contribution_that_would_overflow_leaves_total_untouched() {
        let mut a = Allocation::contribution("Sam".into(), Money::from_cents(5000));
        a.add_contribution(Money::from_cents(i64::MAX - 10));

        assert_eq!(a.add_contribution(Money::from_cents(11)), None);
        assert_eq!(a.contributed(), Some(Money::from_cents(i64::MAX - 10)));
    }

    #[test]
    fn allocation_serializes_variant_fields_inline() {
        let debt = Allocation::debt("Sam".into(), "Alex", Money::from_cents(3000));
        assert_eq!(
            serde_json::to_value(&debt).unwrap(),
            serde_json::json!({
                "participant": "Sam",
                "owed_to": "Alex",
                "share": "30.00",
                "status": "pending"
            })
        );

        let goal = Allocation::contribution("Sam".into(), Money::from_cents(5000));
        assert_eq!(
            serde_json::to_value(&goal).unwrap(),
            serde_json::json!({
                "participant": "Sam",
                "owed_to": "goal",
                "share": "50.00",
                "contributed": "0.00"
            })
        );
    }
}
