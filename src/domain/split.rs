//! Split calculator.
//!
//! Every participant receives the same share: `total / n` rounded half away
//! from zero to whole cents. The rounding remainder is not redistributed, so
//! `share * n` may miss `total` by up to half a cent per participant.

use crate::{
    common::{error::LedgerError, money::Money},
    domain::participants::Participants,
};

/// Per-participant share of `total` split `count` ways.
pub fn share_of(total: Money, count: usize) -> Result<Money, LedgerError> {
    if !total.is_positive() {
        return Err(LedgerError::InvalidAmount(format!(
            "total must be positive, got {total}"
        )));
    }
    if count == 0 {
        return Err(LedgerError::InvalidParticipants(
            "participant list is empty".into(),
        ));
    }

    let cents = total.as_cents();
    let n = i64::try_from(count)
        .map_err(|_| LedgerError::InvalidParticipants("too many participants".into()))?;
    let (q, r) = (cents / n, cents % n);
    // half away from zero; cents and n are both positive here
    let rounded = if 2 * r >= n { q + 1 } else { q };

    Ok(Money::from_cents(rounded))
}

/// Computes the allocation targets for an entry.
///
/// The owner always counts towards the denominator. With `exclude_owner` set
/// (debt entries) the owner is left out of the result; otherwise everyone,
/// owner included, gets a share. Output keeps participant order.
pub fn compute_split(
    total: Money,
    participants: &Participants,
    exclude_owner: bool,
    owner: &str,
) -> Result<Vec<(String, Money)>, LedgerError> {
    let share = share_of(total, participants.len())?;

    Ok(participants
        .iter()
        .filter(|name| !(exclude_owner && *name == owner))
        .map(|name| (name.to_string(), share))
        .collect())
}

/// Whether `share * count` reconciles with `total` within half a cent per participant.
pub fn within_tolerance(total: Money, share: Money, count: usize) -> bool {
    let Ok(n) = i64::try_from(count) else {
        return false;
    };
    let drift = (total - share * n).as_cents().abs();
    2 * drift <= n
}
