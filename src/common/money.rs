use bigdecimal::{BigDecimal, FromPrimitive, ParseBigDecimalError, RoundingMode, ToPrimitive};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Number of minor units per major unit. Amounts carry exactly two fractional digits.
pub const SCALE: i64 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// A monetary value stored in cents.
///
/// Every amount the ledger handles (entry totals, shares, contributions) is a
/// `Money`. Keeping the value as an integer number of cents makes sums and
/// comparisons exact; rounding happens once, when text or a float is turned
/// into a `Money`, and it always rounds half away from zero.
///
/// # Examples
/// ```
/// use split_ledger::common::money::Money;
///
/// let amount: Money = "33.335".parse().unwrap();
/// assert_eq!(amount.as_cents(), 3334);
/// assert_eq!(amount.to_string(), "33.34");
/// ```
pub struct Money(i64);

impl Money {
    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub fn zero() -> Self {
        Money(0)
    }

    pub fn as_cents(&self) -> i64 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// `None` when the sum does not fit.
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Converts a float coming from a loosely typed adapter (JSON numbers).
    ///
    /// Fails for `NaN` and infinities.
    pub fn try_from_f64(value: f64) -> Result<Self, ParseBigDecimalError> {
        let bd = BigDecimal::from_f64(value)
            .ok_or_else(|| ParseBigDecimalError::Other(format!("non-finite amount: {value}")))?;
        Self::from_decimal(bd)
    }

    pub fn to_string_2dp(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = SCALE.unsigned_abs();
        format!("{sign}{}.{:02}", abs / scale, abs % scale)
    }

    fn from_decimal(bd: BigDecimal) -> Result<Self, ParseBigDecimalError> {
        let scaled = (bd * BigDecimal::from(SCALE)).with_scale_round(0, RoundingMode::HalfUp);
        let value: i64 = scaled
            .to_i64()
            .ok_or_else(|| ParseBigDecimalError::Other("amount overflow".into()))?;

        Ok(Money(value))
    }
}

impl std::str::FromStr for Money {
    type Err = ParseBigDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.is_empty() {
            return Err(ParseBigDecimalError::Other("empty amount".into()));
        }

        let bd: BigDecimal = t.parse()?;
        Self::from_decimal(bd)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_2dp())
    }
}

impl serde::Serialize for Money {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_2dp())
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Mul<i64> for Money {
    type Output = Money;
    fn mul(self, rhs: i64) -> Money {
        Money(self.0 * rhs)
    }
}
