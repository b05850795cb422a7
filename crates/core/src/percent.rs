//! Percentage value object.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// A percentage constrained to `[0, 100]`.
///
/// Discount and tax rates are expressed with this type, so out-of-range
/// percentages are rejected at construction (the data-entry boundary) and
/// downstream arithmetic never has to re-validate. Deserialization goes
/// through the same check, so a decoded payload cannot smuggle in an
/// out-of-range rate either.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Decimal", try_from = "Decimal")]
pub struct Percent(Decimal);

impl Percent {
    pub const ZERO: Percent = Percent(Decimal::ZERO);

    /// Validate a raw decimal into a percentage.
    pub fn new(value: Decimal) -> DomainResult<Self> {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(DomainError::validation(format!(
                "percent must be between 0 and 100, got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// The raw percentage value (e.g. `18` for 18%).
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// The percentage as a multiplier (e.g. `0.18` for 18%).
    pub fn fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for Percent {
    fn default() -> Self {
        Self::ZERO
    }
}

impl ValueObject for Percent {}

impl From<Percent> for Decimal {
    fn from(value: Percent) -> Self {
        value.0
    }
}

impl TryFrom<Decimal> for Percent {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl core::fmt::Display for Percent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn accepts_bounds_inclusive() {
        assert!(Percent::new(dec!(0)).is_ok());
        assert!(Percent::new(dec!(100)).is_ok());
        assert!(Percent::new(dec!(18)).is_ok());
        assert!(Percent::new(dec!(12.5)).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        let err = Percent::new(dec!(-0.01)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        let err = Percent::new(dec!(100.01)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn deserialization_enforces_range() {
        let pct: Percent = serde_json::from_str("\"18.5\"").unwrap();
        assert_eq!(pct.value(), dec!(18.5));

        assert!(serde_json::from_str::<Percent>("\"150\"").is_err());
        assert!(serde_json::from_str::<Percent>("\"-1\"").is_err());
    }

    #[test]
    fn serializes_as_plain_decimal() {
        let pct = Percent::new(dec!(18)).unwrap();
        assert_eq!(serde_json::to_string(&pct).unwrap(), "\"18\"");
    }

    #[test]
    fn fraction_divides_by_one_hundred() {
        let pct = Percent::new(dec!(18)).unwrap();
        assert_eq!(pct.fraction(), dec!(0.18));
        assert_eq!(Percent::ZERO.fraction(), Decimal::ZERO);
    }
}
