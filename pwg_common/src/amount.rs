use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul},
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

use crate::{multiplier::DecimalMultiplier, op::op};

/// Number of integer sub-units in one whole currency unit. Every amount that
/// crosses a crate boundary inside the gateway is expressed at this scale.
pub const SUBUNITS_PER_UNIT: i64 = 10_000;

//--------------------------------------      Amount       -----------------------------------------------------------
/// A monetary value in the gateway's canonical fixed-point representation,
/// 10,000 sub-units per unit.
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct Amount(i64);

op!(binary Amount, Add, add);
op!(binary Amount, Sub, sub);
op!(inplace Amount, SubAssign, sub_assign);
op!(unary Amount, Neg, neg);

impl Mul<i64> for Amount {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self::from(self.value() * rhs)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented as a wallet amount: {0}")]
pub struct AmountConversionError(String);

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl PartialEq for Amount {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Amount {}

impl TryFrom<u64> for Amount {
    type Error = AmountConversionError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value > i64::MAX as u64 {
            Err(AmountConversionError(format!("Value {} is too large to convert to an Amount", value)))
        } else {
            #[allow(clippy::cast_possible_wrap)]
            Ok(Self(value as i64))
        }
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let units = self.0 as f64 / SUBUNITS_PER_UNIT as f64;
        write!(f, "{units:0.4}")
    }
}

impl Amount {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn from_units(units: i64) -> Self {
        Self(units * SUBUNITS_PER_UNIT)
    }

    /// The integer this amount is written as on a tenant's wire, given the
    /// tenant's declared scale. Fractional sub-units are truncated.
    ///
    /// Identity when the tenant scale matches the canonical scale.
    pub fn to_provider_scale(self, multiplier: DecimalMultiplier) -> i64 {
        let m = multiplier.value();
        if m == SUBUNITS_PER_UNIT {
            return self.0;
        }
        self.0 * SUBUNITS_PER_UNIT / m
    }

    /// Canonical amount for an integer read off a tenant's wire.
    pub fn from_provider_scale(raw: i64, multiplier: DecimalMultiplier) -> Self {
        let m = multiplier.value();
        if m == SUBUNITS_PER_UNIT {
            return Self(raw);
        }
        Self(raw * m / SUBUNITS_PER_UNIT)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const ALL_MULTIPLIERS: [DecimalMultiplier; 5] = [
        DecimalMultiplier::One,
        DecimalMultiplier::Ten,
        DecimalMultiplier::Hundred,
        DecimalMultiplier::Thousand,
        DecimalMultiplier::TenThousand,
    ];

    #[test]
    fn arithmetic() {
        let a = Amount::from(1_500);
        let b = Amount::from(500);
        assert_eq!(a + b, Amount::from(2_000));
        assert_eq!(a - b, Amount::from(1_000));
        assert_eq!(-a, Amount::from(-1_500));
        assert_eq!(b * 3, Amount::from(1_500));
        assert_eq!([a, b, b].into_iter().sum::<Amount>(), Amount::from(2_500));
    }

    #[test]
    fn from_units_is_canonical_scale() {
        assert_eq!(Amount::from_units(3).value(), 30_000);
    }

    #[test]
    fn provider_scale_round_trips() {
        for m in ALL_MULTIPLIERS {
            for raw in [0i64, 1, 7, 999, 10_000, 500_000, 123_456_789] {
                let a = Amount::from(raw);
                let wire = a.to_provider_scale(m);
                assert_eq!(Amount::from_provider_scale(wire, m), a, "round trip failed for {raw} at x{}", m.value());
            }
        }
    }

    #[test]
    fn canonical_multiplier_is_identity() {
        let a = Amount::from(12_345);
        assert_eq!(a.to_provider_scale(DecimalMultiplier::TenThousand), 12_345);
        assert_eq!(Amount::from_provider_scale(12_345, DecimalMultiplier::TenThousand), a);
    }

    #[test]
    fn hundred_scale_example() {
        // A tenant working in cents sees 10,000/100 = 100x larger integers.
        let stake = Amount::from(500_000);
        assert_eq!(stake.to_provider_scale(DecimalMultiplier::Hundred), 50_000_000);
    }

    #[test]
    fn inbound_truncation() {
        // 55 tenth-units are 55 * 10 / 10,000 sub-units; the fraction is dropped.
        assert_eq!(Amount::from_provider_scale(55, DecimalMultiplier::Ten).value(), 0);
        assert_eq!(Amount::from_provider_scale(5_500, DecimalMultiplier::Ten).value(), 5);
    }

    #[test]
    fn display_in_whole_units() {
        assert_eq!(Amount::from(15_000).to_string(), "1.5000");
        assert_eq!(Amount::from(-5_000).to_string(), "-0.5000");
    }
}
