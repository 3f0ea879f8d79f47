use log::warn;

//--------------------------------------   DecimalMultiplier   -------------------------------------------------------
/// The scale a tenant's API expresses amounts in: how many integer sub-units
/// make up one whole unit on that tenant's wire.
///
/// Only these five scales exist in the wild. `value()` is total, so the
/// multiplier can never contribute a zero divisor to scale conversions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecimalMultiplier {
    #[default]
    One,
    Ten,
    Hundred,
    Thousand,
    TenThousand,
}

impl DecimalMultiplier {
    pub fn value(&self) -> i64 {
        match self {
            DecimalMultiplier::One => 1,
            DecimalMultiplier::Ten => 10,
            DecimalMultiplier::Hundred => 100,
            DecimalMultiplier::Thousand => 1_000,
            DecimalMultiplier::TenThousand => 10_000,
        }
    }

    /// Lenient mapping for values loaded from tenant configuration rows.
    /// Unrecognized values fall back to `One` with a logged warning.
    pub fn from_value(value: i64) -> Self {
        match value {
            1 => DecimalMultiplier::One,
            10 => DecimalMultiplier::Ten,
            100 => DecimalMultiplier::Hundred,
            1_000 => DecimalMultiplier::Thousand,
            10_000 => DecimalMultiplier::TenThousand,
            other => {
                warn!("Unrecognized decimal multiplier {other}, treating it as 1");
                DecimalMultiplier::One
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn values_round_trip() {
        for m in [
            DecimalMultiplier::One,
            DecimalMultiplier::Ten,
            DecimalMultiplier::Hundred,
            DecimalMultiplier::Thousand,
            DecimalMultiplier::TenThousand,
        ] {
            assert_eq!(DecimalMultiplier::from_value(m.value()), m);
        }
    }

    #[test]
    fn unknown_values_default_to_one() {
        assert_eq!(DecimalMultiplier::from_value(0), DecimalMultiplier::One);
        assert_eq!(DecimalMultiplier::from_value(250), DecimalMultiplier::One);
        assert_eq!(DecimalMultiplier::from_value(-10), DecimalMultiplier::One);
    }
}
