use std::fmt;

use num_bigint::{BigInt, Sign};

/// A JSON integer of unbounded size.
///
/// Values whose magnitude fits into a `u64` are always stored inline, so two
/// equal integers compare equal regardless of how they were produced.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct JsonInteger {
    repr: Repr,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
enum Repr {
    Fixed { negative: bool, magnitude: u64 },
    Big(BigInt),
}

impl JsonInteger {
    pub const ZERO: Self = Self { repr: Repr::Fixed { negative: false, magnitude: 0 } };

    pub const fn from_parts(negative: bool, magnitude: u64) -> Self {
        Self { repr: Repr::Fixed { negative: negative && magnitude != 0, magnitude } }
    }

    pub fn from_bigint(value: BigInt) -> Self {
        match u64::try_from(value.magnitude()) {
            Ok(magnitude) => Self::from_parts(value.sign() == Sign::Minus, magnitude),
            Err(_) => Self { repr: Repr::Big(value) },
        }
    }

    /// Returns `true` if the magnitude exceeds `u64::MAX`.
    pub fn is_big(&self) -> bool {
        matches!(self.repr, Repr::Big(_))
    }

    pub fn is_negative(&self) -> bool {
        match &self.repr {
            Repr::Fixed { negative, .. } => *negative,
            Repr::Big(value) => value.sign() == Sign::Minus,
        }
    }

    pub fn to_u64(&self) -> Option<u64> {
        match self.repr {
            Repr::Fixed { negative: false, magnitude } => Some(magnitude),
            _ => None,
        }
    }

    pub fn to_i64(&self) -> Option<i64> {
        match self.repr {
            Repr::Fixed { negative, magnitude } => {
                let magnitude = i128::from(magnitude);
                i64::try_from(if negative { -magnitude } else { magnitude }).ok()
            }
            Repr::Big(_) => None,
        }
    }

    pub fn to_bigint(&self) -> BigInt {
        match &self.repr {
            Repr::Fixed { negative, magnitude } => {
                let value = BigInt::from(*magnitude);
                if *negative { -value } else { value }
            }
            Repr::Big(value) => value.clone(),
        }
    }
}

impl From<u64> for JsonInteger {
    fn from(value: u64) -> Self {
        Self::from_parts(false, value)
    }
}

impl From<i64> for JsonInteger {
    fn from(value: i64) -> Self {
        Self::from_parts(value < 0, value.unsigned_abs())
    }
}

impl From<BigInt> for JsonInteger {
    fn from(value: BigInt) -> Self {
        Self::from_bigint(value)
    }
}

impl fmt::Display for JsonInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Fixed { negative: true, magnitude } => write!(f, "-{magnitude}"),
            Repr::Fixed { negative: false, magnitude } => write!(f, "{magnitude}"),
            Repr::Big(value) => write!(f, "{value}"),
        }
    }
}
