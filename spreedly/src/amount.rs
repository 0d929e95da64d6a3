//! Currency amount conversion.
//!
//! The gateway expects amounts as an integer number of cents, while callers
//! work in dollars. [`to_minor_units`] performs that scaling with fixed-point
//! arithmetic so that `94.05` becomes exactly `9405`.
//!
//! The caller must pass a major-unit value. Passing a value that is already
//! in cents charges one hundred times the intended amount; this is not
//! detectable here and is not validated.

use std::fmt::{Display, Formatter};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::AmountError;

/// Minor units per major unit for USD, the only currency the API accepts here.
const CENTS_PER_DOLLAR: i64 = 100;

/// An amount expressed in minor currency units (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinorUnits(i64);

impl MinorUnits {
    /// Wraps a raw cent value.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw cent value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Display for MinorUnits {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Converts a major-unit amount (dollars) to minor units (cents).
///
/// Sub-cent fractions are rounded to the nearest cent, midpoints away
/// from zero. Negative amounts pass through unchanged in sign.
///
/// # Errors
///
/// Returns [`AmountError::OutOfRange`] if the scaled value does not fit
/// in an `i64`.
pub fn to_minor_units(amount: Decimal) -> Result<MinorUnits, AmountError> {
    let scaled = amount
        .checked_mul(Decimal::from(CENTS_PER_DOLLAR))
        .ok_or_else(|| AmountError::OutOfRange(amount.to_string()))?;
    scaled
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .map(MinorUnits)
        .ok_or_else(|| AmountError::OutOfRange(amount.to_string()))
}
