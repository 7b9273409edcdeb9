use num_traits::ToPrimitive;

use crate::{DateError, DateResult, NS_PER_MS};

/// The canonical instant of a `DateValue`: nanoseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct EpochNanoseconds(pub(crate) i128);

impl TryFrom<i128> for EpochNanoseconds {
    type Error = DateError;

    fn try_from(value: i128) -> Result<Self, Self::Error> {
        let nanos = Self(value);
        nanos.check_validity()?;
        Ok(nanos)
    }
}

impl EpochNanoseconds {
    /// Creates validated `EpochNanoseconds` from epoch milliseconds.
    pub fn from_milliseconds(millis: i64) -> DateResult<Self> {
        Self::try_from(i128::from(millis) * NS_PER_MS)
    }

    pub fn as_i128(&self) -> i128 {
        self.0
    }

    /// Returns the floored millisecond count of this instant.
    pub fn as_milliseconds(&self) -> DateResult<i64> {
        self.0
            .div_euclid(NS_PER_MS)
            .to_i64()
            .ok_or(DateError::range().with_message("instant exceeds the millisecond range."))
    }

    /// Adds a signed nanosecond amount, failing if the result leaves the valid range.
    pub(crate) fn checked_add(&self, nanos: i128) -> DateResult<Self> {
        let sum = self
            .0
            .checked_add(nanos)
            .ok_or(DateError::range().with_message("instant arithmetic overflowed."))?;
        Self::try_from(sum)
    }

    pub fn check_validity(&self) -> DateResult<()> {
        if !is_valid_epoch_nanos(&self.0) {
            return Err(DateError::range().with_message("instant is outside of the valid range."));
        }
        Ok(())
    }
}

/// Utility for determining if the nanos are within a valid range.
#[inline]
#[must_use]
pub(crate) fn is_valid_epoch_nanos(nanos: &i128) -> bool {
    (crate::NS_MIN_INSTANT..=crate::NS_MAX_INSTANT).contains(nanos)
}
