//! This module implements the internal calendar field records.
//!
//! The three main types of records are:
//!   - `IsoDateTime`
//!   - `IsoDate`
//!   - `IsoTime`
//!
//! An `IsoDate` holds the year, month, and day fields.
//!
//! An `IsoTime` holds the hour, minute, second, and the sub-second fraction
//! as nanoseconds within the second.
//!
//! An `IsoDateTime` has the fields of both an `IsoDate` and `IsoTime`, and is
//! the decomposition of an instant at a fixed UTC offset.

use crate::{
    error::{Field, FieldViolation},
    time::EpochNanoseconds,
    utils, DateError, DateResult, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND, NS_PER_MS,
};

/// The lowest year accepted when building from fields.
pub const MIN_YEAR: i32 = 1900;
/// The highest year accepted when building from fields.
pub const MAX_YEAR: i32 = 2100;
/// The lowest accepted UTC offset in minutes.
pub const MIN_OFFSET_MINUTES: i16 = -12 * 60;
/// The highest accepted UTC offset in minutes.
pub const MAX_OFFSET_MINUTES: i16 = 14 * 60;
/// The highest supported sub-second precision in digits.
pub const MAX_SUB_SECOND_PRECISION: u8 = 9;

const NS_PER_SECOND: u32 = 1_000_000_000;

/// Checks that `value` lies in `min..=max`.
#[inline]
pub(crate) fn check_field(field: Field, value: i64, min: i64, max: i64) -> DateResult<()> {
    if !(min..=max).contains(&value) {
        return Err(DateError::validation(FieldViolation {
            field,
            value: Some(value),
            min,
            max,
        }));
    }
    Ok(())
}

/// Checks a UTC offset in minutes, which must be a whole number of hours.
pub(crate) fn check_offset_minutes(offset: i64) -> DateResult<i16> {
    check_field(
        Field::OffsetMinutes,
        offset,
        MIN_OFFSET_MINUTES.into(),
        MAX_OFFSET_MINUTES.into(),
    )?;
    if offset % 60 != 0 {
        return Err(DateError::validation(FieldViolation {
            field: Field::OffsetMinutes,
            value: Some(offset),
            min: MIN_OFFSET_MINUTES.into(),
            max: MAX_OFFSET_MINUTES.into(),
        })
        .with_message("offset must be a whole number of hours."));
    }
    Ok(offset as i16)
}

/// Checks a sub-second precision in digits.
pub(crate) fn check_sub_second_precision(precision: u8) -> DateResult<()> {
    check_field(
        Field::SubSecondPrecision,
        precision.into(),
        1,
        MAX_SUB_SECOND_PRECISION.into(),
    )
}

/// Returns the nanoseconds represented by one unit of the sub-second field.
#[inline]
const fn nanos_per_sub_second_unit(precision: u8) -> u32 {
    10u32.pow((MAX_SUB_SECOND_PRECISION - precision) as u32)
}

// ==== `IsoDateTime` section ====

/// `IsoDateTime` is the record of the `IsoDate` and `IsoTime` fields.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDateTime {
    pub date: IsoDate,
    pub time: IsoTime,
}

impl IsoDateTime {
    /// Creates a new `IsoDateTime` without any validation.
    pub(crate) const fn new_unchecked(date: IsoDate, time: IsoTime) -> Self {
        Self { date, time }
    }

    /// Decomposes an instant into calendar fields at the provided UTC offset.
    pub(crate) fn from_epoch_nanos(
        nanos: EpochNanoseconds,
        offset_minutes: i16,
    ) -> DateResult<Self> {
        let offset_nanos = i128::from(offset_minutes) * i128::from(MS_PER_MINUTE) * NS_PER_MS;
        let local = EpochNanoseconds(nanos.as_i128() + offset_nanos);
        let epoch_millis = local.as_milliseconds()?;
        let remainder_nanos = local.as_i128().rem_euclid(NS_PER_MS) as u32;

        let day_number = utils::epoch_time_to_day_number(epoch_millis);
        let (year, month, day) = utils::epoch_days_to_iso_date(day_number);

        let time_in_day = utils::epoch_time_to_time_within_day(epoch_millis);
        let hour = time_in_day / MS_PER_HOUR;
        let minute = (time_in_day / MS_PER_MINUTE) % 60;
        let second = (time_in_day / MS_PER_SECOND) % 60;
        let millis = time_in_day % MS_PER_SECOND;

        let nanosecond = millis as u32 * NS_PER_MS as u32 + remainder_nanos;
        crate::date_assert!(nanosecond < NS_PER_SECOND);

        Ok(Self::new_unchecked(
            IsoDate::new_unchecked(year, month, day),
            IsoTime::new_unchecked(hour as u8, minute as u8, second as u8, nanosecond),
        ))
    }

    /// Returns the instant of these fields interpreted at the provided UTC offset.
    pub(crate) fn as_epoch_nanos(&self, offset_minutes: i16) -> DateResult<EpochNanoseconds> {
        let local_millis =
            utils::epoch_days_to_epoch_ms(self.date.to_epoch_days(), self.time.to_epoch_ms());
        let nanos = i128::from(local_millis) * NS_PER_MS
            + i128::from(self.time.nanosecond % NS_PER_MS as u32)
            - i128::from(offset_minutes) * i128::from(MS_PER_MINUTE) * NS_PER_MS;
        EpochNanoseconds::try_from(nanos)
    }
}

// ==== `IsoDate` section ====

/// `IsoDate` serves as a record for the year, month, and day fields.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl IsoDate {
    /// Creates a new `IsoDate` without determining the validity.
    pub(crate) const fn new_unchecked(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Creates a new validated `IsoDate`.
    ///
    /// The day is bounded by the Gregorian length of the month.
    pub fn try_new(year: i32, month: i32, day: i32) -> DateResult<Self> {
        check_field(Field::Year, year.into(), MIN_YEAR.into(), MAX_YEAR.into())?;
        check_field(Field::Month, month.into(), 1, 12)?;
        check_field(Field::Day, day.into(), 1, 31)?;
        let month = month as u8;
        let days_in_month = utils::mathematical_days_in_month(year, month);
        check_field(Field::Day, day.into(), 1, days_in_month.into())?;
        Ok(Self::new_unchecked(year, month, day as u8))
    }

    /// Functionally the same as Date's abstract operation `MakeDay`
    #[inline]
    pub(crate) const fn to_epoch_days(self) -> i64 {
        utils::iso_date_to_epoch_days(self.year, self.month, self.day)
    }

    /// Returns the weekday index where 0 is Sunday.
    #[inline]
    pub(crate) const fn week_day(self) -> u8 {
        utils::epoch_days_to_week_day(self.to_epoch_days())
    }

    /// Returns the date moved by a number of months, keeping the day when it
    /// exists in the resulting month and clamping it to the month's last day
    /// when it does not.
    pub(crate) fn add_months(self, months: i64) -> DateResult<Self> {
        let month = i64::from(self.month)
            .checked_add(months)
            .ok_or(DateError::range().with_message("month arithmetic overflowed."))?;
        let (year, month) = utils::balance_year_month(self.year.into(), month);
        check_field(Field::Year, year, MIN_YEAR.into(), MAX_YEAR.into())?;
        let year = year as i32;
        let day = self.day.min(utils::mathematical_days_in_month(year, month));
        Ok(Self::new_unchecked(year, month, day))
    }
}

// ==== `IsoTime` section ====

/// An `IsoTime` record that contains the time of day fields.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoTime {
    pub hour: u8,        // 0..=23
    pub minute: u8,      // 0..=59
    pub second: u8,      // 0..=59
    pub nanosecond: u32, // 0..=999_999_999
}

impl IsoTime {
    /// Creates a new `IsoTime` without any validation.
    pub(crate) const fn new_unchecked(hour: u8, minute: u8, second: u8, nanosecond: u32) -> Self {
        Self {
            hour,
            minute,
            second,
            nanosecond,
        }
    }

    /// Creates a new validated `IsoTime` from a sub-second value at `precision` digits.
    pub fn try_new(
        hour: i32,
        minute: i32,
        second: i32,
        sub_second: i64,
        precision: u8,
    ) -> DateResult<Self> {
        check_sub_second_precision(precision)?;
        check_field(Field::Hour, hour.into(), 0, 23)?;
        check_field(Field::Minute, minute.into(), 0, 59)?;
        check_field(Field::Second, second.into(), 0, 59)?;
        let max_sub_second = i64::from(10u32.pow(precision.into())) - 1;
        check_field(Field::SubSecond, sub_second, 0, max_sub_second)?;

        let nanosecond = sub_second as u32 * nanos_per_sub_second_unit(precision);
        Ok(Self::new_unchecked(
            hour as u8,
            minute as u8,
            second as u8,
            nanosecond,
        ))
    }

    /// Returns the sub-second fraction truncated to `precision` digits.
    #[inline]
    pub fn sub_second(&self, precision: u8) -> u32 {
        let precision = precision.clamp(1, MAX_SUB_SECOND_PRECISION);
        self.nanosecond / nanos_per_sub_second_unit(precision)
    }

    /// Returns the milliseconds elapsed since midnight.
    pub(crate) fn to_epoch_ms(self) -> i64 {
        i64::from(self.hour) * MS_PER_HOUR
            + i64::from(self.minute) * MS_PER_MINUTE
            + i64::from(self.second) * MS_PER_SECOND
            + i64::from(self.nanosecond) / NS_PER_MS as i64
    }
}
