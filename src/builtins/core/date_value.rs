//! This module implements `DateValue` and any directly related algorithms.

use crate::{
    error::{Field, FieldViolation},
    iso::{self, IsoDate, IsoDateTime, IsoTime, MAX_YEAR, MIN_YEAR},
    options::{DateOptions, Unit, Weekday},
    parsers::{self, FormattableFields, FormattedDateValue, Template},
    time::EpochNanoseconds,
    utils, DateError, DateResult, DateUnwrap, MS_PER_DAY, MS_PER_WEEK, NS_PER_MS,
};
use alloc::{format, string::String};
use core::{cmp::Ordering, fmt, hash, str::FromStr};
use writeable::Writeable;

use super::range::{DateRange, Weeks};

/// A `PartialDateTime` represents partially filled `DateValue` fields.
///
/// `year`, `month` and `day` are required. The remaining fields fall back to
/// noon UTC with a zero sub-second fraction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PartialDateTime {
    // A potentially set `year` field.
    pub year: Option<i32>,
    // A potentially set `month` field.
    pub month: Option<u8>,
    // A potentially set `day` field.
    pub day: Option<u8>,
    // A potentially set `hour` field.
    pub hour: Option<u8>,
    // A potentially set `minute` field.
    pub minute: Option<u8>,
    // A potentially set `second` field.
    pub second: Option<u8>,
    // A potentially set `sub_second` field, counted at the configured precision.
    pub sub_second: Option<u32>,
    // A potentially set UTC offset in minutes.
    pub offset_minutes: Option<i16>,
}

/// Convenience methods for building a `PartialDateTime`
impl PartialDateTime {
    pub const fn new() -> Self {
        Self {
            year: None,
            month: None,
            day: None,
            hour: None,
            minute: None,
            second: None,
            sub_second: None,
            offset_minutes: None,
        }
    }

    pub const fn with_year(mut self, year: Option<i32>) -> Self {
        self.year = year;
        self
    }

    pub const fn with_month(mut self, month: Option<u8>) -> Self {
        self.month = month;
        self
    }

    pub const fn with_day(mut self, day: Option<u8>) -> Self {
        self.day = day;
        self
    }

    pub const fn with_hour(mut self, hour: Option<u8>) -> Self {
        self.hour = hour;
        self
    }

    pub const fn with_minute(mut self, minute: Option<u8>) -> Self {
        self.minute = minute;
        self
    }

    pub const fn with_second(mut self, second: Option<u8>) -> Self {
        self.second = second;
        self
    }

    pub const fn with_sub_second(mut self, sub_second: Option<u32>) -> Self {
        self.sub_second = sub_second;
        self
    }

    pub const fn with_offset_minutes(mut self, offset_minutes: Option<i16>) -> Self {
        self.offset_minutes = offset_minutes;
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn required<T>(value: Option<T>, field: Field, min: i64, max: i64) -> DateResult<T> {
    value.ok_or(DateError::validation(FieldViolation {
        field,
        value: None,
        min,
        max,
    }))
}

/// A serialized point in time accepted by [`DateValue::from_instant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstantInput<'a> {
    /// Milliseconds since the Unix epoch.
    EpochMilliseconds(i64),
    /// An ISO-8601 extended date-time string.
    Iso8601(&'a str),
}

impl From<i64> for InstantInput<'_> {
    fn from(value: i64) -> Self {
        Self::EpochMilliseconds(value)
    }
}

impl<'a> From<&'a str> for InstantInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Iso8601(value)
    }
}

/// An offset command of the form `"<signed integer> <unit>"`, e.g. `"-2 weeks"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceCommand {
    pub amount: i64,
    pub unit: Unit,
}

impl AdvanceCommand {
    pub const fn new(amount: i64, unit: Unit) -> Self {
        Self { amount, unit }
    }
}

impl FromStr for AdvanceCommand {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(amount), Some(unit), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(DateError::syntax()
                .with_message(format!("expected \"<amount> <unit>\", found \"{s}\".")));
        };
        let amount = amount.parse::<i64>().map_err(|_| {
            DateError::syntax().with_message(format!("invalid amount \"{amount}\"."))
        })?;
        let unit = unit
            .parse::<Unit>()
            .map_err(|_| DateError::syntax().with_message(format!("invalid unit \"{unit}\".")))?;
        Ok(Self { amount, unit })
    }
}

impl fmt::Display for AdvanceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.unit)
    }
}

// ==== DateValue ====

/// An immutable point in time decomposed into calendar fields.
///
/// The canonical instant is stored with nanosecond resolution. The calendar
/// fields are derived from the instant at `offset_minutes` and are re-derived
/// by every operation that returns a new value.
///
/// Equality and ordering compare the instant only.
#[derive(Debug, Clone, Copy)]
pub struct DateValue {
    epoch_nanoseconds: EpochNanoseconds,
    offset_minutes: i16,
    options: DateOptions,
    iso: IsoDateTime,
}

// ==== Private API ====

impl DateValue {
    /// Creates a new `DateValue` by deriving the fields of an instant.
    pub(crate) fn from_epoch_nanoseconds(
        epoch_nanoseconds: EpochNanoseconds,
        offset_minutes: i16,
        options: DateOptions,
    ) -> DateResult<Self> {
        options.validate()?;
        let iso = IsoDateTime::from_epoch_nanos(epoch_nanoseconds, offset_minutes)?;
        Ok(Self {
            epoch_nanoseconds,
            offset_minutes,
            options,
            iso,
        })
    }

    /// Rebuilds a value from local calendar fields at this value's offset.
    fn with_local_fields(&self, date: IsoDate, time: IsoTime) -> DateResult<Self> {
        let nanos = IsoDateTime::new_unchecked(date, time).as_epoch_nanos(self.offset_minutes)?;
        Self::from_epoch_nanoseconds(nanos, self.offset_minutes, self.options)
    }

    /// Adds a linear amount of milliseconds to the instant.
    fn add_milliseconds(&self, amount: i64, unit_ms: i64) -> DateResult<Self> {
        let nanos = i128::from(amount)
            .checked_mul(i128::from(unit_ms) * NS_PER_MS)
            .ok_or(DateError::range().with_message("advance amount is too large."))?;
        let epoch_nanoseconds = self.epoch_nanoseconds.checked_add(nanos)?;
        Self::from_epoch_nanoseconds(epoch_nanoseconds, self.offset_minutes, self.options)
    }

    /// Adds months to the calendar fields, clamping the day to the month length.
    fn add_months(&self, months: i64) -> DateResult<Self> {
        let date = self.iso.date.add_months(months)?;
        self.with_local_fields(date, self.iso.time)
    }

    /// Builds a day of this value's month from fields, keeping only the options.
    fn month_day_date(&self, day: u8) -> DateResult<Self> {
        let partial = PartialDateTime::new()
            .with_year(Some(self.year()))
            .with_month(Some(self.month()))
            .with_day(Some(day));
        Self::from_fields(partial, self.options)
    }

    pub(crate) fn formattable_fields(&self) -> FormattableFields {
        FormattableFields {
            year: self.year(),
            month: self.month(),
            day: self.day(),
            hour: self.hour(),
            minute: self.minute(),
            second: self.second(),
            sub_second: self.sub_second(),
            precision: self.options.sub_second_precision,
            offset_minutes: self.offset_minutes,
        }
    }
}

// ==== Public API ====

impl DateValue {
    /// Creates a `DateValue` from a partial field set.
    ///
    /// Every provided field is checked against its boundary range, failing with
    /// a `Validation` error that names the field. The fields are read as local
    /// time at the provided offset.
    pub fn from_fields(partial: PartialDateTime, options: DateOptions) -> DateResult<Self> {
        options.validate()?;
        let year = required(partial.year, Field::Year, MIN_YEAR.into(), MAX_YEAR.into())?;
        let month = required(partial.month, Field::Month, 1, 12)?;
        let day = required(partial.day, Field::Day, 1, 31)?;
        let date = IsoDate::try_new(year, month.into(), day.into())?;
        let time = IsoTime::try_new(
            partial.hour.unwrap_or(12).into(),
            partial.minute.unwrap_or(0).into(),
            partial.second.unwrap_or(0).into(),
            partial.sub_second.unwrap_or(0).into(),
            options.sub_second_precision,
        )?;
        let offset_minutes = iso::check_offset_minutes(partial.offset_minutes.unwrap_or(0).into())?;

        let nanos = IsoDateTime::new_unchecked(date, time).as_epoch_nanos(offset_minutes)?;
        Self::from_epoch_nanoseconds(nanos, offset_minutes, options)
    }

    /// Creates a `DateValue` from a serialized instant without field validation.
    pub fn from_instant<'a>(
        input: impl Into<InstantInput<'a>>,
        options: DateOptions,
    ) -> DateResult<Self> {
        match input.into() {
            InstantInput::EpochMilliseconds(millis) => {
                Self::from_epoch_nanoseconds(EpochNanoseconds::from_milliseconds(millis)?, 0, options)
            }
            InstantInput::Iso8601(source) => {
                let parsed = parsers::parse_instant(source)?;
                Self::from_epoch_nanoseconds(
                    parsed.epoch_nanoseconds,
                    parsed.offset_minutes,
                    options,
                )
            }
        }
    }

    /// Creates a `DateValue` from milliseconds since the Unix epoch, derived at UTC.
    #[inline]
    pub fn from_epoch_milliseconds(millis: i64, options: DateOptions) -> DateResult<Self> {
        Self::from_instant(InstantInput::EpochMilliseconds(millis), options)
    }

    /// Creates a `DateValue` from an ISO-8601 extended date-time string.
    #[inline]
    pub fn from_iso8601(source: &str, options: DateOptions) -> DateResult<Self> {
        Self::from_instant(InstantInput::Iso8601(source), options)
    }

    /// Captures the current time of the system clock, derived at the system
    /// time zone's current UTC offset.
    ///
    /// Enable with the `sys-local` feature flag.
    #[cfg(feature = "sys-local")]
    pub fn now(options: DateOptions) -> DateResult<Self> {
        crate::sys::local_now().date_value(options)
    }

    /// Returns a value for the same instant with fields derived at a new UTC offset.
    pub fn with_offset(&self, offset_minutes: i16) -> DateResult<Self> {
        let offset_minutes = iso::check_offset_minutes(offset_minutes.into())?;
        #[cfg(feature = "log")]
        log::debug!(
            "re-deriving fields at offset {offset_minutes} (was {})",
            self.offset_minutes
        );
        Self::from_epoch_nanoseconds(self.epoch_nanoseconds, offset_minutes, self.options)
    }

    /// Returns a value for the same instant with a different week start.
    #[must_use]
    pub fn with_week_start(&self, week_start: Weekday) -> Self {
        let mut result = *self;
        result.options.week_start = week_start;
        result
    }

    /// Returns a value for the same instant with different options.
    pub fn with_options(&self, options: DateOptions) -> DateResult<Self> {
        Self::from_epoch_nanoseconds(self.epoch_nanoseconds, self.offset_minutes, options)
    }

    // ==== Accessors ====

    #[inline]
    #[must_use]
    pub fn year(&self) -> i32 {
        self.iso.date.year
    }

    #[inline]
    #[must_use]
    pub fn month(&self) -> u8 {
        self.iso.date.month
    }

    #[inline]
    #[must_use]
    pub fn day(&self) -> u8 {
        self.iso.date.day
    }

    #[inline]
    #[must_use]
    pub fn hour(&self) -> u8 {
        self.iso.time.hour
    }

    #[inline]
    #[must_use]
    pub fn minute(&self) -> u8 {
        self.iso.time.minute
    }

    #[inline]
    #[must_use]
    pub fn second(&self) -> u8 {
        self.iso.time.second
    }

    /// Returns the sub-second fraction at the configured precision.
    #[inline]
    #[must_use]
    pub fn sub_second(&self) -> u32 {
        self.iso.time.sub_second(self.options.sub_second_precision)
    }

    #[inline]
    #[must_use]
    pub fn offset_minutes(&self) -> i16 {
        self.offset_minutes
    }

    #[inline]
    #[must_use]
    pub fn options(&self) -> DateOptions {
        self.options
    }

    #[must_use]
    pub fn weekday(&self) -> Weekday {
        Weekday::from_index(self.iso.date.week_day()).unwrap_or_default()
    }

    /// Returns the week number of this value in its year.
    ///
    /// Week 1 is anchored on January 1st. The week start only shifts the
    /// count by a single day when it is Sunday, so a January 1st that is
    /// itself a Sunday is counted in week 0 under the Sunday week start.
    #[must_use]
    pub fn week_number(&self) -> u8 {
        let jan_first = utils::epoch_day_number_for_year(self.year());
        let since_jan_first = utils::epoch_days_to_epoch_ms(
            self.iso.date.to_epoch_days() - jan_first,
            self.iso.time.to_epoch_ms(),
        );
        let jan_first_weekday = i64::from(utils::epoch_days_to_week_day(jan_first));
        let correction = i64::from(self.options.week_start == Weekday::Sunday);

        let weeks = (since_jan_first + (jan_first_weekday - correction) * MS_PER_DAY)
            .div_euclid(MS_PER_WEEK);
        (weeks + 1) as u8
    }

    /// Returns whether the year is divisible by four.
    #[inline]
    #[must_use]
    pub fn in_leap_year(&self) -> bool {
        utils::is_leap_year(self.year())
    }

    /// Returns the length of this value's month under the simplified leap year rule.
    #[inline]
    #[must_use]
    pub fn days_in_month(&self) -> u8 {
        utils::days_in_month(self.year(), self.month())
    }

    #[inline]
    #[must_use]
    pub fn epoch_nanoseconds(&self) -> EpochNanoseconds {
        self.epoch_nanoseconds
    }

    pub fn epoch_milliseconds(&self) -> DateResult<i64> {
        self.epoch_nanoseconds.as_milliseconds()
    }

    /// Returns whether this value's instant is at or before `other`'s.
    #[inline]
    #[must_use]
    pub fn is_before_or_same(&self, other: &Self) -> bool {
        self.epoch_nanoseconds <= other.epoch_nanoseconds
    }

    // ==== Arithmetic ====

    /// Applies an offset command such as `"-1 month"` or `"3 weeks"`.
    pub fn advance(&self, command: &str) -> DateResult<Self> {
        let command = command.parse::<AdvanceCommand>()?;
        self.advance_by(command.amount, command.unit)
    }

    /// Moves this value by `amount` of `unit`.
    ///
    /// Linear units move the instant by a fixed number of milliseconds.
    /// Months and years move the year and month fields, keeping the time of
    /// day and clamping the day to the last day of the resulting month.
    pub fn advance_by(&self, amount: i64, unit: Unit) -> DateResult<Self> {
        match unit {
            Unit::Year => {
                let months = amount
                    .checked_mul(12)
                    .ok_or(DateError::range().with_message("advance amount is too large."))?;
                self.add_months(months)
            }
            Unit::Month => self.add_months(amount),
            Unit::Week | Unit::Day | Unit::Hour | Unit::Minute | Unit::Second => {
                let unit_ms = unit.as_milliseconds().date_unwrap()?;
                self.add_milliseconds(amount, unit_ms)
            }
        }
    }

    // ==== Boundaries ====

    /// Returns the first day of the week containing this value.
    pub fn week_first_date(&self) -> DateResult<Self> {
        let days = self.weekday().days_since(self.options.week_start);
        self.advance_by(-i64::from(days), Unit::Day)
    }

    /// Returns the last day of the week containing this value.
    pub fn week_last_date(&self) -> DateResult<Self> {
        let days = 6 - self.weekday().days_since(self.options.week_start);
        self.advance_by(i64::from(days), Unit::Day)
    }

    /// Returns the first day of this value's month at noon UTC.
    pub fn month_first_date(&self) -> DateResult<Self> {
        self.month_day_date(1)
    }

    /// Returns the last day of this value's month at noon UTC.
    pub fn month_last_date(&self) -> DateResult<Self> {
        self.month_day_date(utils::mathematical_days_in_month(self.year(), self.month()))
    }

    // ==== Ranges ====

    /// Enumerates values from `start` in `unit` sized steps.
    ///
    /// With `include_end` the range covers `start..end + unit`, otherwise
    /// `start..end`. Only linear units are accepted.
    pub fn dates_between(
        start: &Self,
        end: &Self,
        unit: Unit,
        include_end: bool,
    ) -> DateResult<DateRange> {
        if start > end {
            return Err(DateError::range_order().with_message("start is after end."));
        }
        let step_ms = unit.as_milliseconds().ok_or(
            DateError::range().with_message("dates can only be enumerated by a linear unit."),
        )?;
        Ok(DateRange::new(start, end, step_ms, include_end))
    }

    /// Enumerates every day from this value through `end`, inclusive.
    pub fn dates_until(&self, end: &Self) -> DateResult<DateRange> {
        Self::dates_between(self, end, Unit::Day, true)
    }

    /// Enumerates the week `week_number` of `year`.
    ///
    /// The week is found by walking forward `week_number - 1` weeks from noon
    /// on January 1st and snapping to the week's first day.
    pub fn dates_in_week(
        week_number: u8,
        year: i32,
        unit: Unit,
        include_end: bool,
        options: DateOptions,
    ) -> DateResult<DateRange> {
        iso::check_field(Field::WeekNumber, week_number.into(), 1, 53)?;
        let partial = PartialDateTime::new()
            .with_year(Some(year))
            .with_month(Some(1))
            .with_day(Some(1));
        let first = Self::from_fields(partial, options)?
            .advance_by(i64::from(week_number) - 1, Unit::Week)?
            .week_first_date()?;
        let last = first.week_last_date()?;
        Self::dates_between(&first, &last, unit, include_end)
    }

    /// Returns `count` consecutive weeks starting at this value's week.
    #[must_use]
    pub fn weeks_from(&self, count: usize) -> Weeks {
        Weeks::new(count, self.week_number().max(1), self.year())
    }

    // ==== Formatting ====

    /// Pairs this value with a parsed template.
    #[must_use]
    pub fn format<'a>(&self, template: &'a Template<'a>) -> FormattedDateValue<'a> {
        FormattedDateValue {
            fields: self.formattable_fields(),
            template,
        }
    }

    /// Renders this value through a template such as `"%Y-%m"`.
    ///
    /// Fails with a `Format` error on an unknown placeholder.
    pub fn render(&self, template: &str) -> DateResult<String> {
        parsers::render(self.formattable_fields(), template)
    }

    /// Renders `%Y-%m-%d`.
    #[must_use]
    pub fn to_date_string(&self) -> String {
        self.format(&Template::date()).write_to_string().into_owned()
    }

    /// Renders `%H:%i:%s`.
    #[must_use]
    pub fn to_time_string(&self) -> String {
        self.format(&Template::time()).write_to_string().into_owned()
    }
}

/// Returns whether `year` is divisible by four.
///
/// The century rule is not applied, so `1900` is a leap year.
#[inline]
#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    utils::is_leap_year(year)
}

/// Returns the length of `month` in `year` under the simplified leap year rule.
pub fn month_length(year: i32, month: u8) -> DateResult<u8> {
    iso::check_field(Field::Month, month.into(), 1, 12)?;
    Ok(utils::days_in_month(year, month))
}

// ==== Trait impls ====

impl PartialEq for DateValue {
    fn eq(&self, other: &Self) -> bool {
        self.epoch_nanoseconds == other.epoch_nanoseconds
    }
}

impl Eq for DateValue {}

impl PartialOrd for DateValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch_nanoseconds.cmp(&other.epoch_nanoseconds)
    }
}

impl hash::Hash for DateValue {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        hash::Hash::hash(&self.epoch_nanoseconds, state);
    }
}

impl FromStr for DateValue {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_iso8601(s, DateOptions::default())
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let template =
            Template::parse(self.options.output_format.template()).map_err(|_| fmt::Error)?;
        self.format(&template).write_to(f)
    }
}

#[cfg(test)]
mod tests;
