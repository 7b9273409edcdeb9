//! Native implementation of the `DateValue` configuration options.
//!
//! Every constructor accepts a [`DateOptions`] value that controls the
//! first day of the week, the sub-second precision, and the default
//! output format.

use core::{fmt, str::FromStr};

use crate::{iso, DateResult, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND, MS_PER_WEEK};

// ==== DateOptions ====

/// The configuration carried by every `DateValue`.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateOptions {
    /// The weekday considered the first day of a week.
    pub week_start: Weekday,
    /// The number of sub-second digits, `1..=9`.
    pub sub_second_precision: u8,
    /// The format used when rendering without an explicit template.
    pub output_format: OutputFormat,
}

impl Default for DateOptions {
    fn default() -> Self {
        Self {
            week_start: Weekday::Sunday,
            sub_second_precision: 6,
            output_format: OutputFormat::Iso8601,
        }
    }
}

impl DateOptions {
    #[inline]
    #[must_use]
    pub const fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_sub_second_precision(mut self, precision: u8) -> Self {
        self.sub_second_precision = precision;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_output_format(mut self, output_format: OutputFormat) -> Self {
        self.output_format = output_format;
        self
    }

    /// Checks that the options can be applied to a `DateValue`.
    pub(crate) fn validate(&self) -> DateResult<()> {
        iso::check_sub_second_precision(self.sub_second_precision)
    }
}

// ==== Weekday ====

/// A day of the week, indexed from Sunday.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    #[default]
    Sunday = 0,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Returns the weekday index where Sunday is 0.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the weekday for an index in `0..=6`.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 7 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Returns the English name of the weekday.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }

    /// Returns the three letter abbreviation of the weekday.
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Sunday => "Sun",
            Self::Monday => "Mon",
            Self::Tuesday => "Tue",
            Self::Wednesday => "Wed",
            Self::Thursday => "Thu",
            Self::Friday => "Fri",
            Self::Saturday => "Sat",
        }
    }

    /// Returns the number of days from `week_start` back to this weekday.
    #[inline]
    pub(crate) const fn days_since(self, week_start: Self) -> u8 {
        (self.index() + 7 - week_start.index()) % 7
    }
}

/// A parsing error for `Weekday`
#[derive(Debug, Clone, Copy)]
pub struct ParseWeekdayError;

impl fmt::Display for ParseWeekdayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid weekday")
    }
}

impl FromStr for Weekday {
    type Err = ParseWeekdayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|day| {
                s.eq_ignore_ascii_case(day.name()) || s.eq_ignore_ascii_case(day.short_name())
            })
            .ok_or(ParseWeekdayError)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name().fmt(f)
    }
}

// ==== OutputFormat ====

/// The default rendering of a `DateValue`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// `YYYY-MM-DD HH:II:SS.uuuuuu±HH:00`
    #[default]
    Iso8601,
}

impl OutputFormat {
    /// Returns the template source rendered by this format.
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::Iso8601 => "%Y-%m-%d %H:%i:%s.%u%t",
        }
    }
}

/// A parsing error for `OutputFormat`
#[derive(Debug, Clone, Copy)]
pub struct ParseOutputFormatError;

impl fmt::Display for ParseOutputFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid output format")
    }
}

impl FromStr for OutputFormat {
    type Err = ParseOutputFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ISO8601" | "iso8601" => Ok(Self::Iso8601),
            _ => Err(ParseOutputFormatError),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iso8601 => "ISO8601",
        }
        .fmt(f)
    }
}

// ==== Unit ====

/// The calendar and clock units accepted by `DateValue` arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Unit {
    /// The `Second` unit
    Second,
    /// The `Minute` unit
    Minute,
    /// The `Hour` unit
    Hour,
    /// The `Day` unit
    Day,
    /// The `Week` unit
    Week,
    /// The `Month` unit
    Month,
    /// The `Year` unit
    Year,
}

impl Unit {
    /// Returns whether the unit has a fixed length.
    #[inline]
    #[must_use]
    pub const fn is_linear(self) -> bool {
        !matches!(self, Self::Year | Self::Month)
    }

    /// Returns the millisecond length of a linear unit.
    #[must_use]
    pub const fn as_milliseconds(self) -> Option<i64> {
        match self {
            Self::Year | Self::Month => None,
            Self::Week => Some(MS_PER_WEEK),
            Self::Day => Some(MS_PER_DAY),
            Self::Hour => Some(MS_PER_HOUR),
            Self::Minute => Some(MS_PER_MINUTE),
            Self::Second => Some(MS_PER_SECOND),
        }
    }
}

/// A parsing error for `Unit`
#[derive(Debug, Clone, Copy)]
pub struct ParseUnitError;

impl fmt::Display for ParseUnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid unit")
    }
}

impl FromStr for Unit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "year" | "years" => Ok(Self::Year),
            "month" | "months" => Ok(Self::Month),
            "week" | "weeks" => Ok(Self::Week),
            "day" | "days" => Ok(Self::Day),
            "hour" | "hours" => Ok(Self::Hour),
            "minute" | "minutes" | "min" | "mins" => Ok(Self::Minute),
            "second" | "seconds" | "sec" | "secs" => Ok(Self::Second),
            _ => Err(ParseUnitError),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
        }
        .fmt(f)
    }
}
