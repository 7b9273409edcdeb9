//! Utility date and time equations for `datecalc_rs`
//!
//! The `mathematical_*` equations follow the proleptic Gregorian calendar and
//! are used to convert between epoch time and calendar fields. The calendar
//! rules exposed to callers (`is_leap_year`, `days_in_month`) use the
//! simplified "divisible by four" leap year rule.

use crate::MS_PER_DAY;

// ==== Begin Date Equations ====

/// `EpochDaysToEpochMS`
///
/// Functionally the same as Date's abstract operation `MakeDate`
#[inline]
pub(crate) const fn epoch_days_to_epoch_ms(day: i64, time: i64) -> i64 {
    day * MS_PER_DAY + time
}

/// `EpochTimeToDayNumber`
///
/// This equation is the equivalent to `ECMAScript`'s `Day(t)`
#[inline]
pub(crate) const fn epoch_time_to_day_number(t: i64) -> i64 {
    t.div_euclid(MS_PER_DAY)
}

/// Returns the milliseconds elapsed since the start of the day of `t`.
#[inline]
pub(crate) const fn epoch_time_to_time_within_day(t: i64) -> i64 {
    t.rem_euclid(MS_PER_DAY)
}

/// Mathematically determine the days in a year.
pub(crate) const fn mathematical_days_in_year(y: i32) -> i32 {
    if y % 4 != 0 {
        365
    } else if y % 100 != 0 {
        366
    } else if y % 400 != 0 {
        365
    } else {
        366
    }
}

/// Returns either 1 (true) or 0 (false)
#[inline]
pub(crate) const fn mathematical_in_leap_year(y: i32) -> i32 {
    mathematical_days_in_year(y) - 365
}

/// Returns the number of days in `month` (1-12) of the proleptic Gregorian calendar.
pub(crate) const fn mathematical_days_in_month(year: i32, month: u8) -> u8 {
    match month {
        2 => 28 + mathematical_in_leap_year(year) as u8,
        _ => days_in_month(year, month),
    }
}

/// Returns the epoch day number for the first day of a given year.
pub(crate) const fn epoch_day_number_for_year(y: i32) -> i64 {
    let y = y as i64;
    365 * (y - 1970) + (y - 1969).div_euclid(4) - (y - 1901).div_euclid(100)
        + (y - 1601).div_euclid(400)
}

/// Returns the year that contains the epoch day number.
pub(crate) fn epoch_day_number_to_year(day_count: i64) -> i32 {
    // roughly calculate the year given the day count, then check and refine it.
    let mut year = (day_count.div_euclid(365) + 1970) as i32;
    while epoch_day_number_for_year(year) > day_count {
        year -= 1;
    }
    while epoch_day_number_for_year(year + 1) <= day_count {
        year += 1;
    }
    year
}

const DAYS_BEFORE_MONTH: [i32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Returns the number of days in the year before the first of `month` (1-12).
#[inline]
pub(crate) const fn mathematical_days_before_month(year: i32, month: u8) -> i32 {
    let leap_day = if month > 2 {
        mathematical_in_leap_year(year)
    } else {
        0
    };
    DAYS_BEFORE_MONTH[(month - 1) as usize] + leap_day
}

/// Returns the epoch day number for a year, month (1-12) and day.
///
/// A `day` beyond the end of `month` balances into the following month.
pub(crate) const fn iso_date_to_epoch_days(year: i32, month: u8, day: u8) -> i64 {
    epoch_day_number_for_year(year)
        + mathematical_days_before_month(year, month) as i64
        + day as i64
        - 1
}

/// Returns the (year, month, day) for an epoch day number.
pub(crate) fn epoch_days_to_iso_date(day_count: i64) -> (i32, u8, u8) {
    let year = epoch_day_number_to_year(day_count);
    let day_in_year = (day_count - epoch_day_number_for_year(year)) as i32;

    let mut month = 12u8;
    while month > 1 && mathematical_days_before_month(year, month) > day_in_year {
        month -= 1;
    }
    let day = day_in_year - mathematical_days_before_month(year, month) + 1;

    (year, month, day as u8)
}

/// `WeekDay ( t )` where 0 is Sunday.
///
/// The epoch day 0 (1970-01-01) is a Thursday.
#[inline]
pub(crate) const fn epoch_days_to_week_day(day_count: i64) -> u8 {
    (day_count + 4).rem_euclid(7) as u8
}

// ==== End Date Equations ====

// ==== Begin Calendar Equations ====

/// Returns whether `year` is a leap year using the divisible-by-four rule.
#[inline]
pub(crate) const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0
}

/// Returns the number of days in `month` (1-12) using the simplified leap year rule.
pub(crate) const fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        _ => 28,
    }
}

/// Balances a year and an unbounded month into a year and a month in 1-12.
#[inline]
pub(crate) const fn balance_year_month(year: i64, month: i64) -> (i64, u8) {
    let y = year + (month - 1).div_euclid(12);
    let m = (month - 1).rem_euclid(12) + 1;
    (y, m as u8)
}

// ==== End Calendar Equations ====

// ==== Tests =====
