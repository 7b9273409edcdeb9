//! Lazy date and week enumerations.

use crate::{
    error::{Field, FieldViolation},
    options::DateOptions,
    time::EpochNanoseconds,
    DateError, DateResult, NS_PER_MS,
};

use super::DateValue;

/// A lazy, restartable sequence of `DateValue`s at fixed linear steps.
///
/// Created by [`DateValue::dates_between`] and [`DateValue::dates_in_week`].
#[derive(Debug, Clone)]
pub struct DateRange {
    next: i128,
    end: i128,
    step: i128,
    offset_minutes: i16,
    options: DateOptions,
}

impl DateRange {
    /// `step_ms` must be positive and `start` must not be after `end`.
    pub(crate) fn new(start: &DateValue, end: &DateValue, step_ms: i64, include_end: bool) -> Self {
        let step = i128::from(step_ms) * NS_PER_MS;
        let end = end.epoch_nanoseconds().as_i128() + if include_end { step } else { 0 };
        let range = Self {
            next: start.epoch_nanoseconds().as_i128(),
            end,
            step,
            offset_minutes: start.offset_minutes(),
            options: start.options(),
        };
        #[cfg(feature = "log")]
        log::trace!("enumerating {} dates", range.remaining());
        range
    }

    fn remaining(&self) -> usize {
        if self.next >= self.end {
            return 0;
        }
        let count = (self.end - self.next + self.step - 1) / self.step;
        usize::try_from(count).unwrap_or(usize::MAX)
    }
}

impl Iterator for DateRange {
    type Item = DateValue;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let value = EpochNanoseconds::try_from(self.next)
            .and_then(|nanos| {
                DateValue::from_epoch_nanoseconds(nanos, self.offset_minutes, self.options)
            })
            .inspect_err(|_err| {
                #[cfg(feature = "log")]
                log::debug!("ending date range early: {_err}");
            })
            .ok();
        self.next = if value.is_some() {
            self.next + self.step
        } else {
            self.end
        };
        value
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining()))
    }
}

/// A `(year, week)` pair produced by [`weeks_starting_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearWeek {
    pub year: i32,
    pub week: u8,
}

/// A lazy sequence of consecutive weeks.
///
/// Every year is treated as having exactly 52 weeks: week 52 is followed
/// by week 1 of the next year.
#[derive(Debug, Clone)]
pub struct Weeks {
    remaining: usize,
    year: i32,
    week: u8,
}

impl Weeks {
    pub(crate) const fn new(count: usize, start_week: u8, start_year: i32) -> Self {
        Self {
            remaining: count,
            year: start_year,
            week: start_week,
        }
    }
}

impl Iterator for Weeks {
    type Item = YearWeek;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        if self.week > 52 {
            self.year = self.year.saturating_add(1);
            self.week = 1;
        }
        let item = YearWeek {
            year: self.year,
            week: self.week,
        };
        self.week += 1;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Weeks {}

/// Returns `count` consecutive `(year, week)` pairs starting at `start_week` of `start_year`.
///
/// Any start week above 52 rolls over to week 1 of the following year.
pub fn weeks_starting_at(count: usize, start_week: u8, start_year: i32) -> DateResult<Weeks> {
    if start_week == 0 {
        return Err(DateError::validation(FieldViolation {
            field: Field::WeekNumber,
            value: Some(0),
            min: 1,
            max: u8::MAX.into(),
        }));
    }
    Ok(Weeks::new(count, start_week, start_year))
}
