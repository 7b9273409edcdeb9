//! The `datecalc_rs` crate is a calendar-date manipulation library.
//!
//! Given a point in time, it computes derived dates (week and month
//! boundaries, offsets by calendar unit, week numbering) and renders them
//! through a configurable template.
//!
//! ```rust
//! use datecalc_rs::{options::DateOptions, partial::PartialDateTime, DateValue};
//!
//! let partial = PartialDateTime::new()
//!     .with_year(Some(2018))
//!     .with_month(Some(3))
//!     .with_day(Some(31));
//! let date = DateValue::from_fields(partial, DateOptions::default()).unwrap();
//!
//! // Month arithmetic clamps to the end of the shorter month.
//! let previous = date.advance("-1 month").unwrap();
//! assert_eq!(previous.to_date_string(), "2018-02-28");
//!
//! // Weeks start on Sunday by default.
//! assert_eq!(previous.week_first_date().unwrap().to_date_string(), "2018-02-25");
//! ```
//!
//! A `DateValue` is an immutable snapshot: every transformation returns a new
//! value with all of its calendar fields re-derived from the canonical instant.
//!
//! ## Known simplifications
//!
//! - Leap years follow the "divisible by four" rule only, so `1900` and `2100`
//!   are treated as leap years by [`is_leap_year`] and [`month_length`].
//!   Building and moving dates still uses Gregorian month lengths, so
//!   `1900-02-29` is rejected.
//! - [`weeks_starting_at`] rolls over after week 52 and never yields week 53.
#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    clippy::module_name_repetitions,
    clippy::redundant_pub_crate,
    clippy::missing_errors_doc,
    clippy::option_if_let_else,

    // Field values are range checked before any narrowing cast.
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
)]

extern crate alloc;
extern crate core;

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod host;
pub mod iso;
pub mod options;
pub mod parsers;

#[cfg(feature = "sys")]
pub mod sys;

mod builtins;
mod epoch_nanoseconds;

#[doc(hidden)]
pub(crate) mod utils;

#[doc(inline)]
pub use error::DateError;

/// The `datecalc_rs` result type
pub type DateResult<T> = Result<T, DateError>;

pub mod partial {
    //! Partial Date Value field records.
    //!
    //! A partial record is the input to [`DateValue::from_fields`][crate::DateValue::from_fields].
    pub use crate::builtins::core::PartialDateTime;
}

pub mod time {
    pub use crate::epoch_nanoseconds::EpochNanoseconds;
}

pub use crate::builtins::core::{
    is_leap_year, month_length, weeks_starting_at, AdvanceCommand, DateRange, DateValue,
    InstantInput, Now, Weeks, YearWeek,
};
pub use crate::parsers::{FormattedDateValue, Template};

/// A library specific trait for unwrapping assertions.
pub(crate) trait DateUnwrap {
    type Output;

    /// `datecalc_rs` based assertion for unwrapping. This will panic in
    /// debug builds, but throws error during runtime.
    fn date_unwrap(self) -> DateResult<Self::Output>;
}

impl<T> DateUnwrap for Option<T> {
    type Output = T;

    fn date_unwrap(self) -> DateResult<Self::Output> {
        debug_assert!(self.is_some());
        self.ok_or(DateError::assert())
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! date_assert {
    ($condition:expr $(,)*) => {
        if !$condition {
            return Err($crate::DateError::assert());
        }
    };
    ($condition:expr, $($args:tt)+) => {
        if !$condition {
            #[cfg(feature = "log")]
            log::error!($($args)+);
            return Err($crate::DateError::assert());
        }
    };
}

// Relevant numeric constants
/// Milliseconds per second constant
pub const MS_PER_SECOND: i64 = 1_000;
/// Milliseconds per minute constant
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
/// Milliseconds per hour constant
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
/// Milliseconds per day constant: 8.64e+7
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;
/// Milliseconds per week constant
pub const MS_PER_WEEK: i64 = 7 * MS_PER_DAY;
/// Nanoseconds per millisecond constant
pub const NS_PER_MS: i128 = 1_000_000;
/// Nanoseconds per day constant: 8.64e+13
pub const NS_PER_DAY: i128 = MS_PER_DAY as i128 * NS_PER_MS;
/// Max Instant nanosecond constant
#[doc(hidden)]
pub(crate) const NS_MAX_INSTANT: i128 = NS_PER_DAY * 100_000_000i128;
/// Min Instant nanosecond constant
#[doc(hidden)]
pub(crate) const NS_MIN_INSTANT: i128 = -NS_MAX_INSTANT;
