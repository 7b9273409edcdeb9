//! The native Rust implementation of the `DateValue` builtins.

mod date_value;
mod now;
mod range;

#[doc(inline)]
pub use date_value::{
    is_leap_year, month_length, AdvanceCommand, DateValue, InstantInput, PartialDateTime,
};
#[doc(inline)]
pub use now::Now;
#[doc(inline)]
pub use range::{weeks_starting_at, DateRange, Weeks, YearWeek};
