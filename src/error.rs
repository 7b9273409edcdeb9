//! This module implements `DateError`.

use alloc::borrow::Cow;
use core::fmt;

/// `DateError`'s error type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Error.
    #[default]
    Generic,
    /// A supplied field is outside of its boundary range.
    Validation,
    /// A range was requested with its start after its end.
    RangeOrder,
    /// A template could not be rendered.
    Format,
    /// Input text could not be parsed.
    Syntax,
    /// A value is outside of the representable range.
    Range,
    /// Unexpected internal state.
    Assert,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => "Error",
            Self::Validation => "ValidationError",
            Self::RangeOrder => "RangeOrderError",
            Self::Format => "FormatError",
            Self::Syntax => "SyntaxError",
            Self::Range => "RangeError",
            Self::Assert => "ImplementationError",
        }
        .fmt(f)
    }
}

/// The fields that are checked against a boundary range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    SubSecond,
    OffsetMinutes,
    SubSecondPrecision,
    WeekNumber,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::SubSecond => "subSecond",
            Self::OffsetMinutes => "offsetMinutes",
            Self::SubSecondPrecision => "subSecondPrecision",
            Self::WeekNumber => "weekNumber",
        }
        .fmt(f)
    }
}

/// The details of a field that failed validation.
///
/// A `value` of `None` means the field was required but not provided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: Field,
    pub value: Option<i64>,
    pub min: i64,
    pub max: i64,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(
                f,
                "{} value {value} is outside of the valid range {}..={}",
                self.field, self.min, self.max
            ),
            None => write!(
                f,
                "{} is required (valid range {}..={})",
                self.field, self.min, self.max
            ),
        }
    }
}

/// The error type for `datecalc_rs`.
#[derive(Debug, Clone, PartialEq)]
pub struct DateError {
    kind: ErrorKind,
    msg: Cow<'static, str>,
    violation: Option<FieldViolation>,
}

impl DateError {
    fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            msg: Cow::Borrowed(""),
            violation: None,
        }
    }

    /// Create a generic error
    #[must_use]
    pub fn general(msg: &'static str) -> Self {
        Self::new(ErrorKind::Generic).with_message(msg)
    }

    /// Create a validation error for the provided field violation.
    #[must_use]
    pub fn validation(violation: FieldViolation) -> Self {
        let mut err = Self::new(ErrorKind::Validation);
        err.violation = Some(violation);
        err
    }

    /// Create a range order error.
    #[must_use]
    pub fn range_order() -> Self {
        Self::new(ErrorKind::RangeOrder)
    }

    /// Create a format error.
    #[must_use]
    pub fn format() -> Self {
        Self::new(ErrorKind::Format)
    }

    /// Create a syntax error.
    #[must_use]
    pub fn syntax() -> Self {
        Self::new(ErrorKind::Syntax)
    }

    /// Create a range error.
    #[must_use]
    pub fn range() -> Self {
        Self::new(ErrorKind::Range)
    }

    /// Creates an assertion error
    #[must_use]
    pub(crate) fn assert() -> Self {
        Self::new(ErrorKind::Assert).with_message("Implementation error: assertion failed.")
    }

    /// Add a message to the error.
    #[must_use]
    pub fn with_message<S>(mut self, msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        self.msg = msg.into();
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Returns the field violation of a `Validation` error.
    #[inline]
    #[must_use]
    pub fn violation(&self) -> Option<&FieldViolation> {
        self.violation.as_ref()
    }

    /// Extracts the error message.
    #[inline]
    #[must_use]
    pub fn into_message(self) -> Cow<'static, str> {
        self.msg
    }
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        if let Some(violation) = &self.violation {
            write!(f, ": {violation}")?;
        }

        let msg = self.msg.trim();
        if !msg.is_empty() {
            write!(f, ": {msg}")?;
        }

        Ok(())
    }
}

impl core::error::Error for DateError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_includes_violation() {
        let err = DateError::validation(FieldViolation {
            field: Field::Month,
            value: Some(13),
            min: 1,
            max: 12,
        });
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            err.to_string(),
            "ValidationError: month value 13 is outside of the valid range 1..=12"
        );
    }

    #[test]
    fn display_missing_field() {
        let err = DateError::validation(FieldViolation {
            field: Field::Year,
            value: None,
            min: 1900,
            max: 2100,
        });
        assert_eq!(
            err.to_string(),
            "ValidationError: year is required (valid range 1900..=2100)"
        );
    }

    #[test]
    fn display_with_message() {
        let err = DateError::range_order().with_message("start is after end.");
        assert_eq!(err.to_string(), "RangeOrderError: start is after end.");
        assert!(err.violation().is_none());
        assert_eq!(err.into_message(), "start is after end.");
    }
}
