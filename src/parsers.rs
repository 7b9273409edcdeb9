//! This module implements ISO-8601 instant parsing and template formatting.

use crate::{
    iso::{self, IsoDate, IsoDateTime, IsoTime},
    time::EpochNanoseconds,
    DateError, DateResult, NS_PER_MS,
};
use alloc::{format, string::String, vec::Vec};
use ixdtf::{
    parsers::IxdtfParser,
    records::{Sign, UtcOffsetRecordOrZ},
    ParseError,
};
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

// ==== Instant parsing ====

/// Maps an ixdtf `ParseError` to a syntax error.
fn map_parse_error(err: ParseError) -> DateError {
    use ParseError::{
        AbruptEnd, DateDay, DateMonth, DateYear, FractionPart, InvalidDayRange, InvalidEnd,
        InvalidMonthRange, TimeHour, TimeMinuteSecond, TimeSecond,
    };
    let message = match err {
        InvalidMonthRange => "Month is outside valid range (1-12)",
        InvalidDayRange => "Day is outside valid range for the given month/year",
        DateYear => "Invalid year format",
        DateMonth => "Invalid month format",
        DateDay => "Invalid day format",
        TimeHour => "Invalid hour format",
        TimeMinuteSecond => "Invalid minute or second format",
        TimeSecond => "Invalid second format",
        FractionPart => "Invalid fractional seconds format",
        AbruptEnd { location } => {
            return DateError::syntax()
                .with_message(format!("Unexpected end while parsing {location}"))
        }
        InvalidEnd => "Unexpected character at end of input",
        _ => return DateError::syntax().with_message(format!("Parse error: {err:?}")),
    };
    DateError::syntax().with_message(message)
}

/// The result of parsing an ISO-8601 date-time string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParsedInstant {
    pub(crate) epoch_nanoseconds: EpochNanoseconds,
    /// The offset the fields of the resulting value are derived at.
    pub(crate) offset_minutes: i16,
}

/// Parses an ISO-8601 extended date-time string into an instant.
///
/// A date without a time is midnight UTC and a time without an offset is
/// read as UTC. A whole-hour offset within the accepted range is kept for
/// deriving fields, any other offset only moves the instant.
pub(crate) fn parse_instant(source: &str) -> DateResult<ParsedInstant> {
    let record = IxdtfParser::from_utf8(source.as_bytes())
        .parse()
        .map_err(map_parse_error)?;

    let Some(date) = record.date else {
        return Err(DateError::syntax().with_message("Date is required in an instant string."));
    };

    let time = match record.time {
        Some(time) => {
            let nanosecond = time
                .fraction
                .and_then(|fraction| fraction.to_nanoseconds())
                .unwrap_or(0);
            // A leap second reads as the last second of the minute.
            IsoTime::new_unchecked(time.hour, time.minute, time.second.min(59), nanosecond)
        }
        None => IsoTime::default(),
    };

    let offset_seconds: i64 = match record.offset {
        Some(UtcOffsetRecordOrZ::Offset(offset)) => {
            let seconds = i64::from(offset.hour()) * 3600
                + i64::from(offset.minute()) * 60
                + i64::from(offset.second().unwrap_or(0));
            match offset.sign() {
                Sign::Negative => -seconds,
                _ => seconds,
            }
        }
        Some(UtcOffsetRecordOrZ::Z) | None => 0,
    };

    let date_time = IsoDateTime::new_unchecked(
        IsoDate::new_unchecked(date.year, date.month, date.day),
        time,
    );
    let local = date_time.as_epoch_nanos(0)?;
    let epoch_nanoseconds = local.checked_add(-i128::from(offset_seconds) * 1_000 * NS_PER_MS)?;

    let offset_minutes = if offset_seconds % 3600 == 0 {
        iso::check_offset_minutes(offset_seconds / 60).unwrap_or_else(|_| {
            #[cfg(feature = "log")]
            log::debug!("offset {offset_seconds}s is outside the accepted range, using UTC");
            0
        })
    } else {
        #[cfg(feature = "log")]
        log::debug!("offset {offset_seconds}s is not a whole hour, using UTC");
        0
    };

    Ok(ParsedInstant {
        epoch_nanoseconds,
        offset_minutes,
    })
}

// ==== Templates ====

/// A single `%` placeholder of a [`Template`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `%Y`, the year at its natural width.
    Year,
    /// `%m`, the two digit month.
    Month,
    /// `%d`, the two digit day.
    Day,
    /// `%H`, the two digit hour.
    Hour,
    /// `%i`, the two digit minute.
    Minute,
    /// `%s`, the two digit second.
    Second,
    /// `%u`, the sub-second fraction at the configured precision.
    SubSecond,
    /// `%t`, the UTC offset as `±HH:00`.
    Offset,
}

impl Placeholder {
    fn from_char(c: char) -> Option<Self> {
        let placeholder = match c {
            'Y' => Self::Year,
            'm' => Self::Month,
            'd' => Self::Day,
            'H' => Self::Hour,
            'i' => Self::Minute,
            's' => Self::Second,
            'u' => Self::SubSecond,
            't' => Self::Offset,
            _ => return None,
        };
        Some(placeholder)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Field(Placeholder),
}

/// A parsed formatting template.
///
/// `%%` is a literal percent sign. Any other `%` must be followed by one of
/// the [`Placeholder`] letters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<'a> {
    segments: Vec<Segment<'a>>,
}

impl<'a> Template<'a> {
    /// Parses a template, failing with a `FormatError` on an unknown placeholder.
    pub fn parse(source: &'a str) -> DateResult<Self> {
        let mut segments = Vec::new();
        let mut rest = source;
        while let Some(index) = rest.find('%') {
            if index > 0 {
                segments.push(Segment::Literal(&rest[..index]));
            }
            let after = &rest[index + 1..];
            let mut chars = after.chars();
            match chars.next() {
                Some('%') => segments.push(Segment::Literal(&after[..1])),
                Some(c) => {
                    let placeholder = Placeholder::from_char(c).ok_or_else(|| {
                        DateError::format()
                            .with_message(format!("unknown template placeholder '%{c}'."))
                    })?;
                    segments.push(Segment::Field(placeholder));
                }
                None => {
                    return Err(DateError::format()
                        .with_message("template ends with an incomplete placeholder."))
                }
            }
            rest = chars.as_str();
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest));
        }
        Ok(Self { segments })
    }

    /// The `%Y-%m-%d` date template.
    pub fn date() -> Self {
        Self {
            segments: Vec::from([
                Segment::Field(Placeholder::Year),
                Segment::Literal("-"),
                Segment::Field(Placeholder::Month),
                Segment::Literal("-"),
                Segment::Field(Placeholder::Day),
            ]),
        }
    }

    /// The `%H:%i:%s` time template.
    pub fn time() -> Self {
        Self {
            segments: Vec::from([
                Segment::Field(Placeholder::Hour),
                Segment::Literal(":"),
                Segment::Field(Placeholder::Minute),
                Segment::Literal(":"),
                Segment::Field(Placeholder::Second),
            ]),
        }
    }

    /// Returns the placeholders of this template in order.
    pub fn placeholders(&self) -> impl Iterator<Item = Placeholder> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Field(placeholder) => Some(*placeholder),
            Segment::Literal(_) => None,
        })
    }
}

/// The field snapshot rendered by a [`FormattedDateValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FormattableFields {
    pub(crate) year: i32,
    pub(crate) month: u8,
    pub(crate) day: u8,
    pub(crate) hour: u8,
    pub(crate) minute: u8,
    pub(crate) second: u8,
    pub(crate) sub_second: u32,
    pub(crate) precision: u8,
    pub(crate) offset_minutes: i16,
}

impl FormattableFields {
    fn write_placeholder<W: core::fmt::Write + ?Sized>(
        &self,
        placeholder: Placeholder,
        sink: &mut W,
    ) -> core::fmt::Result {
        match placeholder {
            Placeholder::Year => self.year.write_to(sink),
            Placeholder::Month => write_padded_u8(self.month, sink),
            Placeholder::Day => write_padded_u8(self.day, sink),
            Placeholder::Hour => write_padded_u8(self.hour, sink),
            Placeholder::Minute => write_padded_u8(self.minute, sink),
            Placeholder::Second => write_padded_u8(self.second, sink),
            Placeholder::SubSecond => write_zero_padded(self.sub_second, self.precision, sink),
            Placeholder::Offset => {
                if self.offset_minutes < 0 {
                    sink.write_char('-')?;
                } else {
                    sink.write_char('+')?;
                }
                write_padded_u8((self.offset_minutes.unsigned_abs() / 60) as u8, sink)?;
                sink.write_str(":00")
            }
        }
    }

    fn placeholder_length_hint(&self, placeholder: Placeholder) -> LengthHint {
        match placeholder {
            Placeholder::Year => self.year.writeable_length_hint(),
            Placeholder::SubSecond => LengthHint::exact(self.precision.into()),
            Placeholder::Offset => LengthHint::exact(6),
            _ => LengthHint::exact(2),
        }
    }
}

/// A `DateValue` paired with a [`Template`], ready to be written.
#[derive(Debug, Clone)]
pub struct FormattedDateValue<'a> {
    pub(crate) fields: FormattableFields,
    pub(crate) template: &'a Template<'a>,
}

impl Writeable for FormattedDateValue<'_> {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        for segment in &self.template.segments {
            match segment {
                Segment::Literal(text) => sink.write_str(text)?,
                Segment::Field(placeholder) => self.fields.write_placeholder(*placeholder, sink)?,
            }
        }
        Ok(())
    }

    fn writeable_length_hint(&self) -> LengthHint {
        self.template
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => LengthHint::exact(text.len()),
                Segment::Field(placeholder) => self.fields.placeholder_length_hint(*placeholder),
            })
            .sum()
    }
}

impl_display_with_writeable!(FormattedDateValue<'_>);

/// Renders a template source against a set of fields.
pub(crate) fn render(fields: FormattableFields, source: &str) -> DateResult<String> {
    let template = Template::parse(source)?;
    let formatted = FormattedDateValue {
        fields,
        template: &template,
    };
    Ok(formatted.write_to_string().into_owned())
}

fn write_padded_u8<W: core::fmt::Write + ?Sized>(num: u8, sink: &mut W) -> core::fmt::Result {
    if num < 10 {
        sink.write_char('0')?;
    }
    num.write_to(sink)
}

fn write_zero_padded<W: core::fmt::Write + ?Sized>(
    value: u32,
    width: u8,
    sink: &mut W,
) -> core::fmt::Result {
    let mut digits = 1u8;
    let mut rest = value / 10;
    while rest > 0 {
        digits += 1;
        rest /= 10;
    }
    for _ in digits..width {
        sink.write_char('0')?;
    }
    value.write_to(sink)
}
