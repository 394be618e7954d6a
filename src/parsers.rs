//! This module implements date-time string parsing and the shared ISO
//! formatting helpers.
//!
//! Parsing delegates the grammar to `ixdtf` and validates the raw record it
//! produces into ISO records. The accepted profile is the ISO 8601 extended
//! format as profiled by RFC 9557:
//!
//! ```text
//! YYYY-MM-DD(T| )HH:MM:SS[.fffffffff][Z|±HH:MM][[time zone]]
//! ```

use alloc::{borrow::Cow, format, string::String};

use ixdtf::{
    encoding::Utf8,
    parsers::IxdtfParser,
    records::{IxdtfParseRecord, TimeZoneRecord, UtcOffsetRecordOrZ},
    ParseError as IxdtfParseError,
};
use writeable::Writeable;

use crate::{
    components::timezone::{TimeZoneIdentifier, UtcOffset},
    error::ParseError,
    iso::{IsoDate, IsoDateTime, IsoTime},
    utils::{SECONDS_PER_HOUR, SECONDS_PER_MINUTE},
};

mod timezone;

pub(crate) use timezone::parse_identifier;

const ISO_CALENDAR: &[u8] = b"iso8601";

/// The UTC offset portion of a parsed date-time string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedOffset {
    /// The `Z` designator.
    Z,
    /// A numeric `±HH:MM[:SS]` offset.
    Offset(UtcOffset),
}

impl ParsedOffset {
    /// Returns the offset this designator stands for.
    pub fn offset(&self) -> UtcOffset {
        match self {
            Self::Z => UtcOffset::UTC,
            Self::Offset(offset) => *offset,
        }
    }
}

/// A validated date-time string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDateTime {
    /// The local date and time written in the string.
    pub iso: IsoDateTime,
    /// The UTC offset, if one was written.
    pub offset: Option<ParsedOffset>,
    /// The bracketed time zone annotation, if one was written.
    pub timezone: Option<TimeZoneIdentifier>,
}

/// Maps an `ixdtf` parse error to a `ParseError`.
fn map_parse_error(err: IxdtfParseError) -> ParseError {
    ParseError::new(format!("Parse error: {err:?}"))
}

/// Public parser that wraps `IxdtfParser` and validates its records.
#[derive(Debug, Default, Clone, Copy)]
pub struct DateTimeParser;

impl DateTimeParser {
    /// Creates a new `DateTimeParser`.
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    /// Parses a string containing a full date and time.
    pub fn parse_date_time<'a>(
        &self,
        source: impl Into<Cow<'a, str>>,
    ) -> Result<ParsedDateTime, ParseError> {
        let source = source.into();
        let record = IxdtfParser::from_str(&source)
            .parse()
            .map_err(map_parse_error)?;
        self.validate_and_build_date_time(record)
    }

    fn validate_and_build_date_time(
        &self,
        record: IxdtfParseRecord<'_, Utf8>,
    ) -> Result<ParsedDateTime, ParseError> {
        if let Some(calendar) = record.calendar {
            if !calendar.eq_ignore_ascii_case(ISO_CALENDAR) {
                return Err(ParseError::new("Only the iso8601 calendar is supported"));
            }
        }

        let date_record = record
            .date
            .ok_or_else(|| ParseError::new("Date component is required"))?;
        let time_record = record
            .time
            .ok_or_else(|| ParseError::new("Time component is required"))?;

        let date = IsoDate::from_date_record(date_record)
            .map_err(|e| ParseError::new(String::from(e.message())))?;
        let time = IsoTime::from_time_record(time_record)
            .map_err(|e| ParseError::new(String::from(e.message())))?;

        let offset = record.offset.map(parse_offset_record).transpose()?;
        let timezone = record
            .tz
            .map(|annotation| parse_timezone_record(annotation.tz))
            .transpose()?;

        Ok(ParsedDateTime {
            iso: IsoDateTime::new_unchecked(date, time),
            offset,
            timezone,
        })
    }
}

fn parse_offset_record(record: UtcOffsetRecordOrZ) -> Result<ParsedOffset, ParseError> {
    match record {
        UtcOffsetRecordOrZ::Z => Ok(ParsedOffset::Z),
        UtcOffsetRecordOrZ::Offset(offset) => {
            let seconds = i64::from(offset.hour()) * SECONDS_PER_HOUR
                + i64::from(offset.minute()) * SECONDS_PER_MINUTE
                + i64::from(offset.second().unwrap_or(0));
            let seconds = seconds * offset.sign() as i64;
            UtcOffset::from_seconds(seconds as i32)
                .map(ParsedOffset::Offset)
                .map_err(|e| ParseError::new(String::from(e.message())))
        }
    }
}

fn parse_timezone_record(
    record: TimeZoneRecord<'_, Utf8>,
) -> Result<TimeZoneIdentifier, ParseError> {
    match record {
        TimeZoneRecord::Name(name) => {
            let name = core::str::from_utf8(name)
                .map_err(|_| ParseError::new("Time zone annotation is not valid UTF-8"))?;
            parse_identifier(name).map_err(|e| ParseError::new(String::from(e.message())))
        }
        TimeZoneRecord::Offset(offset) => {
            let minutes = (i16::from(offset.hour) * 60 + i16::from(offset.minute))
                * i16::from(offset.sign as i8);
            Ok(TimeZoneIdentifier::OffsetMinutes(minutes))
        }
        #[allow(unreachable_patterns)]
        _ => Err(ParseError::new("Unsupported time zone annotation")),
    }
}

// ==== Formatting helpers ====

pub(crate) fn write_padded_u8<W: core::fmt::Write + ?Sized>(
    num: u8,
    sink: &mut W,
) -> core::fmt::Result {
    if num < 10 {
        sink.write_char('0')?;
    }
    num.write_to(sink)
}

pub(crate) fn write_year<W: core::fmt::Write + ?Sized>(year: i32, sink: &mut W) -> core::fmt::Result {
    if (0..=9999).contains(&year) {
        write_four_digit_year(year, sink)
    } else {
        write_extended_year(year, sink)
    }
}

fn write_four_digit_year<W: core::fmt::Write + ?Sized>(
    mut y: i32,
    sink: &mut W,
) -> core::fmt::Result {
    (y / 1_000).write_to(sink)?;
    y %= 1_000;
    (y / 100).write_to(sink)?;
    y %= 100;
    (y / 10).write_to(sink)?;
    y %= 10;
    y.write_to(sink)
}

fn write_extended_year<W: core::fmt::Write + ?Sized>(y: i32, sink: &mut W) -> core::fmt::Result {
    let sign = if y < 0 { '-' } else { '+' };
    sink.write_char(sign)?;
    let abs = y.unsigned_abs();
    let mut divisor = 100_000;
    while divisor != 0 {
        ((abs / divisor) % 10).write_to(sink)?;
        divisor /= 10;
    }
    Ok(())
}

pub(crate) fn write_millisecond<W: core::fmt::Write + ?Sized>(
    millisecond: u16,
    sink: &mut W,
) -> core::fmt::Result {
    (millisecond / 100).write_to(sink)?;
    ((millisecond / 10) % 10).write_to(sink)?;
    (millisecond % 10).write_to(sink)
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::{write_extended_year, write_year, DateTimeParser, ParsedOffset};
    use crate::{
        components::timezone::{TimeZoneIdentifier, UtcOffset},
        iso::{IsoDate, IsoTime},
    };

    #[test]
    fn parses_utc_designator() {
        let parsed = DateTimeParser::new()
            .parse_date_time("2021-03-15T10:30:00Z")
            .unwrap();
        assert_eq!(parsed.iso.date, IsoDate::try_new(2021, 3, 15).unwrap());
        assert_eq!(parsed.iso.time, IsoTime::try_new(10, 30, 0, 0).unwrap());
        assert_eq!(parsed.offset, Some(ParsedOffset::Z));
        assert_eq!(parsed.timezone, None);
    }

    #[test]
    fn parses_space_separator_and_offset() {
        let parsed = DateTimeParser::new()
            .parse_date_time("2021-03-15 10:30:00.25-04:00")
            .unwrap();
        assert_eq!(parsed.iso.time.millisecond, 250);
        assert_eq!(
            parsed.offset,
            Some(ParsedOffset::Offset(UtcOffset::from_minutes(-240).unwrap()))
        );
    }

    #[test]
    fn truncates_sub_millisecond_fraction() {
        let parsed = DateTimeParser::new()
            .parse_date_time("2021-03-15T10:30:00.123999")
            .unwrap();
        assert_eq!(parsed.iso.time.millisecond, 123);
        assert_eq!(parsed.offset, None);
    }

    #[test]
    fn parses_annotation() {
        let parsed = DateTimeParser::new()
            .parse_date_time("2021-07-01T12:00:00+02:00[Europe/Paris]")
            .unwrap();
        assert_eq!(
            parsed.timezone,
            Some(TimeZoneIdentifier::IanaIdentifier("Europe/Paris".into()))
        );

        let parsed = DateTimeParser::new()
            .parse_date_time("2021-07-01T12:00:00[-03:30]")
            .unwrap();
        assert_eq!(parsed.timezone, Some(TimeZoneIdentifier::OffsetMinutes(-210)));
    }

    #[test]
    fn rejects_invalid_input() {
        let parser = DateTimeParser::new();
        assert!(parser.parse_date_time("not-a-date").is_err());
        assert!(parser.parse_date_time("2021-03-15").is_err());
        assert!(parser.parse_date_time("2021-02-30T00:00:00").is_err());
        assert!(parser.parse_date_time("2021-03-15T25:00:00").is_err());
        assert!(parser.parse_date_time("").is_err());
        assert!(parser
            .parse_date_time("2021-03-15T10:30:00[u-ca=japanese]")
            .is_err());
        assert!(parser
            .parse_date_time("2021-03-15T10:30:00[u-ca=iso8601]")
            .is_ok());
    }

    #[test]
    fn year_formatting() {
        let mut out = String::new();
        write_year(2021, &mut out).unwrap();
        write_year(7, &mut out).unwrap();
        assert_eq!(out, "20210007");

        let mut out = String::new();
        write_extended_year(-271_821, &mut out).unwrap();
        assert_eq!(out, "-271821");

        let mut out = String::new();
        write_year(12_345, &mut out).unwrap();
        assert_eq!(out, "+012345");
    }
}
