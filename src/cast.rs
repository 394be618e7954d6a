//! The cast operation: turning caller input into a `ZonedDateTime`.
//!
//! Accepted inputs are date-time strings and `ZonedDateTime` values. Every
//! other input shape is rejected rather than coerced.

use alloc::{borrow::Cow, format, string::String};

use crate::{
    components::{
        timezone::{TimeZone, TimeZoneIdentifier, UtcOffset},
        ZonedDateTime,
    },
    error::{CastError, ParseError},
    iso::IsoDateTime,
    options::OffsetDisambiguation,
    parsers::{DateTimeParser, ParsedDateTime, ParsedOffset},
    provider::TimeZoneResolver,
};

/// The input of the cast operation.
#[derive(Debug, Clone, PartialEq)]
pub enum CastInput<'a> {
    /// A date-time string.
    Text(Cow<'a, str>),
    /// An already typed value.
    DateTime(ZonedDateTime),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Bytes(&'a [u8]),
    Null,
}

impl CastInput<'_> {
    /// Returns the name of this input's kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::DateTime(_) => "datetime",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Boolean(_) => "boolean",
            Self::Bytes(_) => "bytes",
            Self::Null => "null",
        }
    }
}

impl<'a> From<&'a str> for CastInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(Cow::Borrowed(value))
    }
}

impl From<String> for CastInput<'_> {
    fn from(value: String) -> Self {
        Self::Text(Cow::Owned(value))
    }
}

impl From<ZonedDateTime> for CastInput<'_> {
    fn from(value: ZonedDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<i64> for CastInput<'_> {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for CastInput<'_> {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for CastInput<'_> {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl<'a> From<&'a [u8]> for CastInput<'a> {
    fn from(value: &'a [u8]) -> Self {
        Self::Bytes(value)
    }
}

impl<'a, T: Into<CastInput<'a>>> From<Option<T>> for CastInput<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Casts the input into a `ZonedDateTime` that always carries a time zone.
///
/// A string with both a numeric offset and a conflicting time zone
/// annotation is rejected. See `cast_with_options` to change that.
///
/// ```rust
/// use zoned_composite::{cast, CastError, FixedOffsetResolver, TimeZone};
///
/// let zdt = cast("2021-03-15T10:30:00Z", &FixedOffsetResolver).unwrap();
/// assert_eq!(zdt.timezone(), Some(&TimeZone::utc()));
///
/// let err = cast(42i64, &FixedOffsetResolver).unwrap_err();
/// assert_eq!(err, CastError::Unsupported { kind: "integer" });
/// ```
pub fn cast<'a>(
    input: impl Into<CastInput<'a>>,
    resolver: &impl TimeZoneResolver,
) -> Result<ZonedDateTime, CastError> {
    cast_with_options(input, OffsetDisambiguation::default(), resolver)
}

/// Casts the input into a `ZonedDateTime`, using `offset_disambiguation`
/// when a string has both a numeric offset and a time zone annotation.
pub fn cast_with_options<'a>(
    input: impl Into<CastInput<'a>>,
    offset_disambiguation: OffsetDisambiguation,
    resolver: &impl TimeZoneResolver,
) -> Result<ZonedDateTime, CastError> {
    match input.into() {
        CastInput::Text(text) => {
            let parsed = DateTimeParser::new().parse_date_time(text)?;
            cast_parsed(parsed, offset_disambiguation, resolver)
        }
        CastInput::DateTime(value) => Ok(value.with_normalized_timezone()),
        other => Err(CastError::Unsupported { kind: other.kind() }),
    }
}

fn cast_parsed(
    parsed: ParsedDateTime,
    offset_disambiguation: OffsetDisambiguation,
    resolver: &impl TimeZoneResolver,
) -> Result<ZonedDateTime, CastError> {
    let ParsedDateTime {
        iso,
        offset,
        timezone,
    } = parsed;

    let timezone = match (timezone, offset) {
        (None, None | Some(ParsedOffset::Z)) => TimeZone::utc(),
        (None, Some(ParsedOffset::Offset(offset))) => fixed_offset_timezone(offset)?,
        (Some(identifier), None) => resolver
            .resolve_identifier(&identifier, iso)
            .map_err(CastError::UnknownTimezone)?,
        (Some(identifier), Some(offset)) => {
            reconcile_offset(&identifier, iso, offset, offset_disambiguation, resolver)?
        }
    };

    Ok(ZonedDateTime::new(iso, Some(timezone)))
}

fn reconcile_offset(
    identifier: &TimeZoneIdentifier,
    iso: IsoDateTime,
    offset: ParsedOffset,
    offset_disambiguation: OffsetDisambiguation,
    resolver: &impl TimeZoneResolver,
) -> Result<TimeZone, CastError> {
    match offset_disambiguation {
        OffsetDisambiguation::Ignore => resolver
            .resolve_identifier(identifier, iso)
            .map_err(CastError::UnknownTimezone),
        OffsetDisambiguation::Use => {
            // The annotation must still name a known time zone.
            resolver
                .resolve_identifier(identifier, iso)
                .map_err(CastError::UnknownTimezone)?;
            match offset {
                ParsedOffset::Z => Ok(TimeZone::utc()),
                ParsedOffset::Offset(offset) => fixed_offset_timezone(offset),
            }
        }
        // Either side of a fold or gap matches.
        OffsetDisambiguation::Reject => resolver
            .resolve_candidates(identifier, iso)
            .map_err(CastError::UnknownTimezone)?
            .into_iter()
            .find(|candidate| candidate.offset() == offset.offset())
            .ok_or_else(|| {
                CastError::InvalidFormat(ParseError::new(format!(
                    "Offset {} is not valid for time zone {identifier} at this local time",
                    offset.offset(),
                )))
            }),
    }
}

fn fixed_offset_timezone(offset: UtcOffset) -> Result<TimeZone, CastError> {
    let minutes = offset.whole_minutes().ok_or_else(|| {
        CastError::InvalidFormat(ParseError::new(
            "Offsets with a seconds component require a time zone annotation",
        ))
    })?;
    TimeZone::from_offset_minutes(minutes)
        .map_err(|e| CastError::InvalidFormat(ParseError::new(String::from(e.message()))))
}
