//! The composite storage representation and its decode and encode
//! operations.
//!
//! A stored value is a fixed two field tuple:
//!
//! ```text
//! (Timestamp(date, time with microseconds), Text(time zone name))
//! ```
//!
//! The timestamp holds the local wall-clock fields. The time zone name is
//! an IANA identifier, a `±HH:MM` offset, or `UTC`, and is never empty.

use alloc::{borrow::ToOwned, format, string::String};

use crate::{
    components::{timezone::normalize_timezone, ZonedDateTime},
    error::{DecodeError, EncodeError, RangeError},
    iso::{IsoDate, IsoDateTime, IsoTime},
    provider::TimeZoneResolver,
};

#[cfg(test)]
mod tests;

const MICROSECONDS_PER_MILLISECOND: u32 = 1_000;

/// The time of day stored in a composite, with microsecond precision.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WireTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub microsecond: u32,
}

impl WireTime {
    /// Creates a new validated `WireTime`.
    pub fn try_new(hour: u8, minute: u8, second: u8, microsecond: u32) -> Result<Self, RangeError> {
        let time = Self {
            hour,
            minute,
            second,
            microsecond,
        };
        time.validate()?;
        Ok(time)
    }

    /// Checks each field against its valid range.
    pub fn validate(&self) -> Result<(), RangeError> {
        if self.microsecond >= 1_000_000 {
            return Err(RangeError::new(
                "Microsecond is outside valid range (0-999999)",
            ));
        }
        IsoTime::new_unchecked(self.hour, self.minute, self.second, 0).validate()
    }

    /// Converts to an `IsoTime`, truncating the microseconds to whole
    /// milliseconds.
    fn to_iso_time(self) -> Result<IsoTime, RangeError> {
        self.validate()?;
        let millisecond = (self.microsecond / MICROSECONDS_PER_MILLISECOND) as u16;
        IsoTime::try_new(self.hour, self.minute, self.second, millisecond)
    }

    fn from_iso_time(time: IsoTime) -> Self {
        Self {
            hour: time.hour,
            minute: time.minute,
            second: time.second,
            microsecond: u32::from(time.millisecond) * MICROSECONDS_PER_MILLISECOND,
        }
    }
}

/// The timestamp field of a composite: a date and a time of day without a
/// time zone.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WireTimestamp {
    pub date: IsoDate,
    pub time: WireTime,
}

impl WireTimestamp {
    pub fn new(date: IsoDate, time: WireTime) -> Self {
        Self { date, time }
    }
}

/// A single field handed over by a storage driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireValue {
    Timestamp(WireTimestamp),
    Date(IsoDate),
    Time(WireTime),
    Text(String),
    Integer(i64),
    Null,
}

impl WireValue {
    /// Returns the name of this field's type.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timestamp(_) => "timestamp",
            Self::Date(_) => "date",
            Self::Time(_) => "time",
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Null => "null",
        }
    }
}

/// The composite storage tuple of a `ZonedDateTime`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireComposite {
    pub timestamp: WireTimestamp,
    pub timezone_name: String,
}

impl WireComposite {
    pub fn new(timestamp: WireTimestamp, timezone_name: impl Into<String>) -> Self {
        Self {
            timestamp,
            timezone_name: timezone_name.into(),
        }
    }

    /// Builds a composite from the positional fields of a stored row.
    ///
    /// The fields must be exactly `[Timestamp, Text]`.
    pub fn try_from_fields(fields: &[WireValue]) -> Result<Self, DecodeError> {
        match fields {
            [WireValue::Timestamp(timestamp), WireValue::Text(name)] => {
                Ok(Self::new(*timestamp, name.as_str()))
            }
            [first, second] => Err(DecodeError::malformed(format!(
                "Expected fields (timestamp, text), found ({}, {})",
                first.kind(),
                second.kind()
            ))),
            _ => Err(DecodeError::malformed(format!(
                "Expected 2 fields, found {}",
                fields.len()
            ))),
        }
    }

    /// Returns the positional fields of this composite.
    pub fn into_fields(self) -> [WireValue; 2] {
        [
            WireValue::Timestamp(self.timestamp),
            WireValue::Text(self.timezone_name),
        ]
    }
}

impl TryFrom<&[WireValue]> for WireComposite {
    type Error = DecodeError;

    fn try_from(fields: &[WireValue]) -> Result<Self, Self::Error> {
        Self::try_from_fields(fields)
    }
}

/// Decodes a composite into a `ZonedDateTime`.
///
/// The microseconds are truncated to milliseconds. The time zone is
/// resolved at the stored local date-time, so a named zone carries the
/// offset in effect at that time.
pub fn decode(
    wire: &WireComposite,
    resolver: &impl TimeZoneResolver,
) -> Result<ZonedDateTime, DecodeError> {
    let WireTimestamp { date, time } = wire.timestamp;
    date.validate()
        .map_err(|e| DecodeError::malformed(e.message().to_owned()))?;
    let time = time
        .to_iso_time()
        .map_err(|e| DecodeError::malformed(e.message().to_owned()))?;
    if wire.timezone_name.is_empty() {
        return Err(DecodeError::malformed("Time zone name is empty"));
    }

    let iso = IsoDateTime::new_unchecked(date, time);
    let timezone = resolver.resolve(&wire.timezone_name, iso)?;
    Ok(ZonedDateTime::new(iso, Some(timezone)))
}

/// Decodes the positional fields of a stored row into a `ZonedDateTime`.
pub fn decode_fields(
    fields: &[WireValue],
    resolver: &impl TimeZoneResolver,
) -> Result<ZonedDateTime, DecodeError> {
    decode(&WireComposite::try_from_fields(fields)?, resolver)
}

/// Encodes a `ZonedDateTime` into its composite.
///
/// A value without a time zone is stored with the name `UTC`.
pub fn encode(value: &ZonedDateTime) -> Result<WireComposite, EncodeError> {
    value
        .validate()
        .map_err(|e| EncodeError::invalid(e.message().to_owned()))?;

    let iso = value.iso_date_time();
    let timezone = normalize_timezone(value.timezone().cloned());
    Ok(WireComposite::new(
        WireTimestamp::new(iso.date, WireTime::from_iso_time(iso.time)),
        timezone.wire_name(),
    ))
}
