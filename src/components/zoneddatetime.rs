//! This module implements `ZonedDateTime` and any directly related algorithms.

use alloc::string::String;

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    components::timezone::{normalize_timezone, TimeZone, TimeZoneIdentifier, UtcOffset},
    error::RangeError,
    iso::{IsoDate, IsoDateTime, IsoTime},
    parsers::{write_millisecond, write_padded_u8, write_year},
};

/// A calendar date and time of day with an optional `TimeZone`.
///
/// The time of day has millisecond precision. Values returned by `cast` and
/// `decode` always carry a time zone; a value without one is called naive
/// and is normalized to UTC at those boundaries.
///
/// `ZonedDateTime` is immutable. Every transformation returns a new value.
///
/// ## Example
///
/// ```rust
/// use zoned_composite::{TimeZone, ZonedDateTime};
///
/// let zdt = ZonedDateTime::try_new(2021, 3, 15, 10, 30, 0, 0, Some(TimeZone::utc())).unwrap();
/// assert_eq!(zdt.to_string(), "2021-03-15T10:30:00+00:00[UTC]");
///
/// let fixed = TimeZone::from_offset_minutes(-240).unwrap();
/// let zdt = ZonedDateTime::try_new(2021, 3, 15, 10, 30, 0, 250, Some(fixed)).unwrap();
/// assert_eq!(zdt.to_string(), "2021-03-15T10:30:00.250-04:00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZonedDateTime {
    iso: IsoDateTime,
    timezone: Option<TimeZone>,
}

// ==== Private API ====

impl ZonedDateTime {
    /// Returns a copy of this value with an unset time zone replaced by UTC.
    #[inline]
    #[must_use]
    pub(crate) fn with_normalized_timezone(self) -> Self {
        Self {
            iso: self.iso,
            timezone: Some(normalize_timezone(self.timezone)),
        }
    }

    /// Checks the components of a value that may have been assembled from
    /// struct literals.
    pub(crate) fn validate(&self) -> Result<(), RangeError> {
        self.iso.validate()?;
        if let Some(timezone) = &self.timezone {
            timezone.validate()?;
        }
        Ok(())
    }
}

// ==== Public API ====

impl ZonedDateTime {
    /// Creates a new `ZonedDateTime` from an ISO date-time and a time zone.
    #[inline]
    #[must_use]
    pub fn new(iso: IsoDateTime, timezone: Option<TimeZone>) -> Self {
        Self { iso, timezone }
    }

    /// Creates a new `ZonedDateTime` without a time zone.
    #[inline]
    #[must_use]
    pub fn new_naive(iso: IsoDateTime) -> Self {
        Self::new(iso, None)
    }

    /// Creates a new `ZonedDateTime` from its individual fields, validating
    /// each one.
    #[allow(clippy::too_many_arguments)]
    pub fn try_new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        millisecond: u16,
        timezone: Option<TimeZone>,
    ) -> Result<Self, RangeError> {
        let date = IsoDate::try_new(year, month, day)?;
        let time = IsoTime::try_new(hour, minute, second, millisecond)?;
        Ok(Self::new(IsoDateTime::new_unchecked(date, time), timezone))
    }

    /// Returns the ISO date-time record.
    #[inline]
    #[must_use]
    pub fn iso_date_time(&self) -> IsoDateTime {
        self.iso
    }

    /// Returns the ISO date record.
    #[inline]
    #[must_use]
    pub fn date(&self) -> IsoDate {
        self.iso.date
    }

    /// Returns the ISO time record.
    #[inline]
    #[must_use]
    pub fn time(&self) -> IsoTime {
        self.iso.time
    }

    #[inline]
    #[must_use]
    pub fn year(&self) -> i32 {
        self.iso.date.year
    }

    #[inline]
    #[must_use]
    pub fn month(&self) -> u8 {
        self.iso.date.month
    }

    #[inline]
    #[must_use]
    pub fn day(&self) -> u8 {
        self.iso.date.day
    }

    #[inline]
    #[must_use]
    pub fn hour(&self) -> u8 {
        self.iso.time.hour
    }

    #[inline]
    #[must_use]
    pub fn minute(&self) -> u8 {
        self.iso.time.minute
    }

    #[inline]
    #[must_use]
    pub fn second(&self) -> u8 {
        self.iso.time.second
    }

    #[inline]
    #[must_use]
    pub fn millisecond(&self) -> u16 {
        self.iso.time.millisecond
    }

    /// Returns the time zone, or `None` for a naive value.
    #[inline]
    #[must_use]
    pub fn timezone(&self) -> Option<&TimeZone> {
        self.timezone.as_ref()
    }

    /// Returns the resolved UTC offset, or `None` for a naive value.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> Option<UtcOffset> {
        self.timezone.as_ref().map(TimeZone::offset)
    }

    /// Returns whether this value has no time zone.
    #[inline]
    #[must_use]
    pub fn is_naive(&self) -> bool {
        self.timezone.is_none()
    }

    /// Returns the milliseconds since the Unix epoch of this value's
    /// instant. A naive value is read as UTC.
    #[must_use]
    pub fn epoch_milliseconds(&self) -> i64 {
        let offset = self.offset().map_or(0, |offset| i64::from(offset.seconds()));
        (self.iso.as_local_epoch_seconds() - offset) * 1_000
            + i64::from(self.iso.time.millisecond)
    }

    /// Returns the RFC 9557 representation of this value.
    #[inline]
    #[must_use]
    pub fn to_ixdtf_string(&self) -> String {
        self.write_to_string().into_owned()
    }
}

impl Writeable for ZonedDateTime {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        let IsoDateTime { date, time } = self.iso;
        write_year(date.year, sink)?;
        sink.write_char('-')?;
        write_padded_u8(date.month, sink)?;
        sink.write_char('-')?;
        write_padded_u8(date.day, sink)?;
        sink.write_char('T')?;
        write_padded_u8(time.hour, sink)?;
        sink.write_char(':')?;
        write_padded_u8(time.minute, sink)?;
        sink.write_char(':')?;
        write_padded_u8(time.second, sink)?;
        if time.millisecond != 0 {
            sink.write_char('.')?;
            write_millisecond(time.millisecond, sink)?;
        }

        let Some(timezone) = &self.timezone else {
            return Ok(());
        };
        timezone.offset().write_to(sink)?;
        if let TimeZoneIdentifier::IanaIdentifier(name) = timezone.identifier() {
            sink.write_char('[')?;
            sink.write_str(name)?;
            sink.write_char(']')?;
        }
        Ok(())
    }

    fn writeable_length_hint(&self) -> LengthHint {
        let year = if (0..=9999).contains(&self.iso.date.year) {
            4
        } else {
            7
        };
        // -MM-DDTHH:MM:SS
        let mut hint = LengthHint::exact(year + 15);
        if self.iso.time.millisecond != 0 {
            hint += 4;
        }
        if let Some(timezone) = &self.timezone {
            hint += timezone.offset().writeable_length_hint();
            if let TimeZoneIdentifier::IanaIdentifier(name) = timezone.identifier() {
                hint += name.len() + 2;
            }
        }
        hint
    }
}

impl_display_with_writeable!(ZonedDateTime);
