//! This module implements `TimeZone` and its components.
//!
//! A `TimeZone` pairs an identity (`TimeZoneIdentifier`) with the
//! `UtcOffset` that identity had at one specific local date-time. Offsets
//! of named zones vary across the year, so a `TimeZone` is only meaningful
//! next to the date-time it was resolved for.

use alloc::{borrow::Cow, string::String};

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    error::{RangeError, ResolutionError},
    parsers::{parse_identifier, write_padded_u8},
    utils::{SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE},
};

/// The identifier of the canonical UTC time zone.
pub const UTC_IDENTIFIER: &str = "UTC";

// ==== `UtcOffset` section ====

/// A UTC offset in seconds east of Greenwich.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcOffset(i32);

impl UtcOffset {
    /// The zero offset.
    pub const UTC: Self = Self(0);

    /// Creates a `UtcOffset` from seconds east of UTC.
    ///
    /// The offset must be strictly less than one day in magnitude.
    pub fn from_seconds(seconds: i32) -> Result<Self, RangeError> {
        if i64::from(seconds).abs() >= SECONDS_PER_DAY {
            return Err(RangeError::new("UTC offset must be less than 24 hours"));
        }
        Ok(Self(seconds))
    }

    /// Creates a `UtcOffset` from minutes east of UTC.
    pub fn from_minutes(minutes: i16) -> Result<Self, RangeError> {
        Self::from_seconds(i32::from(minutes) * 60)
    }

    /// Returns the offset in seconds.
    #[inline]
    #[must_use]
    pub const fn seconds(&self) -> i32 {
        self.0
    }

    /// Returns the offset in whole minutes when it has no seconds component.
    #[inline]
    #[must_use]
    pub const fn whole_minutes(&self) -> Option<i16> {
        if self.0 % 60 != 0 {
            return None;
        }
        Some((self.0 / 60) as i16)
    }
}

impl Writeable for UtcOffset {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        let sign = if self.0 < 0 { '-' } else { '+' };
        let abs = i64::from(self.0).unsigned_abs();
        let hour = (abs / SECONDS_PER_HOUR as u64) as u8;
        let minute = ((abs % SECONDS_PER_HOUR as u64) / SECONDS_PER_MINUTE as u64) as u8;
        let second = (abs % SECONDS_PER_MINUTE as u64) as u8;
        sink.write_char(sign)?;
        write_padded_u8(hour, sink)?;
        sink.write_char(':')?;
        write_padded_u8(minute, sink)?;
        if second != 0 {
            sink.write_char(':')?;
            write_padded_u8(second, sink)?;
        }
        Ok(())
    }

    fn writeable_length_hint(&self) -> LengthHint {
        if self.0 % 60 == 0 {
            return LengthHint::exact(6);
        }
        LengthHint::exact(9)
    }
}

impl_display_with_writeable!(UtcOffset);

// ==== `TimeZoneIdentifier` section ====

/// The identity of a time zone: an IANA style name or a fixed UTC offset.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeZoneIdentifier {
    IanaIdentifier(String),
    OffsetMinutes(i16),
}

impl TimeZoneIdentifier {
    /// Returns the canonical UTC identifier.
    pub fn utc() -> Self {
        Self::IanaIdentifier(UTC_IDENTIFIER.into())
    }

    /// Parses an identifier from a time zone name or a UTC offset string.
    ///
    /// `Z` and any casing of `UTC` normalize to the canonical UTC identifier.
    pub fn try_from_str(source: &str) -> Result<Self, ResolutionError> {
        parse_identifier(source)
    }

    /// Returns whether this is the canonical UTC identifier.
    pub fn is_utc(&self) -> bool {
        matches!(self, Self::IanaIdentifier(name) if name == UTC_IDENTIFIER)
    }

    /// Returns the identifier string: the IANA name or a `±HH:MM` offset.
    pub fn identifier(&self) -> Cow<'_, str> {
        match self {
            Self::IanaIdentifier(name) => Cow::Borrowed(name),
            Self::OffsetMinutes(_) => self.write_to_string(),
        }
    }
}

impl Default for TimeZoneIdentifier {
    fn default() -> Self {
        Self::utc()
    }
}

impl Writeable for TimeZoneIdentifier {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        match self {
            Self::IanaIdentifier(name) => sink.write_str(name),
            Self::OffsetMinutes(minutes) => {
                let sign = if *minutes < 0 { '-' } else { '+' };
                let abs = minutes.unsigned_abs();
                sink.write_char(sign)?;
                write_padded_u8((abs / 60) as u8, sink)?;
                sink.write_char(':')?;
                write_padded_u8((abs % 60) as u8, sink)
            }
        }
    }

    fn writeable_length_hint(&self) -> LengthHint {
        match self {
            Self::IanaIdentifier(name) => LengthHint::exact(name.len()),
            Self::OffsetMinutes(_) => LengthHint::exact(6),
        }
    }
}

impl_display_with_writeable!(TimeZoneIdentifier);

// ==== `TimeZone` section ====

/// A time zone identity together with the UTC offset it resolved to at a
/// specific local date-time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimeZone {
    identifier: TimeZoneIdentifier,
    offset: UtcOffset,
}

impl TimeZone {
    /// Creates a new `TimeZone` from an identifier and its resolved offset.
    ///
    /// This is the constructor time zone resolvers use. Consistency between
    /// the identifier and the offset is checked when the value is encoded.
    pub const fn new(identifier: TimeZoneIdentifier, offset: UtcOffset) -> Self {
        Self { identifier, offset }
    }

    /// Returns the canonical UTC time zone.
    pub fn utc() -> Self {
        Self::new(TimeZoneIdentifier::utc(), UtcOffset::UTC)
    }

    /// Creates a fixed offset time zone.
    pub fn from_offset_minutes(minutes: i16) -> Result<Self, RangeError> {
        let offset = UtcOffset::from_minutes(minutes)?;
        Ok(Self::new(TimeZoneIdentifier::OffsetMinutes(minutes), offset))
    }

    /// Returns this time zone's identifier.
    #[inline]
    pub fn identifier(&self) -> &TimeZoneIdentifier {
        &self.identifier
    }

    /// Returns the resolved UTC offset.
    #[inline]
    pub fn offset(&self) -> UtcOffset {
        self.offset
    }

    /// Returns whether this is the canonical UTC time zone.
    #[inline]
    pub fn is_utc(&self) -> bool {
        self.identifier.is_utc()
    }

    /// Returns the name stored in the time zone field of a wire composite.
    pub fn wire_name(&self) -> Cow<'_, str> {
        if self.is_utc() {
            return Cow::Borrowed(UTC_IDENTIFIER);
        }
        self.identifier.identifier()
    }

    /// Checks that the identifier and offset agree with each other.
    pub(crate) fn validate(&self) -> Result<(), RangeError> {
        match &self.identifier {
            TimeZoneIdentifier::IanaIdentifier(name) if name.is_empty() => {
                Err(RangeError::new("Time zone identifier is empty"))
            }
            TimeZoneIdentifier::IanaIdentifier(_) if self.is_utc() && self.offset != UtcOffset::UTC => {
                Err(RangeError::new("UTC time zone carries a non-zero offset"))
            }
            TimeZoneIdentifier::IanaIdentifier(_) => Ok(()),
            TimeZoneIdentifier::OffsetMinutes(minutes) => {
                let expected = UtcOffset::from_minutes(*minutes)?;
                if expected != self.offset {
                    return Err(RangeError::new(alloc::format!(
                        "Offset time zone {} carries the offset {}",
                        self.identifier,
                        self.offset
                    )));
                }
                Ok(())
            }
        }
    }
}

impl Default for TimeZone {
    fn default() -> Self {
        Self::utc()
    }
}

impl core::fmt::Display for TimeZone {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.wire_name())
    }
}

/// Returns the time zone to store for a value, substituting the canonical
/// UTC time zone when none was set.
#[inline]
pub(crate) fn normalize_timezone(timezone: Option<TimeZone>) -> TimeZone {
    timezone.unwrap_or_else(TimeZone::utc)
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{normalize_timezone, TimeZone, TimeZoneIdentifier, UtcOffset};

    #[test]
    fn offset_formatting() {
        assert_eq!(UtcOffset::from_minutes(330).unwrap().to_string(), "+05:30");
        assert_eq!(UtcOffset::from_minutes(-480).unwrap().to_string(), "-08:00");
        assert_eq!(UtcOffset::UTC.to_string(), "+00:00");
        // Local mean time of Amsterdam
        assert_eq!(UtcOffset::from_seconds(1172).unwrap().to_string(), "+00:19:32");
        assert!(UtcOffset::from_seconds(86_400).is_err());
        assert!(UtcOffset::from_minutes(-1440).is_err());
        assert_eq!(UtcOffset::from_seconds(-3600).unwrap().whole_minutes(), Some(-60));
        assert_eq!(UtcOffset::from_seconds(1172).unwrap().whole_minutes(), None);
    }

    #[test]
    fn wire_names() {
        assert_eq!(TimeZone::utc().wire_name(), "UTC");
        assert_eq!(
            TimeZone::from_offset_minutes(-330).unwrap().wire_name(),
            "-05:30"
        );
        let paris = TimeZone::new(
            TimeZoneIdentifier::IanaIdentifier("Europe/Paris".into()),
            UtcOffset::from_minutes(60).unwrap(),
        );
        assert_eq!(paris.wire_name(), "Europe/Paris");
        assert!(!paris.is_utc());
    }

    #[test]
    fn normalization() {
        assert_eq!(normalize_timezone(None), TimeZone::utc());
        let fixed = TimeZone::from_offset_minutes(90).unwrap();
        assert_eq!(normalize_timezone(Some(fixed.clone())), fixed);
    }

    #[test]
    fn validation() {
        assert!(TimeZone::utc().validate().is_ok());
        assert!(TimeZone::new(
            TimeZoneIdentifier::utc(),
            UtcOffset::from_minutes(60).unwrap()
        )
        .validate()
        .is_err());
        assert!(TimeZone::new(
            TimeZoneIdentifier::OffsetMinutes(60),
            UtcOffset::from_minutes(120).unwrap()
        )
        .validate()
        .is_err());
        assert!(TimeZone::new(
            TimeZoneIdentifier::IanaIdentifier("".into()),
            UtcOffset::UTC
        )
        .validate()
        .is_err());
    }
}
