//! This module implements the ISO date and time records.
//!
//! The three record types are:
//!   - `IsoDateTime`
//!   - `IsoDate`
//!   - `IsoTime`
//!
//! An `IsoDate` holds a proleptic Gregorian year, month, and day.
//!
//! An `IsoTime` holds an hour, minute, second, and millisecond. Sub-millisecond
//! precision is not represented.
//!
//! An `IsoDateTime` is the pairing of an `IsoDate` and an `IsoTime` without
//! any time zone information.

use ixdtf::records::{DateRecord, TimeRecord};

use crate::{
    error::RangeError,
    utils::{self, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE},
};

/// The minimum supported ISO year.
pub const MIN_ISO_YEAR: i32 = -271_821;
/// The maximum supported ISO year.
pub const MAX_ISO_YEAR: i32 = 275_760;

/// `IsoDateTime` is the record of the `IsoDate` and `IsoTime` fields.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDateTime {
    pub date: IsoDate,
    pub time: IsoTime,
}

impl IsoDateTime {
    /// Creates a new `IsoDateTime` without any validation.
    pub(crate) const fn new_unchecked(date: IsoDate, time: IsoTime) -> Self {
        Self { date, time }
    }

    /// Creates a new validated `IsoDateTime`.
    pub fn new(date: IsoDate, time: IsoTime) -> Result<Self, RangeError> {
        date.validate()?;
        time.validate()?;
        Ok(Self::new_unchecked(date, time))
    }

    /// Checks that both the date and the time are within their valid ranges.
    pub fn validate(&self) -> Result<(), RangeError> {
        self.date.validate()?;
        self.time.validate()
    }

    /// Returns the number of seconds from the Unix epoch to this date-time,
    /// reading the fields as if they were UTC.
    ///
    /// The millisecond field is not included.
    pub(crate) fn as_local_epoch_seconds(&self) -> i64 {
        self.date.to_epoch_days() * SECONDS_PER_DAY + self.time.seconds_in_day()
    }
}

// ==== `IsoDate` section ====

/// `IsoDate` serves as a record for a proleptic Gregorian year, month, and day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl Default for IsoDate {
    fn default() -> Self {
        Self::new_unchecked(1970, 1, 1)
    }
}

impl IsoDate {
    /// Creates a new `IsoDate` without determining the validity.
    pub(crate) const fn new_unchecked(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Creates a new validated `IsoDate`.
    pub fn try_new(year: i32, month: u8, day: u8) -> Result<Self, RangeError> {
        let date = Self::new_unchecked(year, month, day);
        date.validate()?;
        Ok(date)
    }

    /// Checks the year, month, and day against the supported range.
    pub fn validate(&self) -> Result<(), RangeError> {
        if !(MIN_ISO_YEAR..=MAX_ISO_YEAR).contains(&self.year) {
            return Err(RangeError::new(alloc::format!(
                "Year {} is outside valid range ({MIN_ISO_YEAR} to {MAX_ISO_YEAR})",
                self.year
            )));
        }
        if !(1..=12).contains(&self.month) {
            return Err(RangeError::new("Month is outside valid range (1-12)"));
        }
        if !(1..=utils::iso_days_in_month(self.year, self.month)).contains(&self.day) {
            return Err(RangeError::new(
                "Day is outside valid range for the given month/year",
            ));
        }
        Ok(())
    }

    /// Creates an `IsoDate` from an `ixdtf` `DateRecord`.
    pub(crate) fn from_date_record(record: DateRecord) -> Result<Self, RangeError> {
        Self::try_new(record.year, record.month, record.day)
    }

    /// Returns the number of days since 1970-01-01.
    #[inline]
    pub(crate) fn to_epoch_days(self) -> i64 {
        utils::epoch_days_from_gregorian_date(self.year, self.month, self.day)
    }
}

// ==== `IsoTime` section ====

/// An `IsoTime` record holding a time of day with millisecond precision.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoTime {
    pub hour: u8,         // 0..=23
    pub minute: u8,       // 0..=59
    pub second: u8,       // 0..=59
    pub millisecond: u16, // 0..=999
}

impl IsoTime {
    /// Creates a new `IsoTime` without any validation.
    pub(crate) const fn new_unchecked(hour: u8, minute: u8, second: u8, millisecond: u16) -> Self {
        Self {
            hour,
            minute,
            second,
            millisecond,
        }
    }

    /// Creates a new validated `IsoTime`.
    pub fn try_new(hour: u8, minute: u8, second: u8, millisecond: u16) -> Result<Self, RangeError> {
        let time = Self::new_unchecked(hour, minute, second, millisecond);
        time.validate()?;
        Ok(time)
    }

    /// Returns an `IsoTime` set to 00:00:00.000
    pub const fn midnight() -> Self {
        Self::new_unchecked(0, 0, 0, 0)
    }

    /// Checks each field against its valid range.
    pub fn validate(&self) -> Result<(), RangeError> {
        if self.hour > 23 {
            return Err(RangeError::new("Hour is outside valid range (0-23)"));
        }
        if self.minute > 59 || self.second > 59 {
            return Err(RangeError::new(
                "Minute or second is outside valid range (0-59)",
            ));
        }
        if self.millisecond > 999 {
            return Err(RangeError::new(
                "Millisecond is outside valid range (0-999)",
            ));
        }
        Ok(())
    }

    /// Creates an `IsoTime` from an `ixdtf` `TimeRecord`.
    ///
    /// Leap seconds are constrained to 59 and any fractional digits beyond
    /// the millisecond are truncated.
    pub(crate) fn from_time_record(record: TimeRecord) -> Result<Self, RangeError> {
        let second = record.second.clamp(0, 59);
        let nanoseconds = match record.fraction {
            Some(fraction) => fraction
                .to_nanoseconds()
                .ok_or_else(|| RangeError::new("Fractional seconds exceed nanosecond precision"))?,
            None => 0,
        };
        let millisecond = (nanoseconds / 1_000_000) as u16;
        Self::try_new(record.hour, record.minute, second, millisecond)
    }

    #[inline]
    pub(crate) fn seconds_in_day(&self) -> i64 {
        i64::from(self.hour) * SECONDS_PER_HOUR
            + i64::from(self.minute) * SECONDS_PER_MINUTE
            + i64::from(self.second)
    }
}
