//! A `TimeZoneResolver` backed by the IANA time zone database.
//!
//! Zone data is taken from the database bundled by `jiff-tzdb` and parsed
//! with the `tzif` crate. `TZif` is laid out by [RFC 8536][rfc8536]: a
//! table of transition instants, the local time type in effect after each
//! transition, and a POSIX TZ string footer describing the rule in effect
//! after the last transition.
//!
//! Resolution works on a local date-time, which may map to zero, one, or
//! two instants. For example, `2017-03-12T02:30:00` does not exist in
//! `America/New_York` since clocks jump from 02:00 to 03:00, and
//! `2017-11-05T01:30:00` happens twice since clocks fall back from 02:00 to
//! 01:00. `Disambiguation` decides which offset is returned in both cases.
//!
//! [rfc8536]: https://datatracker.ietf.org/doc/html/rfc8536

use alloc::{collections::BTreeMap, format, string::ToString, vec, vec::Vec};
use std::sync::{Arc, RwLock};

use combine::Parser;
use tzif::data::{
    posix::{PosixTzString, TimeZoneVariantInfo, TransitionDay},
    tzif::{DataBlock, LocalTimeTypeRecord, TzifData},
};

use crate::{
    components::timezone::{TimeZone, TimeZoneIdentifier, UtcOffset},
    error::ResolutionError,
    iso::IsoDateTime,
    options::Disambiguation,
    provider::TimeZoneResolver,
    utils::{self, SECONDS_PER_DAY},
};

/// `LocalTimeRecord` represents a local time offset record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTimeRecord {
    /// Whether the local time record is a Daylight Savings Time.
    pub is_dst: bool,
    /// The time zone offset in seconds.
    pub offset: i64,
}

impl LocalTimeRecord {
    // POSIX TZ strings store offsets west of Greenwich.
    fn from_daylight_savings_time(info: &TimeZoneVariantInfo) -> Self {
        Self {
            is_dst: true,
            offset: -info.offset.0,
        }
    }

    fn from_standard_time(info: &TimeZoneVariantInfo) -> Self {
        Self {
            is_dst: false,
            offset: -info.offset.0,
        }
    }
}

impl From<LocalTimeTypeRecord> for LocalTimeRecord {
    fn from(value: LocalTimeTypeRecord) -> Self {
        Self {
            is_dst: value.is_dst,
            offset: value.utoff.0,
        }
    }
}

/// The result of looking up the offsets valid for a local date-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalTimeRecordResult {
    /// The local date-time is skipped by a transition.
    Gap {
        before: LocalTimeRecord,
        after: LocalTimeRecord,
    },
    /// Exactly one offset is valid.
    Single(LocalTimeRecord),
    /// The local date-time is repeated by a transition.
    Fold {
        before: LocalTimeRecord,
        after: LocalTimeRecord,
    },
}

impl LocalTimeRecordResult {
    /// Applies a `Disambiguation` option, returning the selected record.
    pub fn disambiguate(
        self,
        disambiguation: Disambiguation,
    ) -> Result<LocalTimeRecord, ResolutionError> {
        match self {
            Self::Single(record) => Ok(record),
            Self::Fold { before, after } => match disambiguation {
                Disambiguation::Compatible | Disambiguation::Earlier => Ok(before),
                Disambiguation::Later => Ok(after),
                Disambiguation::Reject => Err(ResolutionError::disambiguation()
                    .with_message("Local time is ambiguous in this time zone")),
            },
            Self::Gap { before, after } => match disambiguation {
                Disambiguation::Compatible | Disambiguation::Later => Ok(before),
                Disambiguation::Earlier => Ok(after),
                Disambiguation::Reject => Err(ResolutionError::disambiguation()
                    .with_message("Local time does not exist in this time zone")),
            },
        }
    }
}

/// A parsed `TZif` file.
///
/// This extends the parsed type from the `tzif` [crate][tzif-crate] with
/// offset lookups.
///
/// [tzif-crate]: https://docs.rs/tzif/latest/tzif/
#[derive(Debug, Clone)]
pub struct Tzif {
    pub data_block1: DataBlock,
    pub data_block2: Option<DataBlock>,
    pub footer: Option<PosixTzString>,
}

impl From<TzifData> for Tzif {
    fn from(value: TzifData) -> Self {
        let TzifData {
            data_block1,
            data_block2,
            footer,
            ..
        } = value;

        Self {
            data_block1,
            data_block2,
            footer,
        }
    }
}

impl Tzif {
    pub fn from_bytes(data: &[u8]) -> Result<Self, ResolutionError> {
        let Ok((parse_result, _)) = tzif::parse::tzif::tzif().parse(data) else {
            return Err(ResolutionError::data().with_message("Illformed Tzif data."));
        };
        Ok(Self::from(parse_result))
    }

    pub fn posix_tz_string(&self) -> Option<&PosixTzString> {
        self.footer.as_ref()
    }

    /// Returns the 64-bit data block, falling back to the version 1 block.
    pub fn data_block(&self) -> &DataBlock {
        self.data_block2.as_ref().unwrap_or(&self.data_block1)
    }

    /// Returns the local time record in effect at an instant.
    pub fn get(&self, epoch_seconds: i64) -> Result<LocalTimeRecord, ResolutionError> {
        let db = self.data_block();
        let idx = db
            .transition_times
            .partition_point(|transition| transition.0 <= epoch_seconds);

        if idx == db.transition_times.len() {
            // Beyond the transition table the time zone is resolved
            // with the POSIX tz string.
            if let Some(posix_tz_string) = self.posix_tz_string() {
                return resolve_posix_tz_string(posix_tz_string, epoch_seconds);
            }
        }
        if idx == 0 {
            // Instants before the first transition use local time type 0.
            return db
                .local_time_type_records
                .first()
                .map(|record| (*record).into())
                .ok_or_else(|| ResolutionError::data().with_message("Tzif has no local time types."));
        }
        get_local_record(db, idx - 1).map(Into::into)
    }

    /// Returns the offsets valid for a local date-time, expressed as seconds
    /// since the epoch read as UTC.
    ///
    /// Candidates are found by probing the offset in effect one day on
    /// either side of the local time, then checking whether each offset
    /// maps the local time back onto itself.
    pub fn get_local(&self, local_seconds: i64) -> Result<LocalTimeRecordResult, ResolutionError> {
        let before = self.get(local_seconds - SECONDS_PER_DAY)?;
        let after = self.get(local_seconds + SECONDS_PER_DAY)?;

        let before_valid = self.get(local_seconds - before.offset)?.offset == before.offset;
        if before.offset == after.offset {
            if before_valid {
                return Ok(LocalTimeRecordResult::Single(before));
            }
            return self
                .get(local_seconds - before.offset)
                .map(LocalTimeRecordResult::Single);
        }
        let after_valid = self.get(local_seconds - after.offset)?.offset == after.offset;

        Ok(match (before_valid, after_valid) {
            (true, true) => LocalTimeRecordResult::Fold { before, after },
            (true, false) => LocalTimeRecordResult::Single(before),
            (false, true) => LocalTimeRecordResult::Single(after),
            (false, false) => LocalTimeRecordResult::Gap { before, after },
        })
    }
}

#[inline]
fn get_local_record(db: &DataBlock, idx: usize) -> Result<LocalTimeTypeRecord, ResolutionError> {
    // NOTE: Transition type can be empty. If no transition_type exists,
    // then use 0 as the default index of local_time_type_records.
    let type_idx = db.transition_types.get(idx).copied().unwrap_or(0);
    db.local_time_type_records
        .get(type_idx)
        .copied()
        .ok_or_else(|| ResolutionError::data().with_message("Tzif transition type is out of range."))
}

/// Resolve the footer of a tzif file for an instant.
fn resolve_posix_tz_string(
    posix_tz_string: &PosixTzString,
    seconds: i64,
) -> Result<LocalTimeRecord, ResolutionError> {
    let std = LocalTimeRecord::from_standard_time(&posix_tz_string.std_info);
    let Some(dst_variant) = &posix_tz_string.dst_info else {
        // Regardless of the time, there is one variant and we can return it.
        return Ok(std);
    };
    let dst = LocalTimeRecord::from_daylight_savings_time(&dst_variant.variant_info);

    let year = utils::epoch_days_to_year((seconds + std.offset).div_euclid(SECONDS_PER_DAY));

    // Transition times are written in the local time in effect before the
    // transition.
    let start = transition_day_to_epoch_seconds(&dst_variant.start_date.day, year)?
        + dst_variant.start_date.time.0
        - std.offset;
    let end = transition_day_to_epoch_seconds(&dst_variant.end_date.day, year)?
        + dst_variant.end_date.time.0
        - dst.offset;

    // Southern hemisphere rules start DST late in the year and end it early.
    let is_dst = if start < end {
        start <= seconds && seconds < end
    } else {
        seconds < end || start <= seconds
    };

    Ok(if is_dst { dst } else { std })
}

/// Returns local midnight of a POSIX rule's transition day, in seconds.
fn transition_day_to_epoch_seconds(day: &TransitionDay, year: i32) -> Result<i64, ResolutionError> {
    let jan_first = utils::epoch_days_from_gregorian_date(year, 1, 1);
    let epoch_days = match *day {
        // `Jn`: 1-based, February 29 is never counted.
        TransitionDay::NoLeap(day) => {
            let leap_adjustment = i64::from(utils::is_leap_year(year) && day >= 60);
            jan_first + i64::from(day) - 1 + leap_adjustment
        }
        // `n`: 0-based, February 29 is counted in leap years.
        TransitionDay::WithLeap(day) => jan_first + i64::from(day),
        // `Mm.w.d`: day `d` of week `w` of month `m`, where week 5 is the last.
        TransitionDay::Mwd(month, week, weekday) => {
            let month = u8::try_from(month)
                .ok()
                .filter(|m| (1..=12).contains(m))
                .ok_or_else(|| ResolutionError::data().with_message("Invalid POSIX rule month."))?;
            let first = utils::epoch_days_from_gregorian_date(year, month, 1);
            let first_weekday = i64::from(utils::epoch_days_to_day_of_week(first));
            let mut day_of_month =
                1 + (i64::from(weekday) - first_weekday).rem_euclid(7) + 7 * (i64::from(week) - 1);
            let days_in_month = i64::from(utils::iso_days_in_month(year, month));
            while day_of_month > days_in_month {
                day_of_month -= 7;
            }
            first + day_of_month - 1
        }
    };
    Ok(epoch_days * SECONDS_PER_DAY)
}

/// A `TimeZoneResolver` over the bundled IANA time zone database.
///
/// Parsed zones are cached, so a single resolver should be shared rather
/// than created per lookup.
#[derive(Debug, Default)]
pub struct TzdbResolver {
    cache: RwLock<BTreeMap<&'static str, Arc<Tzif>>>,
    disambiguation: Disambiguation,
}

impl TzdbResolver {
    /// Creates a resolver with the given `Disambiguation` option.
    pub fn with_disambiguation(disambiguation: Disambiguation) -> Self {
        Self {
            cache: RwLock::default(),
            disambiguation,
        }
    }

    /// Returns this resolver's `Disambiguation` option.
    pub fn disambiguation(&self) -> Disambiguation {
        self.disambiguation
    }

    /// Returns the canonical identifier and the parsed zone data for a time
    /// zone name. The lookup ignores ASCII case.
    pub fn get(&self, identifier: &str) -> Result<(&'static str, Arc<Tzif>), ResolutionError> {
        let Some((canonical_name, data)) = jiff_tzdb::get(identifier) else {
            return Err(ResolutionError::unknown()
                .with_message(format!("Time zone identifier `{identifier}` does not exist.")));
        };

        let cache = self
            .cache
            .read()
            .map_err(|_| ResolutionError::data().with_message("Unable to acquire lock"))?;
        if let Some(tzif) = cache.get(canonical_name) {
            return Ok((canonical_name, tzif.clone()));
        }
        drop(cache);

        #[cfg(feature = "log")]
        log::trace!("parsing tzif data for {canonical_name}");

        let tzif = Arc::new(Tzif::from_bytes(data)?);
        let mut cache = self
            .cache
            .write()
            .map_err(|_| ResolutionError::data().with_message("Unable to acquire lock"))?;
        let tzif = cache.entry(canonical_name).or_insert(tzif).clone();
        Ok((canonical_name, tzif))
    }
}

impl TimeZoneResolver for TzdbResolver {
    fn resolve_named(
        &self,
        identifier: &str,
        local: IsoDateTime,
    ) -> Result<TimeZone, ResolutionError> {
        let (canonical_name, tzif) = self.get(identifier)?;
        let result = tzif.get_local(local.as_local_epoch_seconds())?;

        #[cfg(feature = "log")]
        if !matches!(result, LocalTimeRecordResult::Single(_)) {
            log::debug!(
                "{local:?} is a {} in {canonical_name}, resolving with {}",
                if matches!(result, LocalTimeRecordResult::Gap { .. }) { "gap" } else { "fold" },
                self.disambiguation
            );
        }

        let record = result.disambiguate(self.disambiguation)?;
        record_to_timezone(canonical_name, record)
    }

    fn resolve_named_candidates(
        &self,
        identifier: &str,
        local: IsoDateTime,
    ) -> Result<Vec<TimeZone>, ResolutionError> {
        let (canonical_name, tzif) = self.get(identifier)?;
        match tzif.get_local(local.as_local_epoch_seconds())? {
            LocalTimeRecordResult::Single(record) => {
                Ok(vec![record_to_timezone(canonical_name, record)?])
            }
            LocalTimeRecordResult::Gap { before, after }
            | LocalTimeRecordResult::Fold { before, after } => Ok(vec![
                record_to_timezone(canonical_name, before)?,
                record_to_timezone(canonical_name, after)?,
            ]),
        }
    }
}

fn record_to_timezone(
    canonical_name: &str,
    record: LocalTimeRecord,
) -> Result<TimeZone, ResolutionError> {
    let offset = i32::try_from(record.offset)
        .ok()
        .and_then(|seconds| UtcOffset::from_seconds(seconds).ok())
        .ok_or_else(|| {
            ResolutionError::data().with_message(format!(
                "Offset {} of {canonical_name} is out of range.",
                record.offset
            ))
        })?;

    Ok(TimeZone::new(
        TimeZoneIdentifier::IanaIdentifier(canonical_name.to_string()),
        offset,
    ))
}

// Compile time check that the resolver can be shared across threads.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TzdbResolver>();
};
