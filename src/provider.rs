//! The `TimeZoneResolver` trait.

use alloc::{borrow::ToOwned, format, vec, vec::Vec};

use crate::{
    components::timezone::{TimeZone, TimeZoneIdentifier},
    error::ResolutionError,
    iso::IsoDateTime,
};

/// The `TimeZoneResolver` trait turns a time zone name or UTC offset into a
/// `TimeZone` valid at a given local date-time.
///
/// Implementors provide `resolve_named`, the lookup of an IANA style name
/// in some time zone database. UTC and fixed offsets are handled by the
/// provided methods without consulting the database.
pub trait TimeZoneResolver {
    /// Resolves a named time zone at a local date-time.
    ///
    /// The returned `TimeZone` should carry the database's canonical
    /// spelling of the identifier.
    fn resolve_named(&self, identifier: &str, local: IsoDateTime)
        -> Result<TimeZone, ResolutionError>;

    /// Returns every `TimeZone` a named time zone may take at a local
    /// date-time.
    ///
    /// A local date-time repeated by a transition has two valid offsets, and
    /// one skipped by a transition may be assigned the offset from either
    /// side of it. The default returns the single `resolve_named` result.
    fn resolve_named_candidates(
        &self,
        identifier: &str,
        local: IsoDateTime,
    ) -> Result<Vec<TimeZone>, ResolutionError> {
        self.resolve_named(identifier, local).map(|tz| vec![tz])
    }

    /// Resolves a time zone name or UTC offset string at a local date-time.
    fn resolve(&self, name_or_offset: &str, at: IsoDateTime) -> Result<TimeZone, ResolutionError> {
        let identifier = TimeZoneIdentifier::try_from_str(name_or_offset)?;
        self.resolve_identifier(&identifier, at)
    }

    /// Resolves a parsed `TimeZoneIdentifier` at a local date-time.
    fn resolve_identifier(
        &self,
        identifier: &TimeZoneIdentifier,
        at: IsoDateTime,
    ) -> Result<TimeZone, ResolutionError> {
        match identifier {
            _ if identifier.is_utc() => Ok(TimeZone::utc()),
            TimeZoneIdentifier::OffsetMinutes(minutes) => TimeZone::from_offset_minutes(*minutes)
                .map_err(|e| ResolutionError::invalid().with_message(e.message().to_owned())),
            TimeZoneIdentifier::IanaIdentifier(name) => self.resolve_named(name, at),
        }
    }

    /// Returns every `TimeZone` a parsed `TimeZoneIdentifier` may take at a
    /// local date-time. UTC and fixed offsets have exactly one.
    fn resolve_candidates(
        &self,
        identifier: &TimeZoneIdentifier,
        at: IsoDateTime,
    ) -> Result<Vec<TimeZone>, ResolutionError> {
        match identifier {
            TimeZoneIdentifier::IanaIdentifier(name) if !identifier.is_utc() => {
                self.resolve_named_candidates(name, at)
            }
            _ => self.resolve_identifier(identifier, at).map(|tz| vec![tz]),
        }
    }
}

impl<T: TimeZoneResolver + ?Sized> TimeZoneResolver for &T {
    fn resolve_named(
        &self,
        identifier: &str,
        local: IsoDateTime,
    ) -> Result<TimeZone, ResolutionError> {
        (**self).resolve_named(identifier, local)
    }

    fn resolve(&self, name_or_offset: &str, at: IsoDateTime) -> Result<TimeZone, ResolutionError> {
        (**self).resolve(name_or_offset, at)
    }

    fn resolve_identifier(
        &self,
        identifier: &TimeZoneIdentifier,
        at: IsoDateTime,
    ) -> Result<TimeZone, ResolutionError> {
        (**self).resolve_identifier(identifier, at)
    }

    fn resolve_named_candidates(
        &self,
        identifier: &str,
        local: IsoDateTime,
    ) -> Result<Vec<TimeZone>, ResolutionError> {
        (**self).resolve_named_candidates(identifier, local)
    }

    fn resolve_candidates(
        &self,
        identifier: &TimeZoneIdentifier,
        at: IsoDateTime,
    ) -> Result<Vec<TimeZone>, ResolutionError> {
        (**self).resolve_candidates(identifier, at)
    }
}

/// A resolver without a time zone database.
///
/// Resolves UTC and fixed offsets only; every named time zone is unknown.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedOffsetResolver;

impl TimeZoneResolver for FixedOffsetResolver {
    fn resolve_named(&self, identifier: &str, _: IsoDateTime) -> Result<TimeZone, ResolutionError> {
        Err(ResolutionError::unknown().with_message(format!(
            "Time zone `{identifier}` requires a time zone database"
        )))
    }
}
