//! The value types exchanged across the storage boundary.
//!
//! A `ZonedDateTime` is the in-memory value held by application code and
//! `TimeZone` is its time zone descriptor.

pub mod timezone;

mod zoneddatetime;

#[doc(inline)]
pub use timezone::{TimeZone, TimeZoneIdentifier, UtcOffset};
#[doc(inline)]
pub use zoneddatetime::ZonedDateTime;
