//! The `zoned_composite` crate converts between an in-memory date-time with
//! a time zone and the composite representation used to store it.
//!
//! ```rust
//! use zoned_composite::{cast, decode, encode, FixedOffsetResolver};
//!
//! let resolver = FixedOffsetResolver;
//!
//! // Text is cast into a `ZonedDateTime` that always carries a time zone.
//! let zdt = cast("2021-03-15T10:30:00Z", &resolver).unwrap();
//!
//! // The stored form is a naive timestamp and a time zone name.
//! let wire = encode(&zdt).unwrap();
//! assert_eq!(wire.timezone_name, "UTC");
//! assert_eq!(wire.timestamp.time.microsecond, 0);
//!
//! // Decoding resolves the name again at the stored local time.
//! assert_eq!(decode(&wire, &resolver).unwrap(), zdt);
//! ```
//!
//! The pipeline is made of three operations:
//!
//!   - `cast` validates caller input (date-time text or a `ZonedDateTime`).
//!   - `encode` turns a `ZonedDateTime` into a `WireComposite`.
//!   - `decode` turns a `WireComposite` back into a `ZonedDateTime`.
//!
//! Time zone names are resolved through a `TimeZoneResolver`. The
//! `FixedOffsetResolver` handles UTC and fixed offsets only, and the
//! `TzdbResolver` (feature `tzdb`, enabled by default) consults the IANA
//! time zone database, selecting the offset in effect at the local
//! date-time being resolved.
//!
//! Text is accepted in the ISO 8601 extended format as profiled by
//! [RFC 9557][rfc9557], e.g. `2021-07-01T12:00:00+02:00[Europe/Paris]`.
//!
//! [rfc9557]: https://datatracker.ietf.org/doc/html/rfc9557
#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    unused_crate_dependencies,
    clippy::module_name_repetitions,
    clippy::redundant_pub_crate,
    clippy::too_many_lines,
    clippy::missing_errors_doc,
    clippy::option_if_let_else,

    // It may be worth to look if we can fix the issues highlighted by these lints.
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
)]

extern crate alloc;
extern crate core;

#[cfg(feature = "std")]
extern crate std;

pub mod cast;
pub mod codec;
pub mod components;
pub mod error;
pub mod iso;
pub mod options;
pub mod parsers;
pub mod provider;
pub mod wire;

#[cfg(feature = "tzdb")]
pub mod tzdb;

#[doc(hidden)]
pub(crate) mod utils;

#[doc(inline)]
pub use cast::{cast, cast_with_options, CastInput};
#[doc(inline)]
pub use codec::CompositeCodec;
#[doc(inline)]
pub use components::{TimeZone, TimeZoneIdentifier, UtcOffset, ZonedDateTime};
#[doc(inline)]
pub use error::{
    CastError, DecodeError, EncodeError, ParseError, RangeError, ResolutionError,
    ResolutionErrorKind,
};
#[doc(inline)]
pub use iso::{IsoDate, IsoDateTime, IsoTime};
#[doc(inline)]
pub use options::{Disambiguation, OffsetDisambiguation};
#[doc(inline)]
pub use provider::{FixedOffsetResolver, TimeZoneResolver};
#[doc(inline)]
pub use wire::{decode, decode_fields, encode, WireComposite, WireTime, WireTimestamp, WireValue};

#[cfg(feature = "tzdb")]
#[doc(inline)]
pub use tzdb::TzdbResolver;
