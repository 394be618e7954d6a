//! A storage-facing bundle of the cast, decode and encode operations.

use crate::{
    cast::{cast_with_options, CastInput},
    components::ZonedDateTime,
    error::{CastError, DecodeError, EncodeError},
    options::OffsetDisambiguation,
    provider::TimeZoneResolver,
    wire::{self, WireComposite, WireValue},
};

/// `CompositeCodec` holds a `TimeZoneResolver` and the cast options for a
/// column of composite date-times.
///
/// ```rust
/// use zoned_composite::{CompositeCodec, FixedOffsetResolver};
///
/// let codec = CompositeCodec::new(FixedOffsetResolver);
/// let zdt = codec.cast("2021-03-15T10:30:00+01:00").unwrap();
/// let wire = codec.encode(&zdt).unwrap();
/// assert_eq!(wire.timezone_name, "+01:00");
/// assert_eq!(codec.decode(&wire).unwrap(), zdt);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CompositeCodec<R> {
    resolver: R,
    offset_disambiguation: OffsetDisambiguation,
}

impl<R: TimeZoneResolver> CompositeCodec<R> {
    /// Creates a new codec that resolves time zones with `resolver`.
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            offset_disambiguation: OffsetDisambiguation::default(),
        }
    }

    /// Sets how an offset conflicting with a time zone annotation is
    /// handled when casting text.
    #[must_use]
    pub fn with_offset_disambiguation(mut self, offset_disambiguation: OffsetDisambiguation) -> Self {
        self.offset_disambiguation = offset_disambiguation;
        self
    }

    /// Returns the resolver.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Returns the offset disambiguation option used by `cast`.
    pub fn offset_disambiguation(&self) -> OffsetDisambiguation {
        self.offset_disambiguation
    }

    /// Casts the input into a `ZonedDateTime`.
    pub fn cast<'a>(&self, input: impl Into<CastInput<'a>>) -> Result<ZonedDateTime, CastError> {
        cast_with_options(input, self.offset_disambiguation, &self.resolver)
    }

    /// Decodes a composite into a `ZonedDateTime`.
    pub fn decode(&self, wire: &WireComposite) -> Result<ZonedDateTime, DecodeError> {
        wire::decode(wire, &self.resolver)
    }

    /// Decodes the positional fields of a stored row into a `ZonedDateTime`.
    pub fn decode_fields(&self, fields: &[WireValue]) -> Result<ZonedDateTime, DecodeError> {
        wire::decode_fields(fields, &self.resolver)
    }

    /// Encodes a `ZonedDateTime` into its composite.
    pub fn encode(&self, value: &ZonedDateTime) -> Result<WireComposite, EncodeError> {
        wire::encode(value)
    }
}

#[cfg(test)]
mod tests {
    use super::CompositeCodec;
    use crate::{
        error::CastError,
        options::OffsetDisambiguation,
        provider::FixedOffsetResolver,
    };

    #[test]
    fn options_are_applied() {
        let codec = CompositeCodec::new(FixedOffsetResolver);
        assert_eq!(codec.offset_disambiguation(), OffsetDisambiguation::Reject);
        assert!(matches!(
            codec.cast("2021-03-15T10:30:00+01:00[+02:00]"),
            Err(CastError::InvalidFormat(_))
        ));

        let codec = codec.with_offset_disambiguation(OffsetDisambiguation::Ignore);
        let zdt = codec.cast("2021-03-15T10:30:00+01:00[+02:00]").unwrap();
        assert_eq!(codec.encode(&zdt).unwrap().timezone_name, "+02:00");
    }

    #[test]
    fn fields_through_codec() {
        let codec = CompositeCodec::<FixedOffsetResolver>::default();
        let zdt = codec.cast("2021-03-15T10:30:00.5Z").unwrap();
        let fields = codec.encode(&zdt).unwrap().into_fields();
        assert_eq!(codec.decode_fields(&fields).unwrap(), zdt);
    }
}
