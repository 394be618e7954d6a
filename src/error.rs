//! Error types returned by the cast, decode and encode operations.
//!
//! Each pipeline stage has its own error enum so that callers can match on
//! the failure of the stage they invoked. The supporting errors
//! (`ParseError`, `ResolutionError`, `RangeError`) describe failures of the
//! parsing and time zone collaborators and of component validation.

use alloc::borrow::Cow;
use core::fmt;

// ==== Supporting errors ====

/// A date or time component was outside of its valid range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeError {
    msg: Cow<'static, str>,
}

impl RangeError {
    pub(crate) fn new(msg: impl Into<Cow<'static, str>>) -> Self {
        Self { msg: msg.into() }
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.msg
    }
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RangeError: {}", self.msg)
    }
}

impl core::error::Error for RangeError {}

/// The textual input did not match the accepted date-time profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    msg: Cow<'static, str>,
}

impl ParseError {
    pub(crate) fn new(msg: impl Into<Cow<'static, str>>) -> Self {
        Self { msg: msg.into() }
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.msg
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParseError: {}", self.msg)
    }
}

impl core::error::Error for ParseError {}

/// The kind of a `ResolutionError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionErrorKind {
    /// The identifier is syntactically valid but unknown to the resolver.
    UnknownIdentifier,
    /// The identifier is neither a time zone name nor a UTC offset.
    InvalidIdentifier,
    /// The local time falls into a gap or fold and the resolver was
    /// configured to reject it.
    Disambiguation,
    /// The time zone data backing the resolver could not be read.
    Data,
}

impl ResolutionErrorKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::UnknownIdentifier => "UnknownIdentifier",
            Self::InvalidIdentifier => "InvalidIdentifier",
            Self::Disambiguation => "Disambiguation",
            Self::Data => "Data",
        }
    }
}

/// A time zone name or offset could not be resolved to a `TimeZone`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionError {
    kind: ResolutionErrorKind,
    msg: Cow<'static, str>,
}

impl ResolutionError {
    #[inline]
    #[must_use]
    const fn new(kind: ResolutionErrorKind) -> Self {
        Self {
            kind,
            msg: Cow::Borrowed(""),
        }
    }

    /// Create an unknown identifier error.
    #[inline]
    #[must_use]
    pub const fn unknown() -> Self {
        Self::new(ResolutionErrorKind::UnknownIdentifier)
    }

    /// Create an invalid identifier error.
    #[inline]
    #[must_use]
    pub const fn invalid() -> Self {
        Self::new(ResolutionErrorKind::InvalidIdentifier)
    }

    /// Create a disambiguation error.
    #[inline]
    #[must_use]
    pub const fn disambiguation() -> Self {
        Self::new(ResolutionErrorKind::Disambiguation)
    }

    /// Create a time zone data error.
    #[inline]
    #[must_use]
    pub const fn data() -> Self {
        Self::new(ResolutionErrorKind::Data)
    }

    /// Add a message to the error.
    #[inline]
    #[must_use]
    pub fn with_message(mut self, msg: impl Into<Cow<'static, str>>) -> Self {
        self.msg = msg.into();
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ResolutionErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.as_str())?;
        if !self.msg.is_empty() {
            write!(f, ": {}", self.msg)?;
        }
        Ok(())
    }
}

impl core::error::Error for ResolutionError {}

// ==== Pipeline errors ====

/// Failure of the cast operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastError {
    /// Textual input does not match the accepted date-time profile.
    InvalidFormat(ParseError),
    /// The input is of a shape the caster does not accept.
    Unsupported {
        /// The kind of input that was supplied.
        kind: &'static str,
    },
    /// The time zone named in the textual input could not be resolved.
    UnknownTimezone(ResolutionError),
}

impl fmt::Display for CastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(e) => write!(f, "invalid date-time format: {e}"),
            Self::Unsupported { kind } => write!(f, "unsupported input of kind `{kind}`"),
            Self::UnknownTimezone(e) => write!(f, "unknown time zone: {e}"),
        }
    }
}

impl core::error::Error for CastError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::InvalidFormat(e) => Some(e),
            Self::UnknownTimezone(e) => Some(e),
            Self::Unsupported { .. } => None,
        }
    }
}

impl From<ParseError> for CastError {
    fn from(value: ParseError) -> Self {
        Self::InvalidFormat(value)
    }
}

/// Failure of the decode operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The storage tuple does not have the expected shape.
    MalformedComposite(Cow<'static, str>),
    /// The stored time zone name could not be resolved.
    UnknownTimezone(ResolutionError),
}

impl DecodeError {
    pub(crate) fn malformed(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::MalformedComposite(msg.into())
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedComposite(msg) => write!(f, "malformed composite: {msg}"),
            Self::UnknownTimezone(e) => write!(f, "unknown time zone: {e}"),
        }
    }
}

impl core::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::UnknownTimezone(e) => Some(e),
            Self::MalformedComposite(_) => None,
        }
    }
}

impl From<ResolutionError> for DecodeError {
    fn from(value: ResolutionError) -> Self {
        Self::UnknownTimezone(value)
    }
}

/// Failure of the encode operation.
///
/// Encoding a value produced by `cast` or `decode` never fails; this error
/// reports a value assembled with out of range components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The value violates an invariant of `ZonedDateTime`.
    InvalidValue(Cow<'static, str>),
}

impl EncodeError {
    pub(crate) fn invalid(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidValue(msg.into())
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(msg) => write!(f, "invalid value: {msg}"),
        }
    }
}

impl core::error::Error for EncodeError {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{CastError, ParseError, ResolutionError, ResolutionErrorKind};

    #[test]
    fn resolution_error_display() {
        let err = ResolutionError::unknown().with_message("Mars/Olympus_Mons");
        assert_eq!(err.kind(), ResolutionErrorKind::UnknownIdentifier);
        assert_eq!(err.to_string(), "UnknownIdentifier: Mars/Olympus_Mons");
        assert_eq!(ResolutionError::data().to_string(), "Data");
    }

    #[test]
    fn cast_error_source() {
        use core::error::Error;

        let err = CastError::from(ParseError::new("Invalid hour format"));
        assert!(err.source().is_some());
        assert_eq!(
            err.to_string(),
            "invalid date-time format: ParseError: Invalid hour format"
        );
        assert!(CastError::Unsupported { kind: "integer" }.source().is_none());
    }
}
