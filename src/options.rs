//! Configuration options for resolving time zones and casting strings.

use core::{fmt, str::FromStr};

use crate::error::ParseError;

/// Selects the offset for a local date-time that is ambiguous or does not
/// exist in a time zone.
///
/// A local date-time is ambiguous when clocks are turned back (a fold) and
/// does not exist when clocks are turned forward (a gap). The wall-clock
/// fields are never altered; only the offset stored alongside them is
/// chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Disambiguation {
    /// Earlier in a fold, later in a gap. This is the offset in effect
    /// before the transition in both cases.
    #[default]
    Compatible,
    /// The offset producing the earlier instant.
    Earlier,
    /// The offset producing the later instant.
    Later,
    /// Fail resolution for folds and gaps.
    Reject,
}

/// Decides between a numeric UTC offset and a time zone annotation written
/// in the same date-time string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffsetDisambiguation {
    /// Keep the numeric offset as a fixed offset time zone and drop the
    /// annotation.
    Use,
    /// Keep the annotation and drop the numeric offset.
    Ignore,
    /// Require the numeric offset to equal the annotation's offset at that
    /// local date-time.
    #[default]
    Reject,
}

impl fmt::Display for Disambiguation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compatible => "compatible",
            Self::Earlier => "earlier",
            Self::Later => "later",
            Self::Reject => "reject",
        }
        .fmt(f)
    }
}

impl FromStr for Disambiguation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compatible" => Ok(Self::Compatible),
            "earlier" => Ok(Self::Earlier),
            "later" => Ok(Self::Later),
            "reject" => Ok(Self::Reject),
            _ => Err(ParseError::new("Invalid disambiguation value")),
        }
    }
}

impl fmt::Display for OffsetDisambiguation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Use => "use",
            Self::Ignore => "ignore",
            Self::Reject => "reject",
        }
        .fmt(f)
    }
}

impl FromStr for OffsetDisambiguation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "use" => Ok(Self::Use),
            "ignore" => Ok(Self::Ignore),
            "reject" => Ok(Self::Reject),
            _ => Err(ParseError::new("Invalid offset option value")),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use core::str::FromStr;

    use super::{Disambiguation, OffsetDisambiguation};

    #[test]
    fn round_trip_names() {
        for value in [
            Disambiguation::Compatible,
            Disambiguation::Earlier,
            Disambiguation::Later,
            Disambiguation::Reject,
        ] {
            assert_eq!(Disambiguation::from_str(&value.to_string()), Ok(value));
        }
        assert_eq!(
            OffsetDisambiguation::from_str("ignore"),
            Ok(OffsetDisambiguation::Ignore)
        );
        assert!(OffsetDisambiguation::from_str("prefer").is_err());
        assert_eq!(Disambiguation::default(), Disambiguation::Compatible);
        assert_eq!(OffsetDisambiguation::default(), OffsetDisambiguation::Reject);
    }
}
