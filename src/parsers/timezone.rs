use alloc::borrow::ToOwned;
use core::{iter::Peekable, str::Chars};

use crate::{components::timezone::TimeZoneIdentifier, error::ResolutionError};

/// Parses a time zone name or UTC offset string into a `TimeZoneIdentifier`.
///
/// Accepted forms are `Z`, any casing of `UTC`, `±HH`, `±HHMM`, `±HH:MM`,
/// and IANA style names (`Area/Location`).
#[inline]
pub(crate) fn parse_identifier(source: &str) -> Result<TimeZoneIdentifier, ResolutionError> {
    if source.eq_ignore_ascii_case("Z") || source.eq_ignore_ascii_case("UTC") {
        return Ok(TimeZoneIdentifier::utc());
    }
    let mut cursor = source.chars().peekable();
    if cursor.peek().is_some_and(is_ascii_sign) {
        let offset_minutes = parse_offset(&mut cursor)?;
        return Ok(TimeZoneIdentifier::OffsetMinutes(offset_minutes));
    } else if parse_iana_component(&mut cursor) {
        return Ok(TimeZoneIdentifier::IanaIdentifier(source.to_owned()));
    }
    Err(ResolutionError::invalid().with_message("Invalid time zone identifier"))
}

#[inline]
pub(crate) fn parse_offset(chars: &mut Peekable<Chars<'_>>) -> Result<i16, ResolutionError> {
    let sign = chars.next().map_or(1, |c| if c == '+' { 1 } else { -1 });
    // First offset portion
    let hours = parse_digit_pair(chars)?;
    if hours > 23 {
        return Err(ResolutionError::invalid().with_message("Offset hour is out of range"));
    }

    let sep = chars.peek().is_some_and(|ch| *ch == ':');
    if sep {
        let _ = chars.next();
    }

    let digit_peek = chars.peek().map(|ch| ch.is_ascii_digit());

    let minutes = match digit_peek {
        Some(true) => parse_digit_pair(chars)?,
        Some(false) => return Err(non_ascii_digit()),
        None if sep => return Err(abrupt_end()),
        None => 0,
    };
    if minutes > 59 {
        return Err(ResolutionError::invalid().with_message("Offset minute is out of range"));
    }

    if chars.peek().is_some() {
        return Err(ResolutionError::invalid().with_message("Unexpected trailing characters in offset"));
    }

    Ok((hours * 60 + minutes) * sign)
}

fn parse_digit_pair(chars: &mut Peekable<Chars<'_>>) -> Result<i16, ResolutionError> {
    let tens = parse_digit(chars)?;
    let ones = parse_digit(chars)?;
    Ok(tens * 10 + ones)
}

fn parse_digit(chars: &mut Peekable<Chars<'_>>) -> Result<i16, ResolutionError> {
    let ch = chars.next().ok_or_else(abrupt_end)?;
    ch.to_digit(10)
        .map(|digit| digit as i16)
        .ok_or_else(non_ascii_digit)
}

fn parse_iana_component(chars: &mut Peekable<Chars<'_>>) -> bool {
    // Confirm leading Tz char
    if !chars.peek().is_some_and(is_tz_leading_char) {
        return false;
    }
    chars.next();

    // Move and check that chars are an expected tz char
    while chars.peek().is_some_and(is_tz_char) {
        chars.next();
    }

    // Check for sub component and parse
    if chars.peek().is_some_and(is_slash) {
        chars.next();
        return parse_iana_component(chars);
    }

    // Confirm full source text has been parsed.
    chars.peek().is_none()
}

fn abrupt_end() -> ResolutionError {
    ResolutionError::invalid().with_message("Abrupt end while parsing offset string")
}

fn non_ascii_digit() -> ResolutionError {
    ResolutionError::invalid().with_message("Non ascii digit found while parsing offset string")
}

fn is_ascii_sign(ch: &char) -> bool {
    *ch == '+' || *ch == '-'
}

fn is_slash(ch: &char) -> bool {
    *ch == '/'
}

fn is_tz_leading_char(ch: &char) -> bool {
    ch.is_ascii_alphabetic() || *ch == '.' || *ch == '_'
}

fn is_tz_char(ch: &char) -> bool {
    is_tz_leading_char(ch) || ch.is_ascii_digit() || *ch == '+' || *ch == '-'
}

#[cfg(test)]
mod tests {
    use super::parse_identifier;
    use crate::{components::timezone::TimeZoneIdentifier, error::ResolutionErrorKind};

    #[test]
    fn utc_spellings() {
        for source in ["UTC", "utc", "Utc", "Z", "z"] {
            assert_eq!(parse_identifier(source), Ok(TimeZoneIdentifier::utc()));
        }
    }

    #[test]
    fn offsets() {
        assert_eq!(
            parse_identifier("+05:30"),
            Ok(TimeZoneIdentifier::OffsetMinutes(330))
        );
        assert_eq!(
            parse_identifier("-0800"),
            Ok(TimeZoneIdentifier::OffsetMinutes(-480))
        );
        assert_eq!(
            parse_identifier("+01"),
            Ok(TimeZoneIdentifier::OffsetMinutes(60))
        );
        for invalid in ["+24:00", "+05:60", "+05:", "+5", "+05:30:00", "-0a:00"] {
            let err = parse_identifier(invalid).unwrap_err();
            assert_eq!(err.kind(), ResolutionErrorKind::InvalidIdentifier, "{invalid}");
        }
    }

    #[test]
    fn iana_names() {
        assert_eq!(
            parse_identifier("America/Argentina/Buenos_Aires"),
            Ok(TimeZoneIdentifier::IanaIdentifier(
                "America/Argentina/Buenos_Aires".into()
            ))
        );
        assert_eq!(
            parse_identifier("Etc/GMT+5"),
            Ok(TimeZoneIdentifier::IanaIdentifier("Etc/GMT+5".into()))
        );
        assert!(parse_identifier("").is_err());
        assert!(parse_identifier("Europe/").is_err());
        assert!(parse_identifier("Europe Paris").is_err());
        assert!(parse_identifier("/Paris").is_err());
    }
}
