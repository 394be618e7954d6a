use alloc::{string::String, vec};

use super::{decode, decode_fields, encode, WireComposite, WireTime, WireTimestamp, WireValue};
use crate::{
    components::{
        timezone::{TimeZone, TimeZoneIdentifier, UtcOffset},
        ZonedDateTime,
    },
    error::{DecodeError, EncodeError, ResolutionError, ResolutionErrorKind},
    iso::{IsoDate, IsoDateTime, IsoTime},
    provider::{FixedOffsetResolver, TimeZoneResolver},
};

/// Knows `America/New_York` with a northern hemisphere summer.
struct NewYorkFixture;

impl TimeZoneResolver for NewYorkFixture {
    fn resolve_named(
        &self,
        identifier: &str,
        local: IsoDateTime,
    ) -> Result<TimeZone, ResolutionError> {
        if !identifier.eq_ignore_ascii_case("America/New_York") {
            return Err(ResolutionError::unknown());
        }
        let minutes = if (4..=10).contains(&local.date.month) {
            -240
        } else {
            -300
        };
        Ok(TimeZone::new(
            TimeZoneIdentifier::IanaIdentifier("America/New_York".into()),
            UtcOffset::from_minutes(minutes).unwrap(),
        ))
    }
}

fn timestamp(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: u8, micro: u32) -> WireTimestamp {
    WireTimestamp::new(
        IsoDate::try_new(year, month, day).unwrap(),
        WireTime::try_new(hour, minute, second, micro).unwrap(),
    )
}

#[test]
fn encode_utc() {
    let zdt = ZonedDateTime::try_new(2021, 3, 15, 10, 30, 0, 0, Some(TimeZone::utc())).unwrap();
    let wire = encode(&zdt).unwrap();
    assert_eq!(wire.timestamp, timestamp(2021, 3, 15, 10, 30, 0, 0));
    assert_eq!(wire.timezone_name, "UTC");
}

#[test]
fn encode_naive_is_utc() {
    let zdt = ZonedDateTime::try_new(1999, 12, 31, 23, 59, 59, 999, None).unwrap();
    let wire = encode(&zdt).unwrap();
    assert_eq!(wire.timezone_name, "UTC");
    assert_eq!(wire.timestamp.time.microsecond, 999_000);
}

#[test]
fn encode_microseconds_exactly() {
    for millisecond in 0..=999u16 {
        let zdt =
            ZonedDateTime::try_new(2000, 1, 1, 0, 0, 0, millisecond, Some(TimeZone::utc())).unwrap();
        let wire = encode(&zdt).unwrap();
        assert_eq!(wire.timestamp.time.microsecond, u32::from(millisecond) * 1000);
    }
}

#[test]
fn encode_names() {
    let fixed = ZonedDateTime::try_new(
        2021,
        3,
        15,
        10,
        30,
        0,
        0,
        Some(TimeZone::from_offset_minutes(-330).unwrap()),
    )
    .unwrap();
    assert_eq!(encode(&fixed).unwrap().timezone_name, "-05:30");

    let new_york = NewYorkFixture
        .resolve("America/New_York", IsoDateTime::default())
        .unwrap();
    let named = ZonedDateTime::try_new(2021, 1, 1, 0, 0, 0, 0, Some(new_york)).unwrap();
    assert_eq!(encode(&named).unwrap().timezone_name, "America/New_York");
}

#[test]
fn encode_rejects_invalid_components() {
    let bad_time = ZonedDateTime::new(
        IsoDateTime {
            date: IsoDate::default(),
            time: IsoTime {
                hour: 25,
                minute: 0,
                second: 0,
                millisecond: 0,
            },
        },
        None,
    );
    assert!(matches!(encode(&bad_time), Err(EncodeError::InvalidValue(_))));

    let bad_zone = ZonedDateTime::new(
        IsoDateTime::default(),
        Some(TimeZone::new(
            TimeZoneIdentifier::OffsetMinutes(60),
            UtcOffset::UTC,
        )),
    );
    assert!(matches!(encode(&bad_zone), Err(EncodeError::InvalidValue(_))));
}

#[test]
fn decode_truncates_microseconds() {
    let wire = WireComposite::new(timestamp(2021, 3, 15, 10, 30, 0, 123_456), "UTC");
    let zdt = decode(&wire, &FixedOffsetResolver).unwrap();
    assert_eq!(zdt.millisecond(), 123);

    let wire = WireComposite::new(timestamp(2021, 3, 15, 10, 30, 0, 999_999), "UTC");
    assert_eq!(decode(&wire, &FixedOffsetResolver).unwrap().millisecond(), 999);
}

#[test]
fn decode_resolves_at_local_time() {
    let winter = WireComposite::new(timestamp(2021, 1, 15, 12, 0, 0, 0), "america/new_york");
    let zdt = decode(&winter, &NewYorkFixture).unwrap();
    assert_eq!(zdt.offset(), Some(UtcOffset::from_minutes(-300).unwrap()));
    assert_eq!(zdt.timezone().unwrap().wire_name(), "America/New_York");
    assert_eq!(zdt.hour(), 12);

    let summer = WireComposite::new(timestamp(2021, 7, 15, 12, 0, 0, 0), "America/New_York");
    let zdt = decode(&summer, &NewYorkFixture).unwrap();
    assert_eq!(zdt.offset(), Some(UtcOffset::from_minutes(-240).unwrap()));
}

#[test]
fn decode_fixed_offsets() {
    let wire = WireComposite::new(timestamp(2021, 3, 15, 10, 30, 0, 0), "+05:45");
    let zdt = decode(&wire, &FixedOffsetResolver).unwrap();
    assert_eq!(
        zdt.timezone(),
        Some(&TimeZone::from_offset_minutes(345).unwrap())
    );
}

#[test]
fn decode_unknown_timezone() {
    let wire = WireComposite::new(timestamp(2021, 3, 15, 10, 30, 0, 0), "Mars/Olympus_Mons");
    let err = decode(&wire, &NewYorkFixture).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::UnknownTimezone(e) if e.kind() == ResolutionErrorKind::UnknownIdentifier
    ));

    let wire = WireComposite::new(timestamp(2021, 3, 15, 10, 30, 0, 0), "not a zone");
    assert!(matches!(
        decode(&wire, &NewYorkFixture),
        Err(DecodeError::UnknownTimezone(_))
    ));
}

#[test]
fn decode_out_of_range_fields() {
    let mut wire = WireComposite::new(timestamp(2021, 3, 15, 10, 30, 0, 0), "UTC");
    wire.timestamp.date.month = 13;
    assert!(matches!(
        decode(&wire, &FixedOffsetResolver),
        Err(DecodeError::MalformedComposite(_))
    ));

    let mut wire = WireComposite::new(timestamp(2021, 3, 15, 10, 30, 0, 0), "UTC");
    wire.timestamp.time.microsecond = 1_000_000;
    assert!(matches!(
        decode(&wire, &FixedOffsetResolver),
        Err(DecodeError::MalformedComposite(_))
    ));

    let wire = WireComposite::new(timestamp(2021, 3, 15, 10, 30, 0, 0), "");
    assert!(matches!(
        decode(&wire, &FixedOffsetResolver),
        Err(DecodeError::MalformedComposite(_))
    ));
}

#[test]
fn decode_fields_shape() {
    let ts = timestamp(2021, 3, 15, 10, 30, 0, 0);

    let zdt = decode_fields(
        &[WireValue::Timestamp(ts), WireValue::Text(String::from("UTC"))],
        &FixedOffsetResolver,
    )
    .unwrap();
    assert_eq!(zdt.timezone(), Some(&TimeZone::utc()));

    let malformed = [
        vec![WireValue::Timestamp(ts)],
        vec![],
        vec![WireValue::Timestamp(ts), WireValue::Null],
        vec![WireValue::Timestamp(ts), WireValue::Integer(0)],
        vec![WireValue::Date(ts.date), WireValue::Text(String::from("UTC"))],
        vec![WireValue::Text(String::from("UTC")), WireValue::Timestamp(ts)],
        vec![
            WireValue::Timestamp(ts),
            WireValue::Text(String::from("UTC")),
            WireValue::Null,
        ],
    ];
    for fields in malformed {
        assert!(
            matches!(
                decode_fields(&fields, &FixedOffsetResolver),
                Err(DecodeError::MalformedComposite(_))
            ),
            "{fields:?}"
        );
    }
}

#[test]
fn fields_round_trip() {
    let wire = WireComposite::new(timestamp(2021, 3, 15, 10, 30, 0, 5000), "+01:00");
    let fields = wire.clone().into_fields();
    assert_eq!(WireComposite::try_from(fields.as_slice()), Ok(wire));
}

#[test]
fn decode_encode_round_trip() {
    let values = [
        ZonedDateTime::try_new(2021, 3, 15, 10, 30, 0, 0, Some(TimeZone::utc())).unwrap(),
        ZonedDateTime::try_new(
            -44,
            3,
            15,
            0,
            0,
            0,
            1,
            Some(TimeZone::from_offset_minutes(-720).unwrap()),
        )
        .unwrap(),
        ZonedDateTime::try_new(
            2021,
            7,
            4,
            23,
            59,
            59,
            999,
            Some(
                NewYorkFixture
                    .resolve(
                        "America/New_York",
                        IsoDateTime::new(
                            IsoDate::try_new(2021, 7, 4).unwrap(),
                            IsoTime::try_new(23, 59, 59, 999).unwrap(),
                        )
                        .unwrap(),
                    )
                    .unwrap(),
            ),
        )
        .unwrap(),
    ];
    for value in values {
        let wire = encode(&value).unwrap();
        assert_eq!(decode(&wire, &NewYorkFixture).unwrap(), value);
    }
}
