use std::collections::BTreeMap;

use crate::{strptime, FieldValue, HashConverter, RationalFieldConverter};

fn integer(map: &BTreeMap<String, FieldValue>, key: &str) -> Option<i64> {
    match map.get(key) {
        Some(&FieldValue::Integer(value)) => Some(value),
        _ => None,
    }
}

#[test]
fn test_map_calendar_fields() {
    let parsed = strptime("%Y-%m-%dT%H:%M:%S %Z", "2017-12-31T12:34:56 JST rest").unwrap();
    let map = parsed.to_hash();

    assert_eq!(integer(&map, "year"), Some(2017));
    assert_eq!(integer(&map, "mon"), Some(12));
    assert_eq!(integer(&map, "mday"), Some(31));
    assert_eq!(integer(&map, "hour"), Some(12));
    assert_eq!(integer(&map, "min"), Some(34));
    assert_eq!(integer(&map, "sec"), Some(56));
    assert_eq!(map.get("zone"), Some(&FieldValue::Text("JST".to_owned())));
    // JST is only in the parsing table, resolved to +09:00 here.
    assert_eq!(integer(&map, "offset"), Some(9 * 3600));
    assert_eq!(
        map.get("leftover"),
        Some(&FieldValue::Text(" rest".to_owned()))
    );

    // Absent fields produce no entries.
    assert!(!map.contains_key("yday"));
    assert!(!map.contains_key("sec_fraction"));
    assert!(!map.contains_key("seconds"));
}

#[test]
fn test_map_week_fields() {
    let parsed = strptime("%G W%V %u %U %W %w %j", "2026 W01 4 00 01 4 128").unwrap();
    let map = parsed.to_hash();

    assert_eq!(integer(&map, "cwyear"), Some(2026));
    assert_eq!(integer(&map, "cweek"), Some(1));
    assert_eq!(integer(&map, "cwday"), Some(4));
    assert_eq!(integer(&map, "wnum0"), Some(0));
    assert_eq!(integer(&map, "wnum1"), Some(1));
    assert_eq!(integer(&map, "wday"), Some(4));
    assert_eq!(integer(&map, "yday"), Some(128));
}

#[test]
fn test_map_reconstructs_raw_hour_and_second() {
    let map = strptime("%H:%M:%S", "24:00:00").unwrap().to_hash();
    assert_eq!(integer(&map, "hour"), Some(24));

    let map = strptime("%H:%M:%S", "23:59:60").unwrap().to_hash();
    assert_eq!(integer(&map, "sec"), Some(60));
}

#[test]
fn test_map_epoch_entries() {
    let map = strptime("%s", "86400").unwrap().to_hash();
    assert_eq!(integer(&map, "seconds"), Some(86_400));

    // %Q reports a fractional epoch second through the converter.
    let map = strptime("%Q", "1500000000456").unwrap().to_hash();
    assert_eq!(
        map.get("seconds"),
        Some(&FieldValue::Decimal("1500000000.456".to_owned()))
    );
}

#[test]
fn test_map_second_fraction() {
    let map = strptime("%S.%N", "56.123456789").unwrap().to_hash();
    assert_eq!(
        map.get("sec_fraction"),
        Some(&FieldValue::Decimal("0.123456789".to_owned()))
    );

    let map = strptime("%S.%L", "56.5").unwrap().to_hash();
    assert_eq!(
        map.get("sec_fraction"),
        Some(&FieldValue::Decimal("0.500000000".to_owned()))
    );
}

#[test]
fn test_map_with_rational_converter() {
    let parsed = strptime("%Q %S.%N", "1500 56.5").unwrap();
    let map = parsed.to_map(&RationalFieldConverter);

    assert_eq!(map.get("seconds"), Some(&FieldValue::Rational(3, 2)));
    assert_eq!(map.get("sec_fraction"), Some(&FieldValue::Rational(1, 2)));
}

#[test]
fn test_map_offset_for_numeric_zones() {
    let map = strptime("%z", "+0930").unwrap().to_hash();
    assert_eq!(integer(&map, "offset"), Some(9 * 3600 + 1800));

    let map = strptime("%Z", "Pacific Daylight Time").unwrap().to_hash();
    assert_eq!(integer(&map, "offset"), Some(-7 * 3600));
}

#[test]
fn test_map_with_custom_converter() {
    struct Stringify;

    impl HashConverter for Stringify {
        type Key = &'static str;
        type Value = String;

        fn key(&self, name: &'static str) -> &'static str {
            name
        }
        fn integer(&self, value: i64) -> String {
            value.to_string()
        }
        fn text(&self, value: &str) -> String {
            value.to_owned()
        }
        fn second_fraction(&self, second: i64, nano: i64) -> String {
            format!("{second}+{nano}ns")
        }
        fn epoch_millis(&self, millis: i64) -> String {
            format!("{millis}ms")
        }
    }

    let parsed = strptime("%Q %S.%N", "1500 56.5").unwrap();
    let map = parsed.to_map(&Stringify);

    assert_eq!(map.get("seconds").map(String::as_str), Some("1500ms"));
    assert_eq!(map.get("sec").map(String::as_str), Some("56"));
    assert_eq!(
        map.get("sec_fraction").map(String::as_str),
        Some("0+500000000ns")
    );
}
