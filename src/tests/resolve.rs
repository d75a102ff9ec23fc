use crate::string::strftime;
use crate::{strptime, ResolveError, Resolver, Time};

#[test]
fn test_resolve_named_zone() {
    let parsed = strptime("%Y-%m-%d %H:%M:%S %Z", "2017-12-31 12:34:56 PST").unwrap();
    assert_eq!(parsed.time_zone_name(), Some("PST"));

    let resolved = Resolver::utc().resolve(&parsed).unwrap();
    // 2017-12-31T12:34:56-08:00 is 2017-12-31T20:34:56Z.
    assert_eq!(resolved.epoch_second(), 1_514_752_496);
    assert_eq!(resolved.offset_second(), -28_800);
    assert_eq!(strftime(&resolved, "%F %T %z").unwrap(), "2017-12-31 12:34:56 -0800");
}

#[test]
fn test_resolve_millis_with_fraction() {
    let parsed = strptime("%Q.%N", "1500000000456.111111111").unwrap();
    assert_eq!(parsed.instant_millis(), Some(1_500_000_000_456));
    assert_eq!(parsed.nano_of_second(), Some(111_111_111));

    // 456 ms plus the parsed fraction: 0.567111111 seconds.
    let resolved = Resolver::utc().resolve(&parsed).unwrap();
    assert_eq!(resolved.epoch_second(), 1_500_000_000);
    assert_eq!(resolved.nano_of_second(), 567_111_111);
}

#[test]
fn test_resolve_millis_dominate_seconds() {
    let parsed = strptime("%s %Q", "123456789 12849124").unwrap();
    let resolved = Resolver::utc().resolve(&parsed).unwrap();
    assert_eq!(resolved.epoch_second(), 12_849);
    assert_eq!(resolved.nano_of_second(), 124_000_000);

    // A later %s clears the milliseconds.
    let parsed = strptime("%Q %s", "12849124 123456789").unwrap();
    let resolved = Resolver::utc().resolve(&parsed).unwrap();
    assert_eq!(resolved.epoch_second(), 123_456_789);
    assert_eq!(resolved.nano_of_second(), 0);
}

#[test]
fn test_resolve_instant_ignores_calendar_fields() {
    let parsed = strptime("%Y-%m-%d %s", "1999-12-31 86400").unwrap();
    let resolved = Resolver::utc().resolve(&parsed).unwrap();
    assert_eq!(resolved.epoch_second(), 86_400);
    // Field reads follow the instant on this path.
    assert_eq!(resolved.year(), 1970);
    assert_eq!(resolved.day(), 2);
}

#[test]
fn test_resolve_negative_instants() {
    // Time.at semantics: the fraction shares the sign of the integer part.
    let parsed = strptime("%s.%N", "-10.5").unwrap();
    let resolved = Resolver::utc().resolve(&parsed).unwrap();
    assert_eq!(resolved.epoch_second(), -11);
    assert_eq!(resolved.nano_of_second(), 500_000_000);

    let parsed = strptime("%Q", "-1500").unwrap();
    let resolved = Resolver::utc().resolve(&parsed).unwrap();
    assert_eq!(resolved.epoch_second(), -2);
    assert_eq!(resolved.nano_of_second(), 500_000_000);
}

#[test]
fn test_resolve_leap_second_rolls_forward() {
    let parsed = strptime("%Y-%m-%dT%H:%M:%S", "2001-02-03T23:59:60").unwrap();
    assert!(parsed.parsed_leap_second());

    let resolved = Resolver::utc().resolve(&parsed).unwrap();
    // 2001-02-04T00:00:00Z.
    assert_eq!(resolved.epoch_second(), 981_244_800);

    // The raw parsed fields stay visible on the accessor.
    assert_eq!(resolved.second(), 59);
    assert_eq!(strftime(&resolved, "%s").unwrap(), "981244800");
}

#[test]
fn test_resolve_hour_24_rolls_forward() {
    let parsed = strptime("%H:%M:%S", "24:00:00").unwrap();
    let resolved = Resolver::utc().resolve(&parsed).unwrap();
    // The following midnight relative to the 1970-01-01 default.
    assert_eq!(resolved.epoch_second(), 86_400);

    let parsed = strptime("%H:%M:%S %Z", "24:59:59 PST").unwrap();
    let resolved = Resolver::utc().resolve(&parsed).unwrap();
    assert_eq!(resolved.offset_second(), -28_800);
    // Next day 00:59:59 at -08:00.
    assert_eq!(resolved.epoch_second(), 118_799);
    assert_eq!(resolved.day(), 2);
    assert_eq!(resolved.hour(), 0);
    assert_eq!(resolved.minute(), 59);
}

#[test]
fn test_resolve_ignores_day_of_year() {
    let parsed = strptime("%Y-%jT%H:%M:%S", "2001-128T23:59:59").unwrap();
    assert_eq!(parsed.day_of_year(), Some(128));

    let resolved = Resolver::utc().resolve(&parsed).unwrap();
    // Month and day fall back to the defaults; %j plays no part.
    assert_eq!(resolved.epoch_second(), 978_393_599);
    assert_eq!(resolved.month(), 1);
    assert_eq!(resolved.day(), 1);
}

#[test]
fn test_resolve_rejects_invalid_dates() {
    let parsed = strptime("%Y-%m-%d", "2001-02-29").unwrap();
    assert_eq!(
        Resolver::utc().resolve(&parsed),
        Err(ResolveError::InvalidDate {
            year: 2001,
            month: 2,
            day: 29
        })
    );

    let parsed = strptime("%Y-%m-%d", "2000-02-29").unwrap();
    let resolved = Resolver::utc().resolve(&parsed).unwrap();
    assert_eq!(resolved.epoch_second(), 951_782_400);
}

#[test]
fn test_resolve_zone_fallbacks() {
    let parsed = strptime("%Y", "2001").unwrap();
    assert_eq!(
        Resolver::new().resolve(&parsed),
        Err(ResolveError::EmptyTimeZone)
    );

    let parsed = strptime("%Y %Z", "2001 XYZZY").unwrap();
    assert_eq!(
        Resolver::new().resolve(&parsed),
        Err(ResolveError::UnknownTimeZone("XYZZY".to_owned()))
    );

    // The default offset covers unknown names.
    let resolved = Resolver::new()
        .with_default_offset(3600)
        .resolve(&parsed)
        .unwrap();
    assert_eq!(resolved.offset_second(), 3600);

    // Only the resolution table applies here; Date-style names like JST are
    // not part of it.
    let parsed = strptime("%Y %Z", "2001 JST").unwrap();
    assert_eq!(
        Resolver::new().resolve(&parsed),
        Err(ResolveError::UnknownTimeZone("JST".to_owned()))
    );

    // Numeric offsets always resolve.
    let parsed = strptime("%Y %z", "2001 +0930").unwrap();
    let resolved = Resolver::new().resolve(&parsed).unwrap();
    assert_eq!(resolved.offset_second(), 9 * 3600 + 1800);
}

#[test]
fn test_resolve_instant_needs_no_zone() {
    let parsed = strptime("%s", "0").unwrap();
    let resolved = Resolver::new().resolve(&parsed).unwrap();
    assert_eq!(resolved.epoch_second(), 0);
    assert_eq!(resolved.offset_second(), 0);

    let parsed = strptime("%s %Z", "0 EST").unwrap();
    let resolved = Resolver::new().resolve(&parsed).unwrap();
    assert_eq!(resolved.epoch_second(), 0);
    assert_eq!(resolved.offset_second(), -5 * 3600);
}

#[test]
fn test_resolve_empty_field_bags() {
    let parsed = strptime("", "").unwrap();
    let resolved = Resolver::utc().resolve(&parsed).unwrap();
    assert_eq!(resolved.epoch_second(), 0);

    assert_eq!(
        Resolver::utc().reject_empty().resolve(&parsed),
        Err(ResolveError::NoTimeInformation)
    );

    // A zone alone is not time information.
    let parsed = strptime("%Z", "PST").unwrap();
    assert_eq!(
        Resolver::utc().reject_empty().resolve(&parsed),
        Err(ResolveError::NoTimeInformation)
    );

    let parsed = strptime("%M", "05").unwrap();
    let resolved = Resolver::utc().reject_empty().resolve(&parsed).unwrap();
    assert_eq!(resolved.epoch_second(), 300);
}

#[test]
fn test_resolve_fraction_in_calendar_path() {
    let parsed = strptime("%FT%T.%N", "1970-01-01T00:00:01.250000000").unwrap();
    let resolved = Resolver::utc().resolve(&parsed).unwrap();
    assert_eq!(resolved.epoch_second(), 1);
    assert_eq!(resolved.nano_of_second(), 250_000_000);
}

#[test]
fn test_resolved_formats_back() {
    let parsed = strptime("%FT%T %z", "2019-06-08T12:34:56 +0900").unwrap();
    let resolved = Resolver::new().resolve(&parsed).unwrap();
    assert_eq!(resolved.epoch_second(), 1_559_964_896);
    assert_eq!(
        strftime(&resolved, "%Y-%m-%dT%H:%M:%S %:z").unwrap(),
        "2019-06-08T12:34:56 +09:00"
    );
    assert_eq!(strftime(&resolved, "%s").unwrap(), "1559964896");

    // Weekday and day of year come from the computed civil date.
    assert_eq!(resolved.day_of_week(), 6);
    assert_eq!(resolved.day_of_year(), 159);
    assert_eq!(strftime(&resolved, "%A").unwrap(), "Saturday");
}

#[test]
fn test_resolved_time_zone_reporting() {
    let parsed = strptime("%s", "0").unwrap();
    let resolved = Resolver::utc().resolve(&parsed).unwrap();
    assert!(resolved.is_utc());
    assert_eq!(resolved.time_zone(), "UTC");

    let parsed = strptime("%FT%T %Z", "2019-06-08T12:34:56 PST").unwrap();
    let resolved = Resolver::utc().resolve(&parsed).unwrap();
    assert!(!resolved.is_utc());
    assert_eq!(resolved.time_zone(), "PST");
}
