use crate::{strptime, Format, ParseError};

fn parse_err(pattern: &str, input: &str) -> ParseError {
    strptime(pattern, input).unwrap_err()
}

#[test]
fn test_parse_calendar_date() {
    let parsed = strptime("%Y-%m-%d", "2022-03-06").unwrap();
    assert_eq!(parsed.year(), Some(2022));
    assert_eq!(parsed.month_of_year(), Some(3));
    assert_eq!(parsed.day_of_month(), Some(6));
    assert_eq!(parsed.leftover(), None);
}

#[test]
fn test_parse_time_of_day() {
    let parsed = strptime("%H:%M:%S", "12:34:56").unwrap();
    assert_eq!(parsed.hour_of_day(), Some(12));
    assert_eq!(parsed.minute_of_hour(), Some(34));
    assert_eq!(parsed.second_of_minute(), Some(56));
}

#[test]
fn test_parse_short_digit_runs() {
    // Numeric directives accept fewer digits than their width.
    let parsed = strptime("%Y-%m-%d", "5-3-6").unwrap();
    assert_eq!(parsed.year(), Some(5));
    assert_eq!(parsed.month_of_year(), Some(3));
    assert_eq!(parsed.day_of_month(), Some(6));
}

#[test]
fn test_parse_greedy_year_is_bounded_by_numeric_neighbors() {
    // In tail position the year is greedy.
    assert_eq!(strptime("%Y", "123456").unwrap().year(), Some(123_456));

    // Followed by a numeric directive it reads exactly four digits.
    let parsed = strptime("%Y%m%d", "20220306").unwrap();
    assert_eq!(parsed.year(), Some(2022));
    assert_eq!(parsed.month_of_year(), Some(3));
    assert_eq!(parsed.day_of_month(), Some(6));

    // A literal starting with a digit also bounds the year.
    let parsed = strptime("%Y1%m", "2022103").unwrap();
    assert_eq!(parsed.year(), Some(2022));
    assert_eq!(parsed.month_of_year(), Some(3));

    // A non-digit literal does not.
    let parsed = strptime("%Y-%m", "123456-7").unwrap();
    assert_eq!(parsed.year(), Some(123_456));
    assert_eq!(parsed.month_of_year(), Some(7));
}

#[test]
fn test_parse_signed_years() {
    assert_eq!(strptime("%Y", "-2022").unwrap().year(), Some(-2022));
    assert_eq!(strptime("%Y", "+2022").unwrap().year(), Some(2022));
}

#[test]
fn test_parse_two_digit_year_century_inference() {
    assert_eq!(strptime("%y", "69").unwrap().year(), Some(1969));
    assert_eq!(strptime("%y", "99").unwrap().year(), Some(1999));
    assert_eq!(strptime("%y", "00").unwrap().year(), Some(2000));
    assert_eq!(strptime("%y", "68").unwrap().year(), Some(2068));

    // A four-digit year is taken at face value.
    assert_eq!(strptime("%Y", "69").unwrap().year(), Some(69));
}

#[test]
fn test_parse_century_merging() {
    assert_eq!(strptime("%C", "20").unwrap().year(), Some(2000));
    assert_eq!(strptime("%C%y", "2012").unwrap().year(), Some(2012));
    assert_eq!(strptime("%C %y", "19 84").unwrap().year(), Some(1984));
    assert_eq!(strptime("%C%g", "1977").unwrap().week_based_year(), Some(1977));
}

#[test]
fn test_parse_day_with_leading_space() {
    let parsed = strptime("%e", " 5").unwrap();
    assert_eq!(parsed.day_of_month(), Some(5));
    assert_eq!(strptime("%e", "15").unwrap().day_of_month(), Some(15));
    assert_eq!(strptime("%k", " 3").unwrap().hour_of_day(), Some(3));
    assert_eq!(strptime("%l", " 7").unwrap().hour_of_day(), Some(7));
}

#[test]
fn test_parse_names_case_insensitively() {
    for input in ["wED", "Wed", "weDnesDay", "WEDNESDAY"] {
        let parsed = strptime("%a", input).unwrap();
        assert_eq!(parsed.day_of_week_sun0(), Some(3), "{input}");
    }

    for input in ["feb", "February", "FEBRUARY", "FeB"] {
        let parsed = strptime("%b", input).unwrap();
        assert_eq!(parsed.month_of_year(), Some(2), "{input}");
    }

    // Full names win over abbreviations, so nothing of the name leaks into
    // the leftover.
    let parsed = strptime("%A", "Saturday!").unwrap();
    assert_eq!(parsed.day_of_week_sun0(), Some(6));
    assert_eq!(parsed.leftover(), Some("!"));
}

#[test]
fn test_parse_meridians() {
    assert_eq!(strptime("%I %p", "12 AM").unwrap().hour_of_day(), Some(0));
    assert_eq!(strptime("%I %p", "1 am").unwrap().hour_of_day(), Some(1));
    assert_eq!(strptime("%I %p", "1 P.M.").unwrap().hour_of_day(), Some(13));
    assert_eq!(strptime("%I %P", "12 pm").unwrap().hour_of_day(), Some(12));

    // A meridian also reinterprets a 24-hour directive.
    assert_eq!(strptime("%H %p", "1 pm").unwrap().hour_of_day(), Some(13));

    // Alone it contributes nothing.
    assert_eq!(strptime("%p", "pm").unwrap().hour_of_day(), None);
}

#[test]
fn test_parse_leap_second() {
    let parsed = strptime("%H:%M:%S", "23:59:60").unwrap();
    assert_eq!(parsed.second_of_minute(), Some(59));
    assert!(parsed.parsed_leap_second());
}

#[test]
fn test_parse_hour_24() {
    let parsed = strptime("%H:%M:%S", "24:00:00").unwrap();
    assert_eq!(parsed.hour_of_day(), Some(0));
    assert_eq!(parsed.parsed_excess_days(), Some(1));

    assert!(strptime("%H", "25").is_err());
}

#[test]
fn test_parse_fractional_seconds() {
    // Up to the default precision, scaled to nanoseconds.
    assert_eq!(
        strptime("%S.%L", "56.7").unwrap().nano_of_second(),
        Some(700_000_000)
    );
    assert_eq!(
        strptime("%S.%L", "56.789").unwrap().nano_of_second(),
        Some(789_000_000)
    );
    assert_eq!(
        strptime("%S.%N", "56.123456").unwrap().nano_of_second(),
        Some(123_456_000)
    );

    // Excess digits are truncated, not rounded.
    assert_eq!(
        strptime("%S.%N", "56.123456789999").unwrap().nano_of_second(),
        Some(123_456_789)
    );

    // A numeric neighbor bounds the read to the default precision.
    let parsed = strptime("%L%H", "12304").unwrap();
    assert_eq!(parsed.nano_of_second(), Some(123_000_000));
    assert_eq!(parsed.hour_of_day(), Some(4));

    // The sign applies to the scaled value.
    assert_eq!(
        strptime("%N", "-5").unwrap().nano_of_second(),
        Some(-500_000_000)
    );
}

#[test]
fn test_parse_epoch_directives() {
    let parsed = strptime("%s", "86400").unwrap();
    assert_eq!(parsed.instant_seconds(), Some(86_400));
    assert_eq!(parsed.instant_millis(), None);

    let parsed = strptime("%s", "-86400").unwrap();
    assert_eq!(parsed.instant_seconds(), Some(-86_400));

    let parsed = strptime("%Q", "1500000000456").unwrap();
    assert_eq!(parsed.instant_millis(), Some(1_500_000_000_456));
    assert_eq!(parsed.instant_seconds(), Some(1_500_000_000));

    // The later directive wins.
    let parsed = strptime("%s %Q", "123456789 12849124").unwrap();
    assert_eq!(parsed.instant_millis(), Some(12_849_124));

    let parsed = strptime("%Q %s", "12849124 123456789").unwrap();
    assert_eq!(parsed.instant_millis(), None);
    assert_eq!(parsed.instant_seconds(), Some(123_456_789));
}

#[test]
fn test_parse_zone_names() {
    let parsed = strptime("%Z", "PST").unwrap();
    assert_eq!(parsed.time_zone_name(), Some("PST"));

    let parsed = strptime("%Z", "Pacific Standard Time rest").unwrap();
    assert_eq!(parsed.time_zone_name(), Some("Pacific Standard Time"));
    assert_eq!(parsed.leftover(), Some(" rest"));

    let parsed = strptime("%Z", "MET DST").unwrap();
    assert_eq!(parsed.time_zone_name(), Some("MET DST"));

    assert_eq!(strptime("%Z", "Z").unwrap().time_zone_name(), Some("Z"));

    assert!(strptime("%Z", "12:30").is_err());
}

#[test]
fn test_parse_zone_offsets() {
    for input in ["+0900", "-0500", "+09:30", "-09:30:15", "GMT+9", "utc-5", "UT+1", "+9.5"] {
        let parsed = strptime("%z", input).unwrap();
        assert_eq!(parsed.time_zone_name(), Some(input), "{input}");
    }

    // The offset grammar stops at the first byte it cannot use.
    let parsed = strptime("%FT%T%z", "2022-03-06T12:34:56-1234rest").unwrap();
    assert_eq!(parsed.time_zone_name(), Some("-1234"));
    assert_eq!(parsed.leftover(), Some("rest"));
}

#[test]
fn test_parse_literal_whitespace_matches_any_run() {
    let parsed = strptime("%d %m", "5\t \u{a0}6").unwrap();
    assert_eq!(parsed.day_of_month(), Some(5));
    assert_eq!(parsed.month_of_year(), Some(6));

    // Zero-width runs match too.
    let parsed = strptime("%d %B", "5March").unwrap();
    assert_eq!(parsed.day_of_month(), Some(5));
    assert_eq!(parsed.month_of_year(), Some(3));

    // %n and %t consume whitespace like a literal space.
    let parsed = strptime("%d%n%t%m", "5   6").unwrap();
    assert_eq!(parsed.month_of_year(), Some(6));
}

#[test]
fn test_parse_percent_escape() {
    let parsed = strptime("%d%%%m", "5%6").unwrap();
    assert_eq!(parsed.day_of_month(), Some(5));
    assert_eq!(parsed.month_of_year(), Some(6));

    assert!(strptime("%%", "x").is_err());
}

#[test]
fn test_parse_composite_directives() {
    let parsed = strptime("%F", "2022-03-06").unwrap();
    assert_eq!(parsed.year(), Some(2022));
    assert_eq!(parsed.month_of_year(), Some(3));
    assert_eq!(parsed.day_of_month(), Some(6));

    let parsed = strptime("%T", "12:34:56").unwrap();
    assert_eq!(parsed.hour_of_day(), Some(12));

    let parsed = strptime("%D", "3/6/22").unwrap();
    assert_eq!(parsed.year(), Some(2022));

    let parsed = strptime("%c", "Sun Mar  6 12:34:56 2022").unwrap();
    assert_eq!(parsed.year(), Some(2022));
    assert_eq!(parsed.month_of_year(), Some(3));
    assert_eq!(parsed.day_of_month(), Some(6));
    assert_eq!(parsed.day_of_week_sun0(), Some(0));

    let parsed = strptime("%+", "Sun Mar  6 12:34:56 PST 2022").unwrap();
    assert_eq!(parsed.year(), Some(2022));
    assert_eq!(parsed.time_zone_name(), Some("PST"));

    let parsed = strptime("%v", " 6-Mar-2022").unwrap();
    assert_eq!(parsed.year(), Some(2022));
    assert_eq!(parsed.month_of_year(), Some(3));
    assert_eq!(parsed.day_of_month(), Some(6));

    let parsed = strptime("%r", "11:22:33 pm").unwrap();
    assert_eq!(parsed.hour_of_day(), Some(23));
}

#[test]
fn test_parse_week_fields() {
    let parsed = strptime("%G-W%V-%u", "2026-W01-4").unwrap();
    assert_eq!(parsed.week_based_year(), Some(2026));
    assert_eq!(parsed.week_of_week_based_year(), Some(1));
    assert_eq!(parsed.day_of_week_mon1(), Some(4));

    assert_eq!(strptime("%g", "77").unwrap().week_based_year(), Some(1977));
    assert_eq!(strptime("%U", "00").unwrap().week_of_year_sunday(), Some(0));
    assert_eq!(strptime("%W", "53").unwrap().week_of_year_monday(), Some(53));
    assert_eq!(strptime("%w", "0").unwrap().day_of_week_sun0(), Some(0));

    assert!(strptime("%V", "00").is_err());
    assert!(strptime("%u", "8").is_err());
}

#[test]
fn test_parse_day_of_year_range() {
    assert_eq!(strptime("%j", "365").unwrap().day_of_year(), Some(365));
    // The upper bound is 365, not 366.
    assert!(strptime("%j", "366").is_err());
}

#[test]
fn test_parse_flags_and_width_are_ignored() {
    let parsed = strptime("%-^10H", "12").unwrap();
    assert_eq!(parsed.hour_of_day(), Some(12));

    let parsed = strptime("%EY-%Om", "2022-03").unwrap();
    assert_eq!(parsed.year(), Some(2022));
    assert_eq!(parsed.month_of_year(), Some(3));
}

#[test]
fn test_parse_colon_offsets_accept_plain_offsets() {
    for pattern in ["%z", "%:z", "%::z", "%:::z"] {
        let parsed = strptime(pattern, "+09:30").unwrap();
        assert_eq!(parsed.time_zone_name(), Some("+09:30"), "{pattern}");
    }

    // Four colons are a literal, so parsing requires the literal text.
    assert!(strptime("%::::z", "+09:30").is_err());
    let parsed = strptime("%::::z", "%::::z").unwrap();
    assert_eq!(parsed.time_zone_name(), None);
}

#[test]
fn test_parse_leftover() {
    let parsed = strptime("%Y", "2022-03-06").unwrap();
    assert_eq!(parsed.leftover(), Some("-03-06"));

    let parsed = strptime("", "anything").unwrap();
    assert_eq!(parsed.leftover(), Some("anything"));
}

#[test]
fn test_parse_errors_carry_input_and_index() {
    let error = parse_err("%Y-%m-%d", "2022/03/06");
    assert_eq!(error.input, "2022/03/06");
    assert_eq!(error.index, 4);
    assert_eq!(error.message, "expected '-'");

    let error = parse_err("%d", "32");
    assert_eq!(error.index, 0);
    assert_eq!(error.message, "day of the month out of range");

    let error = parse_err("%H:%M", "12:");
    assert_eq!(error.index, 3);
    assert_eq!(error.message, "expected digits");

    let error = parse_err("%a", "noday");
    assert_eq!(error.index, 0);
    assert_eq!(error.message, "expected a day of week name");
}

#[test]
fn test_parse_numeric_overflow_is_an_error() {
    let error = parse_err("%s", "9999999999999999999999999");
    assert_eq!(error.message, "numeric value out of range");
}

#[test]
fn test_parse_reuses_compiled_pattern() {
    let format = Format::compile("%H:%M");
    assert_eq!(format.parse("01:02").unwrap().hour_of_day(), Some(1));
    assert_eq!(format.parse("23:59").unwrap().minute_of_hour(), Some(59));
}
