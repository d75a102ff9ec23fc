use quickcheck_macros::quickcheck;

use crate::string::strftime;
use crate::{strptime, Resolver};

#[quickcheck]
fn prop_epoch_seconds_round_trip(seconds: i64) -> bool {
    // Stay well inside the representable civil range.
    let seconds = seconds % 1_000_000_000_000;

    let parsed = strptime("%s", &seconds.to_string()).unwrap();
    let resolved = Resolver::utc().resolve(&parsed).unwrap();

    resolved.epoch_second() == seconds && strftime(&resolved, "%s").unwrap() == seconds.to_string()
}

#[quickcheck]
fn prop_epoch_seconds_with_fraction_round_trip(seconds: u32, nanos: u32) -> bool {
    let seconds = i64::from(seconds);
    let nanos = nanos % 1_000_000_000;

    let input = format!("{seconds}.{nanos:09}");
    let parsed = strptime("%s.%N", &input).unwrap();
    let resolved = Resolver::utc().resolve(&parsed).unwrap();

    resolved.epoch_second() == seconds
        && resolved.nano_of_second() == nanos
        && strftime(&resolved, "%s.%N").unwrap() == input
}

#[quickcheck]
fn prop_default_offset_shifts_the_instant(offset: i16) -> bool {
    let offset = i32::from(offset);

    let parsed = strptime("%FT%T", "2001-02-03T04:05:06").unwrap();
    let base = Resolver::utc().resolve(&parsed).unwrap();
    let shifted = Resolver::new()
        .with_default_offset(offset)
        .resolve(&parsed)
        .unwrap();

    base.epoch_second() - shifted.epoch_second() == i64::from(offset)
        && shifted.offset_second() == offset
}

#[quickcheck]
fn prop_civil_date_round_trips_through_both_engines(days: u32) -> bool {
    // Any day in roughly the first 8000 years of the epoch.
    let seconds = i64::from(days % 3_000_000) * 86_400;

    let resolved = Resolver::utc()
        .resolve(&strptime("%s", &seconds.to_string()).unwrap())
        .unwrap();
    let formatted = strftime(&resolved, "%Y-%m-%d").unwrap();

    let parsed = strptime("%Y-%m-%d", &formatted).unwrap();
    let back = Resolver::utc().resolve(&parsed).unwrap();

    back.epoch_second() == seconds
}

#[quickcheck]
fn prop_parse_never_panics_and_errors_stay_in_bounds(pattern: String, input: String) -> bool {
    match strptime(&pattern, &input) {
        Ok(_) => true,
        Err(error) => error.index <= input.len(),
    }
}
