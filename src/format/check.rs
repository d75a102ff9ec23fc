//! Range checks applied to a time implementation before formatting.
//!
//! A directive that reads a field out of its documented range surfaces a
//! typed error instead of producing garbage or panicking on a table index.

use crate::{FormatError, Time};

/// Checks that the month is in `1..=12`.
pub(crate) fn month(time: &impl Time) -> Result<u8, FormatError> {
    match time.month() {
        month @ 1..=12 => Ok(month),
        _ => Err(FormatError::InvalidTime("month")),
    }
}

/// Checks that the day of the month is in `1..=31`.
pub(crate) fn day(time: &impl Time) -> Result<u8, FormatError> {
    match time.day() {
        day @ 1..=31 => Ok(day),
        _ => Err(FormatError::InvalidTime("day of month")),
    }
}

/// Checks that the hour of the day is in `0..=23`.
pub(crate) fn hour(time: &impl Time) -> Result<u8, FormatError> {
    match time.hour() {
        hour @ 0..=23 => Ok(hour),
        _ => Err(FormatError::InvalidTime("hour")),
    }
}

/// Checks that the minute of the hour is in `0..=59`.
pub(crate) fn minute(time: &impl Time) -> Result<u8, FormatError> {
    match time.minute() {
        minute @ 0..=59 => Ok(minute),
        _ => Err(FormatError::InvalidTime("minute")),
    }
}

/// Checks that the second of the minute is in `0..=60`.
pub(crate) fn second(time: &impl Time) -> Result<u8, FormatError> {
    match time.second() {
        second @ 0..=60 => Ok(second),
        _ => Err(FormatError::InvalidTime("second")),
    }
}

/// Checks that the number of nanoseconds is in `0..=999_999_999`.
pub(crate) fn nanoseconds(time: &impl Time) -> Result<u32, FormatError> {
    match time.nanoseconds() {
        nanoseconds @ 0..=999_999_999 => Ok(nanoseconds),
        _ => Err(FormatError::InvalidTime("nanoseconds")),
    }
}

/// Checks that the day of the week is in `0..=6`.
pub(crate) fn day_of_week(time: &impl Time) -> Result<u8, FormatError> {
    match time.day_of_week() {
        day_of_week @ 0..=6 => Ok(day_of_week),
        _ => Err(FormatError::InvalidTime("day of week")),
    }
}

/// Checks that the day of the year is in `1..=366`.
pub(crate) fn day_of_year(time: &impl Time) -> Result<u16, FormatError> {
    match time.day_of_year() {
        day_of_year @ 1..=366 => Ok(day_of_year),
        _ => Err(FormatError::InvalidTime("day of year")),
    }
}

/// Checks that the name of the time zone is valid ASCII.
pub(crate) fn time_zone(time: &impl Time) -> Result<&str, FormatError> {
    let time_zone = time.time_zone();
    if time_zone.is_ascii() {
        Ok(time_zone)
    } else {
        Err(FormatError::InvalidTime("time zone"))
    }
}
