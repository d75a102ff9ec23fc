//! Resolution of a parsed field bag into an instant with offset.

use crate::parsed::Parsed;
use crate::zone;
use crate::{ResolveError, Time};

/// Number of nanoseconds in a second.
const NANOS_IN_SECOND: i64 = 1_000_000_000;

/// Number of seconds in a day.
const SECONDS_IN_DAY: i64 = 86_400;

/// Lengths of the months in a regular year.
const MONTH_LENGTHS: [i64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Turns a [`Parsed`] field bag into an instant, following the rules of
/// Ruby's `Time.strptime`.
///
/// - An epoch directive (`%s`, `%Q`) dominates the calendar fields entirely,
///   with `%Q` winning over `%s` when both are present.
/// - A sub-second field (`%L`, `%N`) is combined with the instant using the
///   sign of the instant, like `Time.at(seconds, fraction)`.
/// - Otherwise the calendar fields are completed with defaults (1970-01-01
///   00:00:00) and interpreted at the offset named by the parsed zone, or at
///   the configured default offset.
/// - A parsed leap second or 24:00 rolls into the following second or day.
/// - A parsed day of year (`%j`) is deliberately ignored, like
///   `Time.strptime` and unlike `DateTime.strptime`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    default_offset: Option<i32>,
    reject_empty: bool,
}

impl Resolver {
    /// Construct a resolver with no default offset.
    ///
    /// Inputs without a recognizable zone will fail to resolve.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a resolver defaulting to UTC.
    #[must_use]
    pub fn utc() -> Self {
        Self::new().with_default_offset(0)
    }

    /// Use the provided offset when the input has no zone, or a zone the
    /// resolution table does not know.
    #[must_use]
    pub fn with_default_offset(mut self, offset_second: i32) -> Self {
        self.default_offset = Some(offset_second);
        self
    }

    /// Fail with [`ResolveError::NoTimeInformation`] when not a single
    /// calendar or time field was parsed.
    #[must_use]
    pub fn reject_empty(mut self) -> Self {
        self.reject_empty = true;
        self
    }

    /// Resolve a parsed field bag.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] for an unresolvable zone, an invalid civil
    /// date, or (in [`reject_empty`](Resolver::reject_empty) mode) an empty
    /// field bag.
    pub fn resolve(&self, parsed: &Parsed) -> Result<Resolved, ResolveError> {
        if parsed.instant_millis().is_some() || parsed.instant_seconds().is_some() {
            Ok(self.resolve_instant(parsed))
        } else {
            self.resolve_calendar(parsed)
        }
    }

    /// Resolve from an epoch directive; calendar fields are ignored.
    fn resolve_instant(&self, parsed: &Parsed) -> Resolved {
        let (base_second, base_nano) = match (parsed.instant_millis(), parsed.instant_seconds()) {
            (Some(millis), _) => (
                millis.div_euclid(1000),
                millis.rem_euclid(1000) * 1_000_000,
            ),
            (None, seconds) => (seconds.unwrap_or(0), 0),
        };

        let mut total = i128::from(base_second) * i128::from(NANOS_IN_SECOND) + i128::from(base_nano);
        if let Some(fraction) = parsed.nano_of_second() {
            // Time.at(seconds, fraction): the fraction shares the sign of
            // the integer part.
            if total < 0 {
                total -= i128::from(fraction);
            } else {
                total += i128::from(fraction);
            }
        }

        let epoch_second = total.div_euclid(i128::from(NANOS_IN_SECOND)) as i64;
        let nano_of_second = total.rem_euclid(i128::from(NANOS_IN_SECOND)) as u32;

        // The zone only picks the display offset here; the instant itself is
        // already absolute, so an unresolvable or missing zone is not an
        // error on this path.
        let offset_second = match parsed.time_zone_name() {
            Some(name) => zone::offset_for_time_resolution(name)
                .or(self.default_offset)
                .unwrap_or(0),
            None => self.default_offset.unwrap_or(0),
        };

        Resolved {
            parsed: parsed.clone(),
            epoch_second,
            nano_of_second,
            offset_second,
            from_instant: true,
            local: CivilDateTime::at_offset(epoch_second, offset_second),
        }
    }

    /// Resolve from calendar fields completed with defaults.
    fn resolve_calendar(&self, parsed: &Parsed) -> Result<Resolved, ResolveError> {
        if self.reject_empty && !has_time_information(parsed) {
            return Err(ResolveError::NoTimeInformation);
        }

        let offset_second = match parsed.time_zone_name() {
            Some(name) => match zone::offset_for_time_resolution(name) {
                Some(offset) => offset,
                None => self
                    .default_offset
                    .ok_or_else(|| ResolveError::UnknownTimeZone(name.to_owned()))?,
            },
            None => self.default_offset.ok_or(ResolveError::EmptyTimeZone)?,
        };

        let year = parsed.year().unwrap_or(1970);
        let month = parsed.month_of_year().unwrap_or(1);
        let day = parsed.day_of_month().unwrap_or(1);
        let hour = parsed.hour_of_day().unwrap_or(0);
        let minute = parsed.minute_of_hour().unwrap_or(0);
        let second = parsed.second_of_minute().unwrap_or(0);

        // A leap second is stored as 59; subtracting one more second of
        // offset moves the instant to the following second. Likewise a
        // parsed 24:00 is stored as hour 0 and moves one day forward.
        let mut offset_adjustment = i64::from(offset_second);
        if parsed.parsed_leap_second() {
            offset_adjustment -= 1;
        }
        match parsed.parsed_excess_days() {
            None => {}
            Some(1) => offset_adjustment -= SECONDS_IN_DAY,
            Some(_) => return Err(ResolveError::HourOutOfRange),
        }

        let fraction = parsed.nano_of_second().unwrap_or(0);
        let second_carry = fraction.div_euclid(NANOS_IN_SECOND);
        let nano_of_second = fraction.rem_euclid(NANOS_IN_SECOND) as u32;

        let (utc_year, utc_month, utc_day, utc_hour, utc_minute, utc_second) =
            apply_offset(year, month, day, hour, minute, second, offset_adjustment)?;

        let epoch_second = days_from_civil(utc_year, utc_month, utc_day) * SECONDS_IN_DAY
            + i64::from(utc_hour) * 3600
            + i64::from(utc_minute) * 60
            + i64::from(utc_second)
            + second_carry;

        Ok(Resolved {
            parsed: parsed.clone(),
            epoch_second,
            nano_of_second,
            offset_second,
            from_instant: false,
            local: CivilDateTime::at_offset(epoch_second, offset_second),
        })
    }
}

/// A resolved instant with offset.
///
/// Field accessors implement [`Time`], so a `Resolved` can be fed straight
/// back into the formatter. Reads prefer the raw parsed fields for calendar
/// resolutions and the computed civil fields for instant resolutions, while
/// [`to_int`](Time::to_int), [`nanoseconds`](Time::nanoseconds) and
/// [`utc_offset`](Time::utc_offset) always report the computed instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    parsed: Parsed,
    epoch_second: i64,
    nano_of_second: u32,
    offset_second: i32,
    from_instant: bool,
    local: CivilDateTime,
}

impl Resolved {
    /// Returns the number of seconds since the epoch.
    #[must_use]
    pub fn epoch_second(&self) -> i64 {
        self.epoch_second
    }

    /// Returns the nanosecond within the second, in `0..=999_999_999`.
    #[must_use]
    pub fn nano_of_second(&self) -> u32 {
        self.nano_of_second
    }

    /// Returns the offset from UTC in seconds.
    #[must_use]
    pub fn offset_second(&self) -> i32 {
        self.offset_second
    }

    /// Returns the parsed field bag this value was resolved from.
    #[must_use]
    pub fn parsed(&self) -> &Parsed {
        &self.parsed
    }

    /// Read a field, preferring the parsed value for calendar resolutions.
    fn prefer<V: Copy>(&self, parsed: Option<V>, computed: V) -> V {
        if self.from_instant {
            computed
        } else {
            parsed.unwrap_or(computed)
        }
    }
}

impl Time for Resolved {
    fn year(&self) -> i32 {
        self.prefer(self.parsed.year(), self.local.year) as i32
    }

    fn month(&self) -> u8 {
        self.prefer(self.parsed.month_of_year(), self.local.month)
    }

    fn day(&self) -> u8 {
        self.prefer(self.parsed.day_of_month(), self.local.day)
    }

    fn hour(&self) -> u8 {
        self.prefer(self.parsed.hour_of_day(), self.local.hour)
    }

    fn minute(&self) -> u8 {
        self.prefer(self.parsed.minute_of_hour(), self.local.minute)
    }

    fn second(&self) -> u8 {
        self.prefer(self.parsed.second_of_minute(), self.local.second)
    }

    fn nanoseconds(&self) -> u32 {
        self.nano_of_second
    }

    fn day_of_week(&self) -> u8 {
        self.prefer(self.parsed.day_of_week_sun0(), self.local.day_of_week())
    }

    fn day_of_year(&self) -> u16 {
        self.prefer(self.parsed.day_of_year(), self.local.day_of_year())
    }

    fn to_int(&self) -> i64 {
        self.epoch_second
    }

    fn is_utc(&self) -> bool {
        self.offset_second == 0
    }

    fn utc_offset(&self) -> i32 {
        self.offset_second
    }

    fn time_zone(&self) -> &str {
        match self.parsed.time_zone_name() {
            Some(name) => name,
            None if self.offset_second == 0 => "UTC",
            None => "",
        }
    }
}

/// Civil date-time at a fixed offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CivilDateTime {
    year: i64,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    days: i64,
}

impl CivilDateTime {
    /// Compute the civil fields of an instant displayed at an offset.
    fn at_offset(epoch_second: i64, offset_second: i32) -> Self {
        let local = epoch_second + i64::from(offset_second);
        let days = local.div_euclid(SECONDS_IN_DAY);
        let time = local.rem_euclid(SECONDS_IN_DAY);
        let (year, month, day) = civil_from_days(days);
        Self {
            year,
            month,
            day,
            hour: (time / 3600) as u8,
            minute: ((time / 60) % 60) as u8,
            second: (time % 60) as u8,
            days,
        }
    }

    /// Day of the week in `0..=6` with `Sunday == 0`.
    fn day_of_week(&self) -> u8 {
        // 1970-01-01 was a Thursday.
        (self.days + 4).rem_euclid(7) as u8
    }

    /// Day of the year in `1..=366`.
    fn day_of_year(&self) -> u16 {
        (self.days - days_from_civil(self.year, 1, 1) + 1) as u16
    }
}

/// Check if any calendar or time field is present.
fn has_time_information(parsed: &Parsed) -> bool {
    parsed.year().is_some()
        || parsed.month_of_year().is_some()
        || parsed.day_of_month().is_some()
        || parsed.day_of_year().is_some()
        || parsed.hour_of_day().is_some()
        || parsed.minute_of_hour().is_some()
        || parsed.second_of_minute().is_some()
        || parsed.nano_of_second().is_some()
        || parsed.week_based_year().is_some()
        || parsed.week_of_week_based_year().is_some()
        || parsed.week_of_year_sunday().is_some()
        || parsed.week_of_year_monday().is_some()
        || parsed.day_of_week_mon1().is_some()
        || parsed.day_of_week_sun0().is_some()
}

/// Subtract an offset from local calendar fields to obtain the UTC fields.
///
/// The offset is distributed across the time of day, carrying whole days
/// into the date with the month-length table. The local date itself must be
/// valid; Feb 29 of a non-leap year (or any overlong day of month) is
/// rejected here.
fn apply_offset(
    year: i64,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    offset: i64,
) -> Result<(i64, u8, u8, u8, u8, u8), ResolveError> {
    if i64::from(day) > days_in_month(year, month) {
        return Err(ResolveError::InvalidDate { year, month, day });
    }

    let total = i64::from(hour) * 3600 + i64::from(minute) * 60 + i64::from(second) - offset;
    let time = total.rem_euclid(SECONDS_IN_DAY);

    let mut year = year;
    let mut month = month;
    let mut day = i64::from(day) + total.div_euclid(SECONDS_IN_DAY);

    loop {
        let length = days_in_month(year, month);
        if day <= length {
            break;
        }
        day -= length;
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }
    while day < 1 {
        month = if month == 1 {
            year -= 1;
            12
        } else {
            month - 1
        };
        day += days_in_month(year, month);
    }

    Ok((
        year,
        month,
        day as u8,
        (time / 3600) as u8,
        ((time / 60) % 60) as u8,
        (time % 60) as u8,
    ))
}

/// Check if a year is a leap year.
fn is_leap_year(year: i64) -> bool {
    year % 400 == 0 || (year % 4 == 0 && year % 100 != 0)
}

/// Length of a month, honoring the leap-year rule.
fn days_in_month(year: i64, month: u8) -> i64 {
    if month == 2 && is_leap_year(year) {
        29
    } else {
        MONTH_LENGTHS[(month - 1) as usize]
    }
}

/// Number of days since the epoch of a proleptic Gregorian date.
fn days_from_civil(year: i64, month: u8, day: u8) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let year_of_era = y - era * 400;
    let month_from_march = i64::from((month + 9) % 12);
    let day_of_year = (153 * month_from_march + 2) / 5 + i64::from(day) - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}

/// Proleptic Gregorian date of a number of days since the epoch.
fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let day_of_era = z - era * 146_097;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let year = year_of_era + era * 400;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let month_from_march = (5 * day_of_year + 2) / 153;
    let day = (day_of_year - (153 * month_from_march + 2) / 5 + 1) as u8;
    let month = if month_from_march < 10 {
        month_from_march + 3
    } else {
        month_from_march - 9
    } as u8;
    let year = if month <= 2 { year + 1 } else { year };
    (year, month, day)
}
