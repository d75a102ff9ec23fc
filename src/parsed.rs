//! Parsed field bag and its map projection.

use std::collections::BTreeMap;

use crate::zone;

/// Number of nanoseconds in a second.
const NANOS_IN_SECOND: i64 = 1_000_000_000;

/// Fields extracted from an input string by [`Format::parse`].
///
/// Every field is either absent or holds the value most recently written by
/// the parser. A `Parsed` is sealed on construction: the merge rules below
/// have already been applied and the value never changes afterwards.
///
/// Merge rules:
///
/// - a two-digit year (`%y`, `%g`) combines with a century (`%C`) as
///   `century * 100 + year`; without a century, years `69..=99` land in the
///   1900s and years `0..=68` in the 2000s,
/// - a 12-hour clock value combines with a meridian indicator (`%p`, `%P`)
///   as `hour % 12 + meridian`,
/// - a second of `60` is stored as `59` with the leap second flag set,
/// - an hour of `24` is stored as `0` with one excess day recorded.
///
/// [`Format::parse`]: crate::Format::parse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed {
    year: Option<i64>,
    month_of_year: Option<u8>,
    day_of_month: Option<u8>,
    day_of_year: Option<u16>,
    hour_of_day: Option<u8>,
    minute_of_hour: Option<u8>,
    second_of_minute: Option<u8>,
    nano_of_second: Option<i64>,
    instant_seconds: Option<i64>,
    instant_millis: Option<i64>,
    week_based_year: Option<i64>,
    week_of_week_based_year: Option<u8>,
    week_of_year_sunday: Option<u8>,
    week_of_year_monday: Option<u8>,
    day_of_week_mon1: Option<u8>,
    day_of_week_sun0: Option<u8>,
    time_zone_name: Option<String>,
    leftover: Option<String>,
    leap_second: bool,
    excess_days: Option<u32>,
}

impl Parsed {
    /// Returns the year, with the century merged in.
    #[must_use]
    pub fn year(&self) -> Option<i64> {
        self.year
    }

    /// Returns the month of the year in `1..=12`.
    #[must_use]
    pub fn month_of_year(&self) -> Option<u8> {
        self.month_of_year
    }

    /// Returns the day of the month in `1..=31`.
    #[must_use]
    pub fn day_of_month(&self) -> Option<u8> {
        self.day_of_month
    }

    /// Returns the day of the year in `1..=365`.
    #[must_use]
    pub fn day_of_year(&self) -> Option<u16> {
        self.day_of_year
    }

    /// Returns the hour of the day in `0..=23`, with any meridian indicator
    /// merged in and a parsed `24` normalized to `0` (see
    /// [`parsed_excess_days`](Parsed::parsed_excess_days)).
    #[must_use]
    pub fn hour_of_day(&self) -> Option<u8> {
        self.hour_of_day
    }

    /// Returns the minute of the hour in `0..=59`.
    #[must_use]
    pub fn minute_of_hour(&self) -> Option<u8> {
        self.minute_of_hour
    }

    /// Returns the second of the minute in `0..=59`, with a parsed leap
    /// second normalized to `59` (see
    /// [`parsed_leap_second`](Parsed::parsed_leap_second)).
    #[must_use]
    pub fn second_of_minute(&self) -> Option<u8> {
        self.second_of_minute
    }

    /// Returns the signed sub-second value scaled to nanoseconds.
    #[must_use]
    pub fn nano_of_second(&self) -> Option<i64> {
        self.nano_of_second
    }

    /// Returns the number of seconds since the epoch (`%s`).
    ///
    /// Also set by `%Q` to the floored second value of the parsed
    /// milliseconds.
    #[must_use]
    pub fn instant_seconds(&self) -> Option<i64> {
        self.instant_seconds
    }

    /// Returns the number of milliseconds since the epoch (`%Q`).
    ///
    /// A later `%s` clears this field.
    #[must_use]
    pub fn instant_millis(&self) -> Option<i64> {
        self.instant_millis
    }

    /// Returns the ISO 8601 week-based year, with the century merged in.
    #[must_use]
    pub fn week_based_year(&self) -> Option<i64> {
        self.week_based_year
    }

    /// Returns the ISO 8601 week number in `1..=53`.
    #[must_use]
    pub fn week_of_week_based_year(&self) -> Option<u8> {
        self.week_of_week_based_year
    }

    /// Returns the week number in `0..=53`, with week 1 starting at the
    /// first Sunday of the year.
    #[must_use]
    pub fn week_of_year_sunday(&self) -> Option<u8> {
        self.week_of_year_sunday
    }

    /// Returns the week number in `0..=53`, with week 1 starting at the
    /// first Monday of the year.
    #[must_use]
    pub fn week_of_year_monday(&self) -> Option<u8> {
        self.week_of_year_monday
    }

    /// Returns the day of the week in `1..=7` with `Monday == 1`.
    #[must_use]
    pub fn day_of_week_mon1(&self) -> Option<u8> {
        self.day_of_week_mon1
    }

    /// Returns the day of the week in `0..=6` with `Sunday == 0`.
    #[must_use]
    pub fn day_of_week_sun0(&self) -> Option<u8> {
        self.day_of_week_sun0
    }

    /// Returns the time zone name or numeric offset, verbatim from the
    /// input.
    #[must_use]
    pub fn time_zone_name(&self) -> Option<&str> {
        self.time_zone_name.as_deref()
    }

    /// Returns the input text left unconsumed after the last token.
    #[must_use]
    pub fn leftover(&self) -> Option<&str> {
        self.leftover.as_deref()
    }

    /// Check if a leap second (`%S` of 60) was parsed.
    #[must_use]
    pub fn parsed_leap_second(&self) -> bool {
        self.leap_second
    }

    /// Returns the number of excess days produced by parsing an hour of 24.
    #[must_use]
    pub fn parsed_excess_days(&self) -> Option<u32> {
        self.excess_days
    }

    /// Project the parsed fields into a map with the same keys as Ruby's
    /// `Date._strptime` hash.
    ///
    /// Only present fields produce entries. The `hour` and `sec` entries
    /// reconstruct the raw parsed values (`24`, `60`) from the normalized
    /// field plus flag. The `seconds` entry prefers the millisecond epoch and
    /// goes through [`HashConverter::epoch_millis`]; `sec_fraction` goes
    /// through [`HashConverter::second_fraction`]. The `offset` entry is the
    /// zone name resolved against the parsing zone table and is omitted when
    /// the name is not recognized.
    pub fn to_map<C: HashConverter>(&self, converter: &C) -> BTreeMap<C::Key, C::Value> {
        let mut map = BTreeMap::new();

        if let Some(value) = self.week_of_week_based_year {
            map.insert(converter.key("cweek"), converter.integer(value.into()));
        }
        if let Some(value) = self.day_of_week_mon1 {
            map.insert(converter.key("cwday"), converter.integer(value.into()));
        }
        if let Some(value) = self.week_based_year {
            map.insert(converter.key("cwyear"), converter.integer(value));
        }
        if let Some(value) = self.hour_of_day {
            let hour = if self.excess_days.is_some() {
                24
            } else {
                i64::from(value)
            };
            map.insert(converter.key("hour"), converter.integer(hour));
        }
        if let Some(ref value) = self.leftover {
            map.insert(converter.key("leftover"), converter.text(value));
        }
        if let Some(value) = self.day_of_month {
            map.insert(converter.key("mday"), converter.integer(value.into()));
        }
        if let Some(value) = self.minute_of_hour {
            map.insert(converter.key("min"), converter.integer(value.into()));
        }
        if let Some(value) = self.month_of_year {
            map.insert(converter.key("mon"), converter.integer(value.into()));
        }
        if let Some(ref name) = self.time_zone_name {
            if let Some(offset) = zone::offset_for_date_parsing(name) {
                map.insert(converter.key("offset"), converter.integer(offset.into()));
            }
            map.insert(converter.key("zone"), converter.text(name));
        }
        if let Some(value) = self.second_of_minute {
            let second = if self.leap_second { 60 } else { i64::from(value) };
            map.insert(converter.key("sec"), converter.integer(second));
        }
        if let Some(value) = self.nano_of_second {
            map.insert(
                converter.key("sec_fraction"),
                converter.second_fraction(0, value),
            );
        }
        if let Some(millis) = self.instant_millis {
            map.insert(converter.key("seconds"), converter.epoch_millis(millis));
        } else if let Some(seconds) = self.instant_seconds {
            map.insert(converter.key("seconds"), converter.integer(seconds));
        }
        if let Some(value) = self.day_of_week_sun0 {
            map.insert(converter.key("wday"), converter.integer(value.into()));
        }
        if let Some(value) = self.week_of_year_sunday {
            map.insert(converter.key("wnum0"), converter.integer(value.into()));
        }
        if let Some(value) = self.week_of_year_monday {
            map.insert(converter.key("wnum1"), converter.integer(value.into()));
        }
        if let Some(value) = self.day_of_year {
            map.insert(converter.key("yday"), converter.integer(value.into()));
        }
        if let Some(value) = self.year {
            map.insert(converter.key("year"), converter.integer(value));
        }

        map
    }

    /// Project the parsed fields into a map using the decimal string
    /// converter.
    #[must_use]
    pub fn to_hash(&self) -> BTreeMap<String, FieldValue> {
        self.to_map(&DecimalFieldConverter)
    }
}

/// Conversion hooks used by [`Parsed::to_map`].
///
/// Ruby exchanges `Rational` values for sub-second and millisecond epoch
/// entries; implementations choose their own representation for those two
/// cases, for plain integers, and for strings. The key converter allows
/// interning or typed keys.
pub trait HashConverter {
    /// Key type of the produced map.
    type Key: Ord;
    /// Value type of the produced map.
    type Value;

    /// Convert a field name.
    fn key(&self, name: &'static str) -> Self::Key;
    /// Convert an integral field value.
    fn integer(&self, value: i64) -> Self::Value;
    /// Convert a textual field value.
    fn text(&self, value: &str) -> Self::Value;
    /// Convert a sub-second value: an integral second part plus signed
    /// nanoseconds.
    fn second_fraction(&self, second: i64, nano: i64) -> Self::Value;
    /// Convert a millisecond epoch value.
    fn epoch_millis(&self, millis: i64) -> Self::Value;
}

/// Values produced by the converters shipped with this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// An integral value.
    Integer(i64),
    /// A decimal string such as `"1500000000.456"`.
    Decimal(String),
    /// A reduced numerator/denominator pair.
    Rational(i64, i64),
    /// A textual value.
    Text(String),
}

/// Converter producing decimal strings for fractional values.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalFieldConverter;

impl HashConverter for DecimalFieldConverter {
    type Key = String;
    type Value = FieldValue;

    fn key(&self, name: &'static str) -> String {
        name.to_owned()
    }

    fn integer(&self, value: i64) -> FieldValue {
        FieldValue::Integer(value)
    }

    fn text(&self, value: &str) -> FieldValue {
        FieldValue::Text(value.to_owned())
    }

    fn second_fraction(&self, second: i64, nano: i64) -> FieldValue {
        let sign = if second < 0 || nano < 0 { "-" } else { "" };
        FieldValue::Decimal(format!(
            "{sign}{}.{:09}",
            second.unsigned_abs(),
            nano.unsigned_abs()
        ))
    }

    fn epoch_millis(&self, millis: i64) -> FieldValue {
        let sign = if millis < 0 { "-" } else { "" };
        let magnitude = millis.unsigned_abs();
        FieldValue::Decimal(format!("{sign}{}.{:03}", magnitude / 1000, magnitude % 1000))
    }
}

/// Converter producing reduced `p/q` pairs for fractional values.
#[derive(Debug, Clone, Copy, Default)]
pub struct RationalFieldConverter;

impl HashConverter for RationalFieldConverter {
    type Key = String;
    type Value = FieldValue;

    fn key(&self, name: &'static str) -> String {
        name.to_owned()
    }

    fn integer(&self, value: i64) -> FieldValue {
        FieldValue::Integer(value)
    }

    fn text(&self, value: &str) -> FieldValue {
        FieldValue::Text(value.to_owned())
    }

    fn second_fraction(&self, second: i64, nano: i64) -> FieldValue {
        reduced(second * NANOS_IN_SECOND + nano, NANOS_IN_SECOND)
    }

    fn epoch_millis(&self, millis: i64) -> FieldValue {
        reduced(millis, 1000)
    }
}

/// Reduce a fraction by its greatest common divisor.
fn reduced(numerator: i64, denominator: i64) -> FieldValue {
    let divisor = gcd(numerator.unsigned_abs(), denominator.unsigned_abs()).max(1) as i64;
    FieldValue::Rational(numerator / divisor, denominator / divisor)
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Accumulates fields during a parse run; sealed into a [`Parsed`] by
/// [`build`](ParsedBuilder::build).
#[derive(Debug, Default)]
pub(crate) struct ParsedBuilder {
    century: Option<i64>,
    year: Option<i64>,
    two_digit_year: bool,
    month_of_year: Option<u8>,
    day_of_month: Option<u8>,
    day_of_year: Option<u16>,
    hour_of_day: Option<u8>,
    meridiem: Option<u8>,
    minute_of_hour: Option<u8>,
    second_of_minute: Option<u8>,
    nano_of_second: Option<i64>,
    instant_seconds: Option<i64>,
    instant_millis: Option<i64>,
    week_based_year: Option<i64>,
    two_digit_week_based_year: bool,
    week_of_week_based_year: Option<u8>,
    week_of_year_sunday: Option<u8>,
    week_of_year_monday: Option<u8>,
    day_of_week_mon1: Option<u8>,
    day_of_week_sun0: Option<u8>,
    time_zone_name: Option<String>,
}

impl ParsedBuilder {
    pub(crate) fn set_century(&mut self, value: i64) {
        self.century = Some(value);
    }

    pub(crate) fn set_year(&mut self, value: i64) {
        self.year = Some(value);
        self.two_digit_year = false;
    }

    pub(crate) fn set_two_digit_year(&mut self, value: i64) {
        self.year = Some(value);
        self.two_digit_year = true;
    }

    pub(crate) fn set_month_of_year(&mut self, value: u8) {
        self.month_of_year = Some(value);
    }

    pub(crate) fn set_day_of_month(&mut self, value: u8) {
        self.day_of_month = Some(value);
    }

    pub(crate) fn set_day_of_year(&mut self, value: u16) {
        self.day_of_year = Some(value);
    }

    pub(crate) fn set_hour_of_day(&mut self, value: u8) {
        self.hour_of_day = Some(value);
    }

    /// Record a meridian indicator as an hour offset (0 for AM, 12 for PM).
    pub(crate) fn set_meridiem(&mut self, value: u8) {
        self.meridiem = Some(value);
    }

    pub(crate) fn set_minute_of_hour(&mut self, value: u8) {
        self.minute_of_hour = Some(value);
    }

    pub(crate) fn set_second_of_minute(&mut self, value: u8) {
        self.second_of_minute = Some(value);
    }

    pub(crate) fn set_nano_of_second(&mut self, value: i64) {
        self.nano_of_second = Some(value);
    }

    /// `%s` stores seconds and clears any millisecond epoch, so the later of
    /// `%s` and `%Q` decides the resolved instant.
    pub(crate) fn set_instant_seconds(&mut self, value: i64) {
        self.instant_seconds = Some(value);
        self.instant_millis = None;
    }

    /// `%Q` stores milliseconds and the floored second value.
    pub(crate) fn set_instant_millis(&mut self, value: i64) {
        self.instant_millis = Some(value);
        self.instant_seconds = Some(value.div_euclid(1000));
    }

    pub(crate) fn set_week_based_year(&mut self, value: i64) {
        self.week_based_year = Some(value);
        self.two_digit_week_based_year = false;
    }

    pub(crate) fn set_two_digit_week_based_year(&mut self, value: i64) {
        self.week_based_year = Some(value);
        self.two_digit_week_based_year = true;
    }

    pub(crate) fn set_week_of_week_based_year(&mut self, value: u8) {
        self.week_of_week_based_year = Some(value);
    }

    pub(crate) fn set_week_of_year_sunday(&mut self, value: u8) {
        self.week_of_year_sunday = Some(value);
    }

    pub(crate) fn set_week_of_year_monday(&mut self, value: u8) {
        self.week_of_year_monday = Some(value);
    }

    pub(crate) fn set_day_of_week_mon1(&mut self, value: u8) {
        self.day_of_week_mon1 = Some(value);
    }

    pub(crate) fn set_day_of_week_sun0(&mut self, value: u8) {
        self.day_of_week_sun0 = Some(value);
    }

    pub(crate) fn set_time_zone_name(&mut self, value: String) {
        self.time_zone_name = Some(value);
    }

    /// Seal the builder, applying the merge rules.
    pub(crate) fn build(self, leftover: Option<String>) -> Parsed {
        let mut hour_of_day = self.hour_of_day;
        if let (Some(hour), Some(meridiem)) = (hour_of_day, self.meridiem) {
            hour_of_day = Some(hour % 12 + meridiem);
        }

        let mut second_of_minute = self.second_of_minute;
        let mut leap_second = false;
        if second_of_minute == Some(60) {
            second_of_minute = Some(59);
            leap_second = true;
        }

        let mut excess_days = None;
        if hour_of_day == Some(24) {
            hour_of_day = Some(0);
            excess_days = Some(1);
        }

        let year = match (self.century, self.year) {
            (Some(century), year) => {
                Some(century.saturating_mul(100).saturating_add(year.unwrap_or(0)))
            }
            (None, Some(year)) if self.two_digit_year => {
                Some(year + if year >= 69 { 1900 } else { 2000 })
            }
            (None, year) => year,
        };

        let week_based_year = match (self.century, self.week_based_year) {
            (Some(century), Some(year)) => Some(century.saturating_mul(100).saturating_add(year)),
            (None, Some(year)) if self.two_digit_week_based_year => {
                Some(year + if year >= 69 { 1900 } else { 2000 })
            }
            (_, year) => year,
        };

        Parsed {
            year,
            month_of_year: self.month_of_year,
            day_of_month: self.day_of_month,
            day_of_year: self.day_of_year,
            hour_of_day,
            minute_of_hour: self.minute_of_hour,
            second_of_minute,
            nano_of_second: self.nano_of_second,
            instant_seconds: self.instant_seconds,
            instant_millis: self.instant_millis,
            week_based_year,
            week_of_week_based_year: self.week_of_week_based_year,
            week_of_year_sunday: self.week_of_year_sunday,
            week_of_year_monday: self.week_of_year_monday,
            day_of_week_mon1: self.day_of_week_mon1,
            day_of_week_sun0: self.day_of_week_sun0,
            time_zone_name: self.time_zone_name,
            leftover,
            leap_second,
            excess_days,
        }
    }
}
