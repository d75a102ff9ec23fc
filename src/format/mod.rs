//! Module containing the formatting logic.

mod check;
mod week;
pub(crate) mod write;

use core::fmt;

use crate::token::{Conversion, Directive, Flags, Padding, Token, MONTH_NAMES, WEEKDAYS};
use crate::{FormatError, Time};
use week::{iso_8601_year_and_week_number, week_number, WeekStart};
use write::{SizeLimiter, Write};

/// Rendering style for the `%Z` directive.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum ZoneNameStyle {
    /// Emit `"UTC"` for a zero offset and nothing otherwise, like
    /// `Time#strftime` for a zone-less time.
    #[default]
    None,
    /// Emit the abbreviation reported by the time implementation, falling
    /// back to `"UTC"` for a zero offset.
    Short,
}

/// A UTC offset split for the `%z` family.
struct OffsetParts {
    negative: bool,
    hours: u32,
    minutes: u32,
    seconds: u32,
}

impl Directive {
    /// Write a number, right-aligned unless the left-align flag is set.
    ///
    /// `default_padding` is the fill the directive uses when the pattern
    /// did not pick one.
    fn put_number(
        &self,
        f: &mut SizeLimiter<'_>,
        value: impl fmt::Display,
        default_width: usize,
        default_padding: Padding,
    ) -> Result<(), FormatError> {
        if self.flags.contains(Flags::LEFT_ALIGN) {
            return write!(f, "{value}");
        }
        let width = self.width.unwrap_or(default_width);
        let padding = match self.padding {
            Padding::Default => default_padding,
            chosen => chosen,
        };
        if padding == Padding::Zero {
            write!(f, "{value:0width$}")
        } else {
            write!(f, "{value: >width$}")
        }
    }

    /// Write text, right-aligned to the requested width if any.
    fn put_text(&self, f: &mut SizeLimiter<'_>, text: &str) -> Result<(), FormatError> {
        match self.width {
            Some(width) if !self.flags.contains(Flags::LEFT_ALIGN) => {
                if self.padding == Padding::Zero {
                    write!(f, "{text:0>width$}")
                } else {
                    write!(f, "{text: >width$}")
                }
            }
            _ => write!(f, "{text}"),
        }
    }

    /// Write sub-second digits at the requested precision.
    ///
    /// Fewer than nine digits truncates; more than nine appends zeros.
    fn put_fraction(
        &self,
        f: &mut SizeLimiter<'_>,
        nanoseconds: u32,
        default_digits: usize,
    ) -> Result<(), FormatError> {
        let digits = self.width.unwrap_or(default_digits);
        if digits > 9 {
            return write!(f, "{nanoseconds:09}{:0>rest$}", "", rest = digits - 9);
        }
        let mut value = nanoseconds;
        for _ in digits..9 {
            value /= 10;
        }
        write!(f, "{value:0digits$}")
    }

    /// Pad up to the requested width before writing `content_width` bytes
    /// of output.
    fn put_lead_padding(
        &self,
        f: &mut SizeLimiter<'_>,
        content_width: usize,
    ) -> Result<(), FormatError> {
        let Some(width) = self.width else {
            return Ok(());
        };
        let pad = width.saturating_sub(content_width);
        if self.padding == Padding::Zero {
            write!(f, "{:0>pad$}", "")
        } else {
            write!(f, "{: >pad$}", "")
        }
    }

    /// Split the offset of `time` into sign, hours, minutes and seconds.
    fn offset_parts(&self, time: &impl Time) -> OffsetParts {
        let offset = time.utc_offset();
        // A UTC time renders as "-00:00" when the left-align flag is given.
        let negative = offset < 0 || time.is_utc() && self.flags.contains(Flags::LEFT_ALIGN);
        let magnitude = offset.unsigned_abs();
        OffsetParts {
            negative,
            hours: magnitude / 3600,
            minutes: magnitude / 60 % 60,
            seconds: magnitude % 60,
        }
    }

    /// Write the sign-and-hours part of an offset.
    ///
    /// Any width beyond `base_width`, the natural width of the chosen
    /// shape, widens this part only; minutes and seconds stay two digits.
    fn put_offset_lead(
        &self,
        f: &mut SizeLimiter<'_>,
        parts: &OffsetParts,
        base_width: usize,
    ) -> Result<(), FormatError> {
        let lead_width = match self.width {
            Some(width) => width.saturating_sub(base_width) + "+hh".len(),
            None => "+hh".len(),
        };
        let sign = if parts.negative { '-' } else { '+' };
        let pad = lead_width.saturating_sub(signed_width(i64::from(parts.hours)) + 1);
        let hours = parts.hours;
        if self.padding == Padding::Space {
            write!(f, "{: >pad$}{sign}{hours}", "")
        } else {
            write!(f, "{sign}{:0>pad$}{hours}", "")
        }
    }
}

/// Renders a token sequence against a time implementation.
pub(crate) struct TimeFormatter<'a, T> {
    /// Time implementation
    time: &'a T,
    /// Compiled token sequence
    tokens: &'a [Token],
    /// Maximum formatted size
    size_limit: usize,
    /// `%Z` rendering style
    zone_style: ZoneNameStyle,
}

impl<'a, T: Time> TimeFormatter<'a, T> {
    /// Construct a new `TimeFormatter` wrapper.
    pub(crate) fn new(
        time: &'a T,
        tokens: &'a [Token],
        size_limit: usize,
        zone_style: ZoneNameStyle,
    ) -> Self {
        Self {
            time,
            tokens,
            size_limit,
            zone_style,
        }
    }

    /// Render the token sequence, bounded by the size limit.
    pub(crate) fn fmt(&self, buf: &mut dyn Write) -> Result<(), FormatError> {
        let mut f = SizeLimiter::new(buf, self.size_limit);
        for token in self.tokens {
            match token {
                Token::Literal(text) => f.write_all(text.as_bytes())?,
                Token::Directive(directive) => self.directive(&mut f, directive)?,
            }
        }
        Ok(())
    }

    /// Render one directive.
    #[allow(clippy::too_many_lines)]
    fn directive(&self, f: &mut SizeLimiter<'_>, d: &Directive) -> Result<(), FormatError> {
        let time = self.time;

        // E/O-modified directives only have meaning when parsing; emit the
        // token as written.
        if d.posix_ext {
            return f.write_all(d.lexeme.as_bytes());
        }

        match d.conversion {
            // Escapes
            Conversion::Percent => d.put_text(f, "%"),
            Conversion::Newline => d.put_text(f, "\n"),
            Conversion::Tab => d.put_text(f, "\t"),

            // Date fields
            Conversion::Year => {
                let year = time.year();
                d.put_number(f, year, if year < 0 { 5 } else { 4 }, Padding::Zero)
            }
            Conversion::Century => {
                d.put_number(f, time.year().div_euclid(100), 2, Padding::Zero)
            }
            Conversion::YearOfCentury => {
                d.put_number(f, time.year().rem_euclid(100), 2, Padding::Zero)
            }
            Conversion::Month => d.put_number(f, check::month(time)?, 2, Padding::Zero),
            Conversion::MonthName => {
                let (name, upper) = MONTH_NAMES[usize::from(check::month(time)?) - 1];
                d.put_text(f, if d.flags.forces_upper() { upper } else { name })
            }
            Conversion::MonthNameShort => {
                let (name, upper) = MONTH_NAMES[usize::from(check::month(time)?) - 1];
                d.put_text(f, &(if d.flags.forces_upper() { upper } else { name })[..3])
            }
            Conversion::DayOfMonth => d.put_number(f, check::day(time)?, 2, Padding::Zero),
            Conversion::DayOfMonthBlank => d.put_number(f, check::day(time)?, 2, Padding::Space),
            Conversion::DayOfYear => d.put_number(f, check::day_of_year(time)?, 3, Padding::Zero),

            // Time fields
            Conversion::Hour => d.put_number(f, check::hour(time)?, 2, Padding::Zero),
            Conversion::HourBlank => d.put_number(f, check::hour(time)?, 2, Padding::Space),
            Conversion::Hour12 => {
                d.put_number(f, clock_hour(check::hour(time)?), 2, Padding::Zero)
            }
            Conversion::Hour12Blank => {
                d.put_number(f, clock_hour(check::hour(time)?), 2, Padding::Space)
            }
            Conversion::MeridiemLower => {
                let afternoon = check::hour(time)? >= 12;
                d.put_text(
                    f,
                    match (afternoon, d.flags.forces_upper()) {
                        (false, false) => "am",
                        (true, false) => "pm",
                        (false, true) => "AM",
                        (true, true) => "PM",
                    },
                )
            }
            Conversion::MeridiemUpper => {
                let afternoon = check::hour(time)? >= 12;
                d.put_text(
                    f,
                    match (afternoon, d.flags.contains(Flags::SWAP_CASE)) {
                        (false, false) => "AM",
                        (true, false) => "PM",
                        (false, true) => "am",
                        (true, true) => "pm",
                    },
                )
            }
            Conversion::Minute => d.put_number(f, check::minute(time)?, 2, Padding::Zero),
            Conversion::Second => d.put_number(f, check::second(time)?, 2, Padding::Zero),
            Conversion::Millis => d.put_fraction(f, check::nanoseconds(time)?, 3),
            Conversion::Nanos => d.put_fraction(f, check::nanoseconds(time)?, 9),

            // Zone
            Conversion::OffsetBasic => {
                let parts = d.offset_parts(time);
                d.put_offset_lead(f, &parts, "+hhmm".len())?;
                write!(f, "{:02}", parts.minutes)
            }
            Conversion::OffsetExtended => {
                let parts = d.offset_parts(time);
                d.put_offset_lead(f, &parts, "+hh:mm".len())?;
                write!(f, ":{:02}", parts.minutes)
            }
            Conversion::OffsetExtendedSeconds => {
                let parts = d.offset_parts(time);
                d.put_offset_lead(f, &parts, "+hh:mm:ss".len())?;
                write!(f, ":{:02}:{:02}", parts.minutes, parts.seconds)
            }
            Conversion::OffsetShortest => {
                let parts = d.offset_parts(time);
                if parts.seconds != 0 {
                    d.put_offset_lead(f, &parts, "+hh:mm:ss".len())?;
                    write!(f, ":{:02}:{:02}", parts.minutes, parts.seconds)
                } else if parts.minutes != 0 {
                    d.put_offset_lead(f, &parts, "+hh:mm".len())?;
                    write!(f, ":{:02}", parts.minutes)
                } else {
                    d.put_offset_lead(f, &parts, "+hh".len())
                }
            }
            Conversion::ZoneName => {
                let name = match self.zone_style {
                    ZoneNameStyle::None => {
                        if time.utc_offset() == 0 {
                            "UTC"
                        } else {
                            ""
                        }
                    }
                    ZoneNameStyle::Short => {
                        let name = check::time_zone(time)?;
                        if name.is_empty() && time.utc_offset() == 0 {
                            "UTC"
                        } else {
                            name
                        }
                    }
                };
                if name.is_empty() {
                    return Ok(());
                }
                if !d.flags.contains(Flags::LEFT_ALIGN) {
                    d.put_lead_padding(f, name.len())?;
                }
                if d.flags.contains(Flags::SWAP_CASE) {
                    f.write_all(name.to_ascii_lowercase().as_bytes())
                } else if d.flags.contains(Flags::UPPER) {
                    f.write_all(name.to_ascii_uppercase().as_bytes())
                } else {
                    f.write_all(name.as_bytes())
                }
            }

            // Weekday
            Conversion::WeekdayName => {
                let (name, upper) = WEEKDAYS[usize::from(check::day_of_week(time)?)];
                d.put_text(f, if d.flags.forces_upper() { upper } else { name })
            }
            Conversion::WeekdayNameShort => {
                let (name, upper) = WEEKDAYS[usize::from(check::day_of_week(time)?)];
                d.put_text(f, &(if d.flags.forces_upper() { upper } else { name })[..3])
            }
            Conversion::WeekdayMon1 => {
                let day = check::day_of_week(time)?;
                d.put_number(f, if day == 0 { 7 } else { day }, 1, Padding::Zero)
            }
            Conversion::WeekdaySun0 => {
                d.put_number(f, check::day_of_week(time)?, 1, Padding::Zero)
            }

            // ISO week dating
            Conversion::IsoWeekYear => {
                let (year, _) = iso_8601_year_and_week_number(
                    time.year().into(),
                    check::day_of_week(time)?.into(),
                    check::day_of_year(time)?.into(),
                );
                d.put_number(f, year, if year < 0 { 5 } else { 4 }, Padding::Zero)
            }
            Conversion::IsoWeekYearOfCentury => {
                let (year, _) = iso_8601_year_and_week_number(
                    time.year().into(),
                    check::day_of_week(time)?.into(),
                    check::day_of_year(time)?.into(),
                );
                d.put_number(f, year.rem_euclid(100), 2, Padding::Zero)
            }
            Conversion::IsoWeek => {
                let (_, week) = iso_8601_year_and_week_number(
                    time.year().into(),
                    check::day_of_week(time)?.into(),
                    check::day_of_year(time)?.into(),
                );
                d.put_number(f, week, 2, Padding::Zero)
            }
            Conversion::WeekSunday => {
                let week = week_number(
                    check::day_of_week(time)?.into(),
                    check::day_of_year(time)?.into(),
                    WeekStart::Sunday,
                );
                d.put_number(f, week, 2, Padding::Zero)
            }
            Conversion::WeekMonday => {
                let week = week_number(
                    check::day_of_week(time)?.into(),
                    check::day_of_year(time)?.into(),
                    WeekStart::Monday,
                );
                d.put_number(f, week, 2, Padding::Zero)
            }

            // Epoch
            Conversion::EpochSeconds => d.put_number(f, time.to_int(), 1, Padding::Zero),
            // `%Q` and `%+` parse but do not format.
            Conversion::EpochMillis | Conversion::DateAndTimeWithZone => {
                f.write_all(d.lexeme.as_bytes())
            }

            // Composites. Width and padding apply to the whole rendering;
            // the upper-case flag switches the names.
            Conversion::DateAndTime => {
                let year = time.year();
                let year_digits = signed_width(year.into()).max(if year < 0 { 5 } else { 4 });
                d.put_lead_padding(f, "Www Mmm dd hh:mm:ss ".len() + year_digits)?;

                let upper = d.flags.contains(Flags::UPPER);
                let (weekday, weekday_upper) = WEEKDAYS[usize::from(check::day_of_week(time)?)];
                let (month, month_upper) = MONTH_NAMES[usize::from(check::month(time)?) - 1];
                let weekday = &(if upper { weekday_upper } else { weekday })[..3];
                let month = &(if upper { month_upper } else { month })[..3];

                write!(f, "{weekday} {month} {: >2} ", check::day(time)?)?;
                write!(
                    f,
                    "{:02}:{:02}:{:02} ",
                    check::hour(time)?,
                    check::minute(time)?,
                    check::second(time)?
                )?;
                write!(f, "{year:0year_digits$}")
            }
            Conversion::MonthDayYear => {
                d.put_lead_padding(f, "mm/dd/yy".len())?;
                write!(
                    f,
                    "{:02}/{:02}/{:02}",
                    check::month(time)?,
                    check::day(time)?,
                    time.year().rem_euclid(100)
                )
            }
            Conversion::IsoDate => {
                let year = time.year();
                let year_digits = signed_width(year.into()).max(if year < 0 { 5 } else { 4 });
                d.put_lead_padding(f, year_digits + "-mm-dd".len())?;
                write!(
                    f,
                    "{year:0year_digits$}-{:02}-{:02}",
                    check::month(time)?,
                    check::day(time)?
                )
            }
            Conversion::VmsDate => {
                let year = time.year();
                d.put_lead_padding(f, "dd-mmm-".len() + signed_width(year.into()).max(4))?;

                let (month, month_upper) = MONTH_NAMES[usize::from(check::month(time)?) - 1];
                let month = &(if d.flags.forces_upper() { month_upper } else { month })[..3];
                write!(f, "{: >2}-{month}-{year:04}", check::day(time)?)
            }
            Conversion::Clock12 => {
                d.put_lead_padding(f, "hh:mm:ss PM".len())?;
                let hour = check::hour(time)?;
                write!(
                    f,
                    "{:02}:{:02}:{:02} {}",
                    clock_hour(hour),
                    check::minute(time)?,
                    check::second(time)?,
                    if hour < 12 { "AM" } else { "PM" }
                )
            }
            Conversion::HourMinute => {
                d.put_lead_padding(f, "hh:mm".len())?;
                write!(f, "{:02}:{:02}", check::hour(time)?, check::minute(time)?)
            }
            Conversion::Clock24 => {
                d.put_lead_padding(f, "hh:mm:ss".len())?;
                write!(
                    f,
                    "{:02}:{:02}:{:02}",
                    check::hour(time)?,
                    check::minute(time)?,
                    check::second(time)?
                )
            }
        }
    }
}

/// Hour on the 12-hour clock for an hour of the day.
fn clock_hour(hour: u8) -> u8 {
    match hour % 12 {
        0 => 12,
        hour => hour,
    }
}

/// Number of characters in the decimal rendering of a signed value.
fn signed_width(value: i64) -> usize {
    let digits = match value.unsigned_abs().checked_ilog10() {
        Some(log) => log as usize + 1,
        None => 1,
    };
    digits + usize::from(value < 0)
}
