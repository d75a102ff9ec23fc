//! Compiled pattern tokens, shared by the parser and the formatter.

use bitflags::bitflags;

use crate::assert::matching_case_pairs;

/// Weekday names paired with their upper-case forms, Sunday first.
pub(crate) const WEEKDAYS: [(&str, &str); 7] = [
    ("Sunday", "SUNDAY"),
    ("Monday", "MONDAY"),
    ("Tuesday", "TUESDAY"),
    ("Wednesday", "WEDNESDAY"),
    ("Thursday", "THURSDAY"),
    ("Friday", "FRIDAY"),
    ("Saturday", "SATURDAY"),
];

/// Month names paired with their upper-case forms.
pub(crate) const MONTH_NAMES: [(&str, &str); 12] = [
    ("January", "JANUARY"),
    ("February", "FEBRUARY"),
    ("March", "MARCH"),
    ("April", "APRIL"),
    ("May", "MAY"),
    ("June", "JUNE"),
    ("July", "JULY"),
    ("August", "AUGUST"),
    ("September", "SEPTEMBER"),
    ("October", "OCTOBER"),
    ("November", "NOVEMBER"),
    ("December", "DECEMBER"),
];

const _: () = {
    matching_case_pairs(&WEEKDAYS);
    matching_case_pairs(&MONTH_NAMES);
};

bitflags! {
    /// Option flags of a directive. Formatting-only; the parser ignores
    /// them.
    pub(crate) struct Flags: u8 {
        /// `-`: emit the bare value, with no padding at all.
        const LEFT_ALIGN = 1;
        /// `^`: upper-case textual output.
        const UPPER      = 1 << 1;
        /// `#`: swap the case of textual output.
        const SWAP_CASE  = 1 << 2;
    }
}

impl Flags {
    /// True when either case flag asks for upper-case names.
    pub(crate) fn forces_upper(self) -> bool {
        self.intersects(Flags::UPPER | Flags::SWAP_CASE)
    }
}

/// Padding requested by the option prefix.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Padding {
    /// No padding flag given; each directive brings its own default.
    Default,
    /// `_`: pad with spaces.
    Space,
    /// `0`: pad with zeros.
    Zero,
}

/// Conversion specifier of a directive.
///
/// One variant per distinct behavior; aliases (`%h`, `%x`, `%X`) share the
/// variant of their canonical character.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Conversion {
    /// `%Y`: year including the century, possibly signed.
    Year,
    /// `%C`: year divided by 100, floored.
    Century,
    /// `%y`: year modulo 100; parsing infers the century at the 69 boundary.
    YearOfCentury,
    /// `%m`: month of the year, `1..=12`.
    Month,
    /// `%B`: full month name.
    MonthName,
    /// `%b` and `%h`: three-letter month name.
    MonthNameShort,
    /// `%d`: day of the month, `1..=31`.
    DayOfMonth,
    /// `%e`: day of the month, blank-padded.
    DayOfMonthBlank,
    /// `%j`: day of the year.
    DayOfYear,
    /// `%H`: hour of the 24-hour clock.
    Hour,
    /// `%k`: hour of the 24-hour clock, blank-padded.
    HourBlank,
    /// `%I`: hour of the 12-hour clock, `1..=12`.
    Hour12,
    /// `%l`: hour of the 12-hour clock, blank-padded.
    Hour12Blank,
    /// `%P`: `am`/`pm`.
    MeridiemLower,
    /// `%p`: `AM`/`PM`.
    MeridiemUpper,
    /// `%M`: minute of the hour.
    Minute,
    /// `%S`: second of the minute, `0..=60` to admit leap seconds.
    Second,
    /// `%L`: fractional seconds, three digits by default.
    Millis,
    /// `%N`: fractional seconds, nine digits by default.
    Nanos,
    /// `%z`: UTC offset, `+hhmm`.
    OffsetBasic,
    /// `%:z`: UTC offset, `+hh:mm`.
    OffsetExtended,
    /// `%::z`: UTC offset, `+hh:mm:ss`.
    OffsetExtendedSeconds,
    /// `%:::z`: UTC offset in the shortest exact shape.
    OffsetShortest,
    /// `%Z`: zone name.
    ZoneName,
    /// `%A`: full weekday name.
    WeekdayName,
    /// `%a`: three-letter weekday name.
    WeekdayNameShort,
    /// `%u`: weekday number, Monday is 1.
    WeekdayMon1,
    /// `%w`: weekday number, Sunday is 0.
    WeekdaySun0,
    /// `%G`: ISO 8601 week-based year.
    IsoWeekYear,
    /// `%g`: ISO 8601 week-based year modulo 100.
    IsoWeekYearOfCentury,
    /// `%V`: ISO 8601 week number, `1..=53`.
    IsoWeek,
    /// `%U`: week number counting from the first Sunday.
    WeekSunday,
    /// `%W`: week number counting from the first Monday.
    WeekMonday,
    /// `%s`: seconds since the epoch.
    EpochSeconds,
    /// `%Q`: milliseconds since the epoch. Parse-only; formats verbatim.
    EpochMillis,
    /// `%n`: newline.
    Newline,
    /// `%t`: tab.
    Tab,
    /// `%%`: a literal percent sign.
    Percent,
    /// `%c`: `%a %b %e %H:%M:%S %Y`.
    DateAndTime,
    /// `%D` and `%x`: `%m/%d/%y`.
    MonthDayYear,
    /// `%F`: `%Y-%m-%d`.
    IsoDate,
    /// `%v`: `%e-%b-%Y`.
    VmsDate,
    /// `%r`: `%I:%M:%S %p`.
    Clock12,
    /// `%R`: `%H:%M`.
    HourMinute,
    /// `%T` and `%X`: `%H:%M:%S`.
    Clock24,
    /// `%+`: `%a %b %e %H:%M:%S %Z %Y`. Parse-only; formats verbatim.
    DateAndTimeWithZone,
}

impl Conversion {
    /// Map a conversion character to its specifier.
    pub(crate) fn of(byte: u8) -> Option<Self> {
        Some(match byte {
            b'Y' => Conversion::Year,
            b'C' => Conversion::Century,
            b'y' => Conversion::YearOfCentury,
            b'm' => Conversion::Month,
            b'B' => Conversion::MonthName,
            b'b' | b'h' => Conversion::MonthNameShort,
            b'd' => Conversion::DayOfMonth,
            b'e' => Conversion::DayOfMonthBlank,
            b'j' => Conversion::DayOfYear,
            b'H' => Conversion::Hour,
            b'k' => Conversion::HourBlank,
            b'I' => Conversion::Hour12,
            b'l' => Conversion::Hour12Blank,
            b'P' => Conversion::MeridiemLower,
            b'p' => Conversion::MeridiemUpper,
            b'M' => Conversion::Minute,
            b'S' => Conversion::Second,
            b'L' => Conversion::Millis,
            b'N' => Conversion::Nanos,
            b'z' => Conversion::OffsetBasic,
            b'Z' => Conversion::ZoneName,
            b'A' => Conversion::WeekdayName,
            b'a' => Conversion::WeekdayNameShort,
            b'u' => Conversion::WeekdayMon1,
            b'w' => Conversion::WeekdaySun0,
            b'G' => Conversion::IsoWeekYear,
            b'g' => Conversion::IsoWeekYearOfCentury,
            b'V' => Conversion::IsoWeek,
            b'U' => Conversion::WeekSunday,
            b'W' => Conversion::WeekMonday,
            b's' => Conversion::EpochSeconds,
            b'Q' => Conversion::EpochMillis,
            b'n' => Conversion::Newline,
            b't' => Conversion::Tab,
            b'%' => Conversion::Percent,
            b'c' => Conversion::DateAndTime,
            b'D' | b'x' => Conversion::MonthDayYear,
            b'F' => Conversion::IsoDate,
            b'v' => Conversion::VmsDate,
            b'r' => Conversion::Clock12,
            b'R' => Conversion::HourMinute,
            b'T' | b'X' => Conversion::Clock24,
            b'+' => Conversion::DateAndTimeWithZone,
            _ => return None,
        })
    }

    /// Check if the directive consumes a run of digits when parsing.
    ///
    /// Composites whose expansion starts with digits count as numeric,
    /// since they bound the greedy width of whatever precedes them; `%c`
    /// and `%+` start with a weekday name and do not.
    pub(crate) fn is_numeric(self) -> bool {
        !matches!(
            self,
            Conversion::MonthName
                | Conversion::MonthNameShort
                | Conversion::MeridiemLower
                | Conversion::MeridiemUpper
                | Conversion::OffsetBasic
                | Conversion::OffsetExtended
                | Conversion::OffsetExtendedSeconds
                | Conversion::OffsetShortest
                | Conversion::ZoneName
                | Conversion::WeekdayName
                | Conversion::WeekdayNameShort
                | Conversion::Newline
                | Conversion::Tab
                | Conversion::Percent
                | Conversion::DateAndTime
                | Conversion::DateAndTimeWithZone
        )
    }

    /// Expansion template of a composite directive.
    pub(crate) fn template(self) -> Option<&'static str> {
        match self {
            Conversion::DateAndTime => Some("%a %b %e %H:%M:%S %Y"),
            Conversion::MonthDayYear => Some("%m/%d/%y"),
            Conversion::IsoDate => Some("%Y-%m-%d"),
            Conversion::VmsDate => Some("%e-%b-%Y"),
            Conversion::Clock12 => Some("%I:%M:%S %p"),
            Conversion::HourMinute => Some("%H:%M"),
            Conversion::Clock24 => Some("%H:%M:%S"),
            Conversion::DateAndTimeWithZone => Some("%a %b %e %H:%M:%S %Z %Y"),
            _ => None,
        }
    }
}

/// A directive with its compiled options.
#[derive(Debug, Clone)]
pub(crate) struct Directive {
    pub(crate) conversion: Conversion,
    pub(crate) width: Option<usize>,
    pub(crate) padding: Padding,
    pub(crate) flags: Flags,
    /// An `E`/`O` modifier was present; such tokens format verbatim.
    pub(crate) posix_ext: bool,
    /// Source text of the directive, for verbatim emission.
    pub(crate) lexeme: String,
}

/// One element of a compiled pattern.
#[derive(Debug, Clone)]
pub(crate) enum Token {
    /// Verbatim text; whitespace in it matches any whitespace run when
    /// parsing.
    Literal(String),
    /// A `%` directive.
    Directive(Directive),
}

impl Token {
    /// Check if the token bounds the greedy width of a preceding numeric
    /// directive.
    pub(crate) fn starts_with_digits(&self) -> bool {
        match self {
            Token::Literal(text) => text.as_bytes().first().is_some_and(u8::is_ascii_digit),
            Token::Directive(directive) => directive.conversion.is_numeric(),
        }
    }
}
