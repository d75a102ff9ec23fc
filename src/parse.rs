//! Parsing input text against a compiled token sequence.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::compile::Format;
use crate::parsed::{Parsed, ParsedBuilder};
use crate::token::{Conversion, Directive, Token, MONTH_NAMES, WEEKDAYS};
use crate::ParseError;

/// Digit budget for directives that read greedily.
const MAX_DIGITS: usize = usize::MAX;

/// Pattern for `%z` and `%Z` values: numeric offsets with an optional
/// `GMT`/`UT`/`UTC` prefix, descriptive `... Standard/Daylight Time` names,
/// and plain abbreviations with an optional `DST` marker.
static ZONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:(?:gmt|utc?)?[-+]\d+(?:[,.:]\d+(?::\d+)?)?|[a-z.\s]+(?:standard|daylight)\s+time\b|[a-z]+(?:\s+dst)?\b)",
    )
    .expect("zone pattern should be a valid regex")
});

/// Meridian spellings, longest first, with their hour offsets.
const MERIDIANS: [(&str, u8); 4] = [("a.m.", 0), ("p.m.", 12), ("am", 0), ("pm", 12)];

/// Drives a token sequence over an input string, populating a field bag.
///
/// The cursor is a single byte position; tokens are applied strictly left to
/// right and the parser never backtracks across a token boundary.
pub(crate) struct TimeParser<'i> {
    input: &'i str,
    pos: usize,
    builder: ParsedBuilder,
}

impl<'i> TimeParser<'i> {
    /// Construct a new `TimeParser` over an input string.
    pub(crate) fn new(input: &'i str) -> Self {
        Self {
            input,
            pos: 0,
            builder: ParsedBuilder::default(),
        }
    }

    /// Run the token sequence and seal the field bag.
    ///
    /// Input remaining after the last token is kept as `leftover`, not an
    /// error.
    pub(crate) fn parse(mut self, tokens: &[Token]) -> Result<Parsed, ParseError> {
        self.run(tokens)?;
        let leftover = if self.pos < self.input.len() {
            Some(self.input[self.pos..].to_owned())
        } else {
            None
        };
        Ok(self.builder.build(leftover))
    }

    fn run(&mut self, tokens: &[Token]) -> Result<(), ParseError> {
        for (index, token) in tokens.iter().enumerate() {
            match token {
                Token::Literal(text) => self.match_literal(text)?,
                Token::Directive(directive) => {
                    let numeric_follows = tokens
                        .get(index + 1)
                        .is_some_and(Token::starts_with_digits);
                    self.directive(directive, numeric_follows)?;
                }
            }
        }
        Ok(())
    }

    /// Apply one directive.
    ///
    /// `numeric_follows` reports whether the next token starts with digits;
    /// greedy directives cap their digit budget in that case so the neighbor
    /// still has something to read.
    fn directive(&mut self, directive: &Directive, numeric_follows: bool) -> Result<(), ParseError> {
        // Composite directives parse as their textual expansion. The
        // expansion is a private token sequence, so a greedy final directive
        // is bounded by the end of the expansion, not by the outer neighbors.
        if let Some(template) = directive.conversion.template() {
            let expansion = Format::compile(template);
            return self.run(&expansion.tokens);
        }

        match directive.conversion {
            Conversion::Year => {
                let max = if numeric_follows { 4 } else { MAX_DIGITS };
                let year = self.parse_signed(max)?;
                self.builder.set_year(year);
            }
            Conversion::Century => {
                let max = if numeric_follows { 2 } else { MAX_DIGITS };
                let century = self.parse_digits(max)?;
                self.builder.set_century(century);
            }
            Conversion::YearOfCentury => {
                let year = self.parse_bounded(2, 0, 99, "two-digit year")?;
                self.builder.set_two_digit_year(year);
            }
            Conversion::Month => {
                let month = self.parse_bounded(2, 1, 12, "month of the year")?;
                self.builder.set_month_of_year(month as u8);
            }
            Conversion::MonthName | Conversion::MonthNameShort => self.parse_month_name()?,
            Conversion::DayOfMonth => {
                let day = self.parse_bounded(2, 1, 31, "day of the month")?;
                self.builder.set_day_of_month(day as u8);
            }
            Conversion::DayOfMonthBlank => {
                let day = self.parse_spaced(1, 31, "day of the month")?;
                self.builder.set_day_of_month(day as u8);
            }
            Conversion::DayOfYear => {
                let day = self.parse_bounded(3, 1, 365, "day of the year")?;
                self.builder.set_day_of_year(day as u16);
            }
            Conversion::Hour => {
                let hour = self.parse_bounded(2, 0, 24, "hour of the day")?;
                self.builder.set_hour_of_day(hour as u8);
            }
            Conversion::HourBlank => {
                let hour = self.parse_spaced(0, 24, "hour of the day")?;
                self.builder.set_hour_of_day(hour as u8);
            }
            Conversion::Hour12 => {
                let hour = self.parse_bounded(2, 1, 12, "clock hour")?;
                self.builder.set_hour_of_day(hour as u8);
            }
            Conversion::Hour12Blank => {
                let hour = self.parse_spaced(1, 12, "clock hour")?;
                self.builder.set_hour_of_day(hour as u8);
            }
            Conversion::MeridiemLower | Conversion::MeridiemUpper => self.parse_meridiem()?,
            Conversion::Minute => {
                let minute = self.parse_bounded(2, 0, 59, "minute of the hour")?;
                self.builder.set_minute_of_hour(minute as u8);
            }
            Conversion::Second => {
                let second = self.parse_bounded(2, 0, 60, "second of the minute")?;
                self.builder.set_second_of_minute(second as u8);
            }
            Conversion::Millis => {
                let nanos = self.parse_fraction(3, numeric_follows)?;
                self.builder.set_nano_of_second(nanos);
            }
            Conversion::Nanos => {
                let nanos = self.parse_fraction(9, numeric_follows)?;
                self.builder.set_nano_of_second(nanos);
            }
            Conversion::OffsetBasic
            | Conversion::OffsetExtended
            | Conversion::OffsetExtendedSeconds
            | Conversion::OffsetShortest
            | Conversion::ZoneName => self.parse_zone()?,
            Conversion::WeekdayName | Conversion::WeekdayNameShort => self.parse_weekday_name()?,
            Conversion::WeekdayMon1 => {
                let day = self.parse_bounded(1, 1, 7, "day of the week")?;
                self.builder.set_day_of_week_mon1(day as u8);
            }
            Conversion::WeekdaySun0 => {
                let day = self.parse_bounded(1, 0, 6, "day of the week")?;
                self.builder.set_day_of_week_sun0(day as u8);
            }
            Conversion::IsoWeekYear => {
                let max = if numeric_follows { 4 } else { MAX_DIGITS };
                let year = self.parse_digits(max)?;
                self.builder.set_week_based_year(year);
            }
            Conversion::IsoWeekYearOfCentury => {
                let year = self.parse_bounded(2, 0, 99, "two-digit week-based year")?;
                self.builder.set_two_digit_week_based_year(year);
            }
            Conversion::IsoWeek => {
                let week = self.parse_bounded(2, 1, 53, "week of the week-based year")?;
                self.builder.set_week_of_week_based_year(week as u8);
            }
            Conversion::WeekSunday => {
                let week = self.parse_bounded(2, 0, 53, "week number")?;
                self.builder.set_week_of_year_sunday(week as u8);
            }
            Conversion::WeekMonday => {
                let week = self.parse_bounded(2, 0, 53, "week number")?;
                self.builder.set_week_of_year_monday(week as u8);
            }
            Conversion::EpochSeconds => {
                let seconds = self.parse_signed(MAX_DIGITS)?;
                self.builder.set_instant_seconds(seconds);
            }
            Conversion::EpochMillis => {
                let millis = self.parse_signed(MAX_DIGITS)?;
                self.builder.set_instant_millis(millis);
            }
            Conversion::Newline | Conversion::Tab => self.skip_whitespace(),
            Conversion::Percent => {
                if self.peek() == Some(b'%') {
                    self.pos += 1;
                } else {
                    return Err(self.error("expected '%'"));
                }
            }
            Conversion::DateAndTime
            | Conversion::MonthDayYear
            | Conversion::IsoDate
            | Conversion::VmsDate
            | Conversion::Clock12
            | Conversion::HourMinute
            | Conversion::Clock24
            | Conversion::DateAndTimeWithZone => {
                unreachable!("composite directives are expanded above")
            }
        }

        Ok(())
    }

    /// Match literal text: a whitespace character matches a run of zero or
    /// more whitespace characters, anything else must match exactly.
    fn match_literal(&mut self, text: &str) -> Result<(), ParseError> {
        for c in text.chars() {
            if c.is_whitespace() {
                self.skip_whitespace();
            } else if self.input[self.pos..].starts_with(c) {
                self.pos += c.len_utf8();
            } else {
                return Err(self.error(format!("expected {c:?}")));
            }
        }
        Ok(())
    }

    fn parse_weekday_name(&mut self) -> Result<(), ParseError> {
        for (index, (name, _)) in WEEKDAYS.iter().enumerate() {
            if self.consume_prefix_ci(name) {
                self.builder.set_day_of_week_sun0(index as u8);
                return Ok(());
            }
        }
        for (index, (name, _)) in WEEKDAYS.iter().enumerate() {
            if self.consume_prefix_ci(&name[..3]) {
                self.builder.set_day_of_week_sun0(index as u8);
                return Ok(());
            }
        }
        Err(self.error("expected a day of week name"))
    }

    fn parse_month_name(&mut self) -> Result<(), ParseError> {
        for (index, (name, _)) in MONTH_NAMES.iter().enumerate() {
            if self.consume_prefix_ci(name) {
                self.builder.set_month_of_year(index as u8 + 1);
                return Ok(());
            }
        }
        for (index, (name, _)) in MONTH_NAMES.iter().enumerate() {
            if self.consume_prefix_ci(&name[..3]) {
                self.builder.set_month_of_year(index as u8 + 1);
                return Ok(());
            }
        }
        Err(self.error("expected a month name"))
    }

    fn parse_meridiem(&mut self) -> Result<(), ParseError> {
        for (name, hour_offset) in MERIDIANS {
            if self.consume_prefix_ci(name) {
                self.builder.set_meridiem(hour_offset);
                return Ok(());
            }
        }
        Err(self.error("expected a meridian indicator"))
    }

    /// Match a time zone and store it verbatim.
    ///
    /// `%z` and `%Z` accept the same grammar; the stored name is resolved to
    /// an offset later, by the resolver or the map projection.
    fn parse_zone(&mut self) -> Result<(), ParseError> {
        match ZONE_PATTERN.find(&self.input[self.pos..]) {
            Some(found) => {
                self.builder.set_time_zone_name(found.as_str().to_owned());
                self.pos += found.end();
                Ok(())
            }
            None => Err(self.error("expected a time zone")),
        }
    }

    /// Consume up to `max` digits, requiring at least one.
    fn parse_digits(&mut self, max: usize) -> Result<i64, ParseError> {
        let bytes = self.input.as_bytes();
        let mut value: i64 = 0;
        let mut consumed = 0;
        while consumed < max {
            match bytes.get(self.pos) {
                Some(digit @ b'0'..=b'9') => {
                    value = value
                        .checked_mul(10)
                        .and_then(|value| value.checked_add(i64::from(digit - b'0')))
                        .ok_or_else(|| self.error("numeric value out of range"))?;
                    self.pos += 1;
                    consumed += 1;
                }
                _ => break,
            }
        }
        if consumed == 0 {
            return Err(self.error("expected digits"));
        }
        Ok(value)
    }

    /// Consume an optional sign and up to `max` digits.
    fn parse_signed(&mut self, max: usize) -> Result<i64, ParseError> {
        let negative = match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                true
            }
            Some(b'+') => {
                self.pos += 1;
                false
            }
            _ => false,
        };
        let value = self.parse_digits(max)?;
        Ok(if negative { -value } else { value })
    }

    /// Consume up to `max` digits and validate the range.
    fn parse_bounded(
        &mut self,
        max: usize,
        lo: i64,
        hi: i64,
        what: &str,
    ) -> Result<i64, ParseError> {
        let at = self.pos;
        let value = self.parse_digits(max)?;
        if (lo..=hi).contains(&value) {
            Ok(value)
        } else {
            Err(self.error_at(at, format!("{what} out of range")))
        }
    }

    /// Like [`parse_bounded`](Self::parse_bounded) with a two-digit budget,
    /// but a single leading space replaces the first digit (`%e`, `%k`,
    /// `%l`).
    fn parse_spaced(&mut self, lo: i64, hi: i64, what: &str) -> Result<i64, ParseError> {
        if self.peek() == Some(b' ') {
            self.pos += 1;
            self.parse_bounded(1, lo, hi, what)
        } else {
            self.parse_bounded(2, lo, hi, what)
        }
    }

    /// Consume a sub-second field and scale it to signed nanoseconds.
    ///
    /// With a numeric neighbor the digit budget is exactly the default
    /// precision; otherwise every following digit is consumed. Digits beyond
    /// nanosecond resolution are dropped, not rounded.
    fn parse_fraction(
        &mut self,
        default_precision: usize,
        numeric_follows: bool,
    ) -> Result<i64, ParseError> {
        let negative = match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                true
            }
            Some(b'+') => {
                self.pos += 1;
                false
            }
            _ => false,
        };

        let limit = if numeric_follows {
            default_precision
        } else {
            MAX_DIGITS
        };

        let bytes = self.input.as_bytes();
        let mut value: i64 = 0;
        let mut consumed = 0;
        while consumed < limit {
            match bytes.get(self.pos) {
                Some(digit @ b'0'..=b'9') => {
                    if consumed < 9 {
                        value = value * 10 + i64::from(digit - b'0');
                    }
                    self.pos += 1;
                    consumed += 1;
                }
                _ => break,
            }
        }
        if consumed == 0 {
            return Err(self.error("expected digits"));
        }

        let scale = 9 - consumed.min(9);
        value *= 10_i64.pow(scale as u32);
        Ok(if negative { -value } else { value })
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.input[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn consume_prefix_ci(&mut self, prefix: &str) -> bool {
        let bytes = self.input.as_bytes();
        let end = self.pos + prefix.len();
        if end <= bytes.len() && bytes[self.pos..end].eq_ignore_ascii_case(prefix.as_bytes()) {
            self.pos = end;
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        self.error_at(self.pos, message)
    }

    fn error_at(&self, index: usize, message: impl Into<String>) -> ParseError {
        ParseError {
            input: self.input.to_owned(),
            index,
            message: message.into(),
        }
    }
}
