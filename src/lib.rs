#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(unknown_lints)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_op_in_unsafe_fn)]
#![warn(unused_qualifications)]
#![warn(variant_size_differences)]

/*!
This crate implements the date-time directive language of Ruby's
`Date._strptime`, `Time.strptime` and `Time#strftime`: patterns are compiled
once into a token sequence, which can then parse input text into a neutral
field bag ([`Parsed`]), render any [`Time`] implementation into a string, or
be resolved into an instant with offset ([`Resolved`]).

The directives begin with a percent `%` character. Any text not forming a
directive is passed through: it must match the input when parsing (with any
whitespace character matching a run of whitespace) and is copied to the
output when formatting. An unrecognized `%` sequence is kept as literal text,
per Ruby.

Each directive consists of a percent `%` character, zero or more flags, an
optional minimum field width, an optional modifier and a conversion
specifier:

```text
%<flags><width><modifier><conversion>
```

## Flags

Flags and width only affect formatting; the parser ignores them.

| Flag | Description                                                   |
|------|---------------------------------------------------------------|
|  `-` | Left-align: emit the bare value, dropping padding altogether. |
|  `_` | Pad with spaces.                                              |
|  `0` | Pad with zeros.                                               |
|  `^` | Upper-case the result.                                        |
|  `#` | Swap the case of the result.                                  |

## Modifiers

The modifiers are `E` and `O`. They parse as if absent and make the
formatter emit the token verbatim.

## Specifiers

| Specifier  | Example       | Description                                                                                      |
|------------|---------------|---------------------------------------------------------------------------------------------------|
|    `%Y`    | `-2001`       | Year including the century; at least four digits, sign included.                                 |
|    `%C`    | `-21`         | Year divided by 100, floored; at least two digits.                                               |
|    `%y`    | `99`          | Year modulo 100; parsing infers the century (`69..=99` ⇒ 19xx, else 20xx).                       |
|    `%m`    | `01`          | Month of the year, `01..=12`.                                                                    |
|    `%B`    | `July`        | Full month name; parsing accepts full or abbreviated names, case-insensitively.                  |
| `%b`, `%h` | `Jul`         | First three letters of the month name.                                                           |
|    `%d`    | `01`          | Day of the month, `01..=31`.                                                                     |
|    `%e`    | ` 1`          | Day of the month, blank-padded; parsing accepts a single leading space.                          |
|    `%j`    | `001`         | Day of the year, three digits; the parser accepts `1..=365`.                                     |
|    `%H`    | `00`          | Hour on the 24-hour clock; the parser also accepts `24`.                                         |
|    `%k`    | ` 0`          | Hour on the 24-hour clock, blank-padded.                                                         |
|    `%I`    | `01`          | Hour on the 12-hour clock, `01..=12`.                                                            |
|    `%l`    | ` 1`          | Hour on the 12-hour clock, blank-padded.                                                         |
|    `%P`    | `am`          | Meridian indicator, lower-case.                                                                  |
|    `%p`    | `AM`          | Meridian indicator, upper-case; parsing accepts `am`, `pm`, `a.m.`, `p.m.`, case-insensitively.  |
|    `%M`    | `00`          | Minute of the hour.                                                                              |
|    `%S`    | `00`          | Second of the minute, `00..=60` (60 is a leap second).                                           |
|    `%L`    | `123`         | Fractional seconds, three digits by default.                                                     |
|    `%N`    | `123456789`   | Fractional seconds, nine digits by default; excess parsed digits are truncated.                  |
|    `%z`    | `+0200`       | Signed UTC offset (`+hhmm`); parsing accepts names and numeric offsets alike.                    |
|    `%:z`   | `+02:00`      | Signed UTC offset with colons (`+hh:mm`).                                                        |
|    `%::z`  | `+02:00:00`   | Signed UTC offset with seconds (`+hh:mm:ss`).                                                    |
|    `%:::z` | `+02`         | Signed UTC offset in the shortest exact form (`+hh[:mm[:ss]]`). Four or more colons are literal. |
|    `%Z`    | `CEST`        | Time zone name; see [`ZoneNameStyle`] for the formatting styles.                                 |
|    `%A`    | `Sunday`      | Full weekday name; parsing accepts full or abbreviated names, case-insensitively.                |
|    `%a`    | `Sun`         | First three letters of the weekday name.                                                         |
|    `%u`    | `1`           | Weekday number, Monday is 1.                                                                     |
|    `%w`    | `0`           | Weekday number, Sunday is 0.                                                                     |
|    `%G`    | `-2001`       | ISO 8601 week-based year.                                                                        |
|    `%g`    | `99`          | ISO 8601 week-based year modulo 100, with the same century inference as `%y`.                    |
|    `%V`    | `01`          | ISO 8601 week number, `01..=53`.                                                                 |
|    `%U`    | `00`          | Week number, `00..=53`, counting from the first Sunday of the year.                              |
|    `%W`    | `00`          | Week number, `00..=53`, counting from the first Monday of the year.                              |
|    `%s`    | `86400`       | Seconds since `1970-01-01 00:00:00 UTC`.                                                         |
|    `%Q`    | `86400123`    | Milliseconds since `1970-01-01 00:00:00 UTC`. Parse-only; formats verbatim.                      |
|    `%n`    | `\n`          | Newline; the parser treats it as whitespace.                                                     |
|    `%t`    | `\t`          | Tab; the parser treats it as whitespace.                                                         |
|    `%%`    | `%`           | A literal `'%'`.                                                                                 |
|    `%c`    | `Sun Jul  8 00:23:45 2001` | Date and time, `%a %b %e %H:%M:%S %Y`.                                              |
| `%D`, `%x` | `07/08/01`    | Month, day and two-digit year, `%m/%d/%y`.                                                       |
|    `%F`    | `2001-07-08`  | ISO 8601 date, `%Y-%m-%d`.                                                                       |
|    `%v`    | ` 8-Jul-2001` | VMS date, `%e-%b-%Y`.                                                                            |
|    `%r`    | `12:23:45 AM` | 12-hour time, `%I:%M:%S %p`.                                                                     |
|    `%R`    | `00:23`       | Hour and minute, `%H:%M`.                                                                        |
| `%T`, `%X` | `00:23:45`    | 24-hour time, `%H:%M:%S`.                                                                        |
|    `%+`    | `Sun Jul  8 00:23:45 UTC 2001` | Date and time with zone, `%a %b %e %H:%M:%S %Z %Y`. Parse-only; formats verbatim. |

## Parsing

Numeric directives consume a bounded run of digits: two digits for most
fields, and a greedy run for `%Y`, `%G`, `%C`, `%s` and `%Q`. A greedy
directive immediately followed by a token starting with digits falls back to
its fixed width (4 for `%Y`/`%G`, 2 for `%C`), so `"%Y%m%d"` splits
`"20220306"` as expected. Whatever input remains after the last token is
kept in [`Parsed::leftover`] rather than being an error.

```
use rubytime::strptime;

let parsed = strptime("%Y-%m-%d", "2022-03-06 rest")?;
assert_eq!(parsed.year(), Some(2022));
assert_eq!(parsed.month_of_year(), Some(3));
assert_eq!(parsed.day_of_month(), Some(6));
assert_eq!(parsed.leftover(), Some(" rest"));
# Ok::<(), rubytime::ParseError>(())
```

## Resolving

[`Resolver`] turns a field bag into an instant with offset, applying the
rules of `Time.strptime`: epoch directives dominate the calendar fields,
parsed leap seconds and 24:00 roll forward, and the zone name is resolved
against the same table `Time.strptime` uses. The result implements
[`Time`], so it can be formatted directly.

```
use rubytime::{strptime, Resolver, string::strftime};

let parsed = strptime("%FT%T %z", "2019-06-08T12:34:56 +0900")?;
let time = Resolver::new().resolve(&parsed)?;
assert_eq!(time.epoch_second(), 1_559_964_896);
assert_eq!(time.offset_second(), 9 * 3600);
assert_eq!(strftime(&time, "%F %T %z")?, "2019-06-08 12:34:56 +0900");
# Ok::<(), rubytime::Error>(())
```
*/

// Ensure code blocks in `README.md` compile
#[cfg(doctest)]
#[doc = include_str!("../README.md")]
mod readme {}

mod assert;
mod compile;
mod format;
mod parse;
mod parsed;
mod resolve;
mod scan;
mod token;
mod zone;

#[cfg(test)]
mod tests;

use thiserror::Error;

pub use compile::Format;
pub use format::ZoneNameStyle;
pub use parsed::{
    DecimalFieldConverter, FieldValue, HashConverter, Parsed, RationalFieldConverter,
};
pub use resolve::{Resolved, Resolver};

/// Error type returned when an input string does not match a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse {input:?}: {message} (at byte {index})")]
pub struct ParseError {
    /// The input string that failed to parse.
    pub input: String,
    /// Byte index at which the failure was detected.
    pub index: usize,
    /// Description of the failure.
    pub message: String,
}

/// Error type returned by [`Resolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Not a single calendar or time field was parsed.
    #[error("no time information")]
    NoTimeInformation,
    /// The input carried no zone and the resolver has no default offset.
    #[error("empty time zone ID")]
    EmptyTimeZone,
    /// The parsed zone is not in the resolution table and the resolver has
    /// no default offset.
    #[error("unknown time zone {0:?}")]
    UnknownTimeZone(String),
    /// The parsed calendar fields do not name a real date, such as Feb 29 of
    /// a non-leap year.
    #[error("invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate {
        /// Parsed year.
        year: i64,
        /// Parsed month of the year.
        month: u8,
        /// Parsed day of the month.
        day: u8,
    },
    /// The parsed hour excess is not representable.
    #[error("hour is not in the range 0..=24")]
    HourOutOfRange,
}

/// Error type returned by the `strftime` functions.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum FormatError {
    /// Formatted string is too large and could cause an out-of-memory error.
    #[error("formatted string too large")]
    FormattedStringTooLarge,
    /// Provided buffer for the [`buffered::strftime`] function is too small
    /// for the formatted string.
    ///
    /// This corresponds to the [`std::io::ErrorKind::WriteZero`] variant.
    #[error("failed to write the whole buffer")]
    WriteZero,
    /// Formatting error, corresponding to [`core::fmt::Error`].
    #[error("formatter error")]
    FmtError,
    /// The time implementation returned a field outside its documented
    /// range.
    #[error("invalid time field: {0}")]
    InvalidTime(&'static str),
}

/// Union of the error types of this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An input string did not match a pattern.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A field bag could not be resolved into an instant.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// A time implementation could not be formatted.
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Field accessors the formatter reads from.
///
/// Implement this for any value representing a point in time. Every
/// `strftime` entry point takes one, and [`Resolved`] implements it, so
/// parsed inputs can be formatted right back.
pub trait Time {
    /// The year, including the century.
    fn year(&self) -> i32;
    /// The month of the year, in `1..=12`.
    fn month(&self) -> u8;
    /// The day of the month, in `1..=31`.
    fn day(&self) -> u8;
    /// The hour of the day, in `0..=23`.
    fn hour(&self) -> u8;
    /// The minute of the hour, in `0..=59`.
    fn minute(&self) -> u8;
    /// The second of the minute, in `0..=60` to admit leap seconds.
    fn second(&self) -> u8;
    /// The sub-second nanoseconds, in `0..=999_999_999`.
    fn nanoseconds(&self) -> u32;
    /// The day of the week, in `0..=6` with `Sunday == 0`.
    fn day_of_week(&self) -> u8;
    /// The day of the year, in `1..=366`.
    fn day_of_year(&self) -> u16;
    /// Seconds since the epoch, signed.
    fn to_int(&self) -> i64;
    /// True when the value is in UTC.
    fn is_utc(&self) -> bool;
    /// Offset from UTC, in seconds.
    fn utc_offset(&self) -> i32;
    /// Name of the time zone; may be empty.
    fn time_zone(&self) -> &str;
}

// The trait must stay object-safe.
const _: Option<&dyn Time> = None;

/// Parse an input string with the specified pattern.
///
/// Equivalent to compiling the pattern with [`Format::compile`] and calling
/// [`Format::parse`]; compile the pattern once instead when it is reused.
///
/// # Examples
///
/// ```
/// use rubytime::strptime;
///
/// let parsed = strptime("%H:%M", "12:34")?;
/// assert_eq!(parsed.hour_of_day(), Some(12));
/// assert_eq!(parsed.minute_of_hour(), Some(34));
/// # Ok::<(), rubytime::ParseError>(())
/// ```
///
/// # Errors
///
/// Returns a [`ParseError`] when the input does not match the pattern.
pub fn strptime(pattern: &str, input: &str) -> Result<Parsed, ParseError> {
    Format::compile(pattern).parse(input)
}

/// Provides a buffered `strftime` implementation.
pub mod buffered {
    use crate::format::{TimeFormatter, ZoneNameStyle};
    use crate::{Format, FormatError, Time};

    /// Format a _time_ implementation with the specified format string,
    /// writing in the provided buffer and returning the written subslice.
    ///
    /// See the [crate-level documentation](crate) for a complete description
    /// of possible format specifiers.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubytime::buffered::strftime;
    /// use rubytime::{strptime, Resolver};
    ///
    /// let time = Resolver::utc().resolve(&strptime("%Y", "1970")?)?;
    ///
    /// let mut buf = [0u8; 8];
    /// assert_eq!(strftime(&time, "%Y", &mut buf)?, b"1970");
    /// assert_eq!(buf, *b"1970\0\0\0\0");
    /// # Ok::<(), rubytime::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Can produce a [`FormatError`] when the formatting fails or the buffer
    /// is too small.
    pub fn strftime<'a>(
        time: &impl Time,
        format: &str,
        buf: &'a mut [u8],
    ) -> Result<&'a mut [u8], FormatError> {
        let compiled = Format::compile(format);
        let len = buf.len();

        let mut cursor = &mut buf[..];
        TimeFormatter::new(
            time,
            &compiled.tokens,
            compiled.size_limit(),
            ZoneNameStyle::None,
        )
        .fmt(&mut cursor)?;
        let remaining_len = cursor.len();

        Ok(&mut buf[..len - remaining_len])
    }
}

/// Provides a `strftime` implementation producing a byte vector.
pub mod bytes {
    use crate::format::{TimeFormatter, ZoneNameStyle};
    use crate::{Format, FormatError, Time};

    /// Format a _time_ implementation with the specified format string.
    ///
    /// See the [crate-level documentation](crate) for a complete description
    /// of possible format specifiers.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubytime::bytes::strftime;
    /// use rubytime::{strptime, Resolver};
    ///
    /// let time = Resolver::utc().resolve(&strptime("%Y", "1970")?)?;
    /// assert_eq!(strftime(&time, "%Y")?, b"1970");
    /// # Ok::<(), rubytime::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Can produce a [`FormatError`] when the formatting fails.
    pub fn strftime(time: &impl Time, format: &str) -> Result<Vec<u8>, FormatError> {
        let compiled = Format::compile(format);
        let mut buf = Vec::new();
        TimeFormatter::new(
            time,
            &compiled.tokens,
            compiled.size_limit(),
            ZoneNameStyle::None,
        )
        .fmt(&mut buf)?;
        Ok(buf)
    }
}

/// Provides a `strftime` implementation producing a string.
pub mod string {
    use crate::{Format, FormatError, Time};

    /// Format a _time_ implementation with the specified format string.
    ///
    /// See the [crate-level documentation](crate) for a complete description
    /// of possible format specifiers.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubytime::string::strftime;
    /// use rubytime::{strptime, Resolver};
    ///
    /// let time = Resolver::utc().resolve(&strptime("%s", "86400")?)?;
    /// assert_eq!(strftime(&time, "%Y-%m-%dT%H:%M:%S")?, "1970-01-02T00:00:00");
    /// # Ok::<(), rubytime::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Can produce a [`FormatError`] when the formatting fails.
    pub fn strftime(time: &impl Time, format: &str) -> Result<String, FormatError> {
        Format::compile(format).format(time)
    }
}
