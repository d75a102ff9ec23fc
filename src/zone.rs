//! Time zone name tables and numeric offset parsing.
//!
//! Two distinct tables are carried. The resolution table mirrors the set of
//! abbreviations `Time.strptime` understands: UTC aliases, the North American
//! abbreviations and the single-letter military zones. The parsing table is a
//! superset mirroring Ruby's date library, adding the traditional European
//! and Asian abbreviations plus the regional `"... Standard Time"` names.

use crate::assert::sorted_by_name;
use crate::scan::Scanner;

/// Name table used when resolving a parsed zone into an instant.
static TIME_ZONES: &[(&str, i32)] = sorted_by_name(
    &[
        ("A", 3600),
        ("B", 7200),
        ("C", 10800),
        ("CDT", -18000),
        ("CST", -21600),
        ("D", 14400),
        ("E", 18000),
        ("EDT", -14400),
        ("EST", -18000),
        ("F", 21600),
        ("G", 25200),
        ("GMT", 0),
        ("H", 28800),
        ("I", 32400),
        ("K", 36000),
        ("L", 39600),
        ("M", 43200),
        ("MDT", -21600),
        ("MST", -25200),
        ("N", -3600),
        ("O", -7200),
        ("P", -10800),
        ("PDT", -25200),
        ("PST", -28800),
        ("Q", -14400),
        ("R", -18000),
        ("S", -21600),
        ("T", -25200),
        ("U", -28800),
        ("UT", 0),
        ("UTC", 0),
        ("V", -32400),
        ("W", -36000),
        ("X", -39600),
        ("Y", -43200),
        ("Z", 0),
    ]);

/// Name table used for the `offset` entry of the parsed field map.
///
/// Keys ending in `STANDARD TIME`, `DAYLIGHT TIME` or `DST` are stripped
/// before lookup; the daylight forms add an hour to the base offset.
static DATE_ZONES: &[(&str, i32)] = sorted_by_name(
    &[
        ("A", 3600),
        ("ADT", -10800),
        ("AFGHANISTAN", 16200),
        ("AHST", -36000),
        ("AKDT", -28800),
        ("AKST", -32400),
        ("ALASKAN", -32400),
        ("ARAB", 10800),
        ("ARABIAN", 14400),
        ("ARABIC", 10800),
        ("ART", -10800),
        ("AST", -14400),
        ("AT", -7200),
        ("ATLANTIC", -14400),
        ("AUS CENTRAL", 34200),
        ("AUS EASTERN", 36000),
        ("AZORES", -3600),
        ("B", 7200),
        ("BRST", -7200),
        ("BRT", -10800),
        ("BST", 3600),
        ("BT", 10800),
        ("C", 10800),
        ("CANADA CENTRAL", -21600),
        ("CAPE VERDE", -3600),
        ("CAT", -36000),
        ("CAUCASUS", 14400),
        ("CCT", 28800),
        ("CDT", -18000),
        ("CEN. AUSTRALIA", 34200),
        ("CENTRAL", -21600),
        ("CENTRAL AMERICA", -21600),
        ("CENTRAL ASIA", 21600),
        ("CENTRAL EUROPE", 3600),
        ("CENTRAL EUROPEAN", 3600),
        ("CENTRAL PACIFIC", 39600),
        ("CEST", 7200),
        ("CET", 3600),
        ("CHINA", 28800),
        ("CLST", -10800),
        ("CLT", -14400),
        ("CST", -21600),
        ("D", 14400),
        ("DATELINE", -43200),
        ("E", 18000),
        ("E. AFRICA", 10800),
        ("E. AUSTRALIA", 36000),
        ("E. EUROPE", 7200),
        ("E. SOUTH AMERICA", -10800),
        ("EADT", 39600),
        ("EAST", 36000),
        ("EASTERN", -18000),
        ("EAT", 10800),
        ("EDT", -14400),
        ("EEST", 10800),
        ("EET", 7200),
        ("EGYPT", 7200),
        ("EKATERINBURG", 18000),
        ("EST", -18000),
        ("F", 21600),
        ("FIJI", 43200),
        ("FLE", 7200),
        ("FST", 7200),
        ("FWT", 3600),
        ("G", 25200),
        ("GMT", 0),
        ("GREENLAND", -10800),
        ("GREENWICH", 0),
        ("GST", 36000),
        ("GTB", 7200),
        ("H", 28800),
        ("HADT", -32400),
        ("HAST", -36000),
        ("HAWAIIAN", -36000),
        ("HDT", -32400),
        ("HST", -36000),
        ("I", 32400),
        ("IDLE", 43200),
        ("IDLW", -43200),
        ("INDIA", 19800),
        ("IRAN", 12600),
        ("IST", 19800),
        ("JERUSALEM", 7200),
        ("JST", 32400),
        ("K", 36000),
        ("KOREA", 32400),
        ("KST", 32400),
        ("L", 39600),
        ("M", 43200),
        ("MALAY PENINSULA", 28800),
        ("MDT", -21600),
        ("MEST", 7200),
        ("MESZ", 7200),
        ("MET", 3600),
        ("MEWT", 3600),
        ("MEXICO", -21600),
        ("MEZ", 3600),
        ("MID-ATLANTIC", -7200),
        ("MOUNTAIN", -25200),
        ("MSD", 14400),
        ("MSK", 10800),
        ("MST", -25200),
        ("MYANMAR", 23400),
        ("N", -3600),
        ("N. CENTRAL ASIA", 21600),
        ("NDT", -9000),
        ("NEPAL", 20700),
        ("NEW ZEALAND", 43200),
        ("NEWFOUNDLAND", -12600),
        ("NORTH ASIA", 25200),
        ("NORTH ASIA EAST", 28800),
        ("NST", -12600),
        ("NT", -39600),
        ("NZDT", 46800),
        ("NZST", 43200),
        ("NZT", 43200),
        ("O", -7200),
        ("P", -10800),
        ("PACIFIC", -28800),
        ("PACIFIC SA", -14400),
        ("PDT", -25200),
        ("PST", -28800),
        ("Q", -14400),
        ("R", -18000),
        ("ROMANCE", 3600),
        ("RUSSIAN", 10800),
        ("S", -21600),
        ("SA EASTERN", -10800),
        ("SA PACIFIC", -18000),
        ("SA WESTERN", -14400),
        ("SAMOA", -39600),
        ("SAST", 7200),
        ("SE ASIA", 25200),
        ("SGT", 28800),
        ("SOUTH AFRICA", 7200),
        ("SRI LANKA", 21600),
        ("SST", 7200),
        ("SWT", 3600),
        ("T", -25200),
        ("TAIPEI", 28800),
        ("TASMANIA", 36000),
        ("TOKYO", 32400),
        ("TONGA", 46800),
        ("U", -28800),
        ("US EASTERN", -18000),
        ("US MOUNTAIN", -25200),
        ("UT", 0),
        ("UTC", 0),
        ("V", -32400),
        ("VLADIVOSTOK", 36000),
        ("W", -36000),
        ("W. AUSTRALIA", 28800),
        ("W. CENTRAL AFRICA", 3600),
        ("W. EUROPE", 3600),
        ("WADT", 28800),
        ("WAST", 25200),
        ("WAT", 3600),
        ("WEST", 3600),
        ("WEST ASIA", 18000),
        ("WEST PACIFIC", 36000),
        ("WET", 0),
        ("X", -39600),
        ("Y", -43200),
        ("YAKUTSK", 32400),
        ("YDT", -28800),
        ("YST", -32400),
        ("Z", 0),
        ("ZP4", 14400),
        ("ZP5", 18000),
        ("ZP6", 21600),
    ]);

/// Resolve a zone name the way `Time.strptime` does.
pub(crate) fn offset_for_time_resolution(name: &str) -> Option<i32> {
    let name = normalize(name);
    parse_numeric_offset(&name).or_else(|| lookup(TIME_ZONES, &name))
}

/// Resolve a zone name the way `Date._strptime` does for its `offset` entry.
pub(crate) fn offset_for_date_parsing(name: &str) -> Option<i32> {
    let name = normalize(name);
    if let Some(offset) = parse_numeric_offset(&name) {
        return Some(offset);
    }

    let (base, daylight) = if let Some(base) = name.strip_suffix(" STANDARD TIME") {
        (base, false)
    } else if let Some(base) = name.strip_suffix(" DAYLIGHT TIME") {
        (base, true)
    } else if let Some(base) = name.strip_suffix(" DST") {
        (base, true)
    } else {
        (name.as_str(), false)
    };

    let offset = lookup(DATE_ZONES, base)?;
    Some(if daylight { offset + 3600 } else { offset })
}

/// Upper-case a name and collapse whitespace runs to single spaces.
fn normalize(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    for word in name.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        for c in word.chars() {
            normalized.push(c.to_ascii_uppercase());
        }
    }
    normalized
}

fn lookup(table: &[(&str, i32)], name: &str) -> Option<i32> {
    let index = table.binary_search_by_key(&name, |&(key, _)| key).ok()?;
    Some(table[index].1)
}

/// Parse a numeric UTC offset.
///
/// The accepted forms are an optional `GMT`, `UTC` or `UT` prefix followed by
/// a mandatory sign and `H`, `HH`, `HHMM`, `HH:MM`, `HHMMSS`, `HH:MM:SS`, or
/// fractional hours `H[.,]F`. Accumulator overflow rejects the whole string.
fn parse_numeric_offset(name: &str) -> Option<i32> {
    let mut scanner = Scanner::new(name.as_bytes());
    let _ = scanner.eat(b"GMT") || scanner.eat(b"UTC") || scanner.eat(b"UT");

    let sign = match scanner.bump()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };

    let digits = scanner.take_while(|byte| byte.is_ascii_digit());
    if digits.is_empty() {
        return None;
    }

    let seconds = match scanner.peek() {
        Some(b':') => {
            scanner.bump();
            let minutes = scanner.take_while(|byte| byte.is_ascii_digit());
            if minutes.is_empty() {
                return None;
            }
            let mut seconds = accumulate(digits)?
                .checked_mul(3600)?
                .checked_add(accumulate(minutes)?.checked_mul(60)?)?;
            if scanner.eat(b":") {
                let rest = scanner.take_while(|byte| byte.is_ascii_digit());
                if rest.is_empty() {
                    return None;
                }
                seconds = seconds.checked_add(accumulate(rest)?)?;
            }
            seconds
        }
        Some(b'.' | b',') => {
            scanner.bump();
            let fraction = scanner.take_while(|byte| byte.is_ascii_digit());
            if fraction.is_empty() || fraction.len() > 9 {
                return None;
            }
            let scale = 10_i64.pow(fraction.len() as u32);
            accumulate(digits)?
                .checked_mul(3600)?
                .checked_add(accumulate(fraction)?.checked_mul(3600)? / scale)?
        }
        _ => packed_offset(digits)?,
    };

    if !scanner.at_end() {
        return None;
    }
    i32::try_from(sign * seconds).ok()
}

/// Interpret a separator-free digit run as `H`, `HHMM` or `HHMMSS`.
fn packed_offset(digits: &[u8]) -> Option<i64> {
    match digits.len() {
        1 | 2 => accumulate(digits)?.checked_mul(3600),
        3 | 4 => {
            let (hours, minutes) = digits.split_at(digits.len() - 2);
            Some(accumulate(hours)? * 3600 + accumulate(minutes)? * 60)
        }
        5 | 6 => {
            let (rest, seconds) = digits.split_at(digits.len() - 2);
            let (hours, minutes) = rest.split_at(rest.len() - 2);
            Some(accumulate(hours)? * 3600 + accumulate(minutes)? * 60 + accumulate(seconds)?)
        }
        _ => None,
    }
}

fn accumulate(digits: &[u8]) -> Option<i64> {
    let mut value: i64 = 0;
    for &digit in digits {
        value = value
            .checked_mul(10)?
            .checked_add(i64::from(digit - b'0'))?;
    }
    Some(value)
}
