//! Week numbering.

/// Start day of the week.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum WeekStart {
    /// Sunday.
    Sunday,
    /// Monday.
    Monday,
}

/// Compute the non-ISO week number, beginning at the provided start day of
/// the week. Days before the first start day of the year are in week 0.
///
/// ## Inputs
///
/// * `week_day`: Day of the week from Sunday in `0..=6`.
/// * `year_day`: Day of the year in `1..=366`.
/// * `week_start`: Start day of the week.
pub(crate) fn week_number(week_day: i64, year_day: i64, week_start: WeekStart) -> i64 {
    let week_day = match week_start {
        WeekStart::Sunday => week_day,
        WeekStart::Monday => (week_day + 6) % 7,
    };
    (year_day - 1 + 7 - week_day) / 7
}

/// Compute the ISO 8601 week-based year and week number.
///
/// Week 1 of `YYYY` is the week containing `YYYY-01-04`. Days before week 1
/// belong to the last week of the previous year; a final partial week can
/// belong to week 1 of the next year.
///
/// ## Inputs
///
/// * `year`: Year.
/// * `week_day`: Day of the week from Sunday in `0..=6`.
/// * `year_day`: Day of the year in `1..=366`.
pub(crate) fn iso_8601_year_and_week_number(
    year: i64,
    week_day: i64,
    year_day: i64,
) -> (i64, i64) {
    let iso_week_day = if week_day == 0 { 7 } else { week_day };
    let jan_1 = (iso_week_day - year_day).rem_euclid(7) + 1;

    let week = (year_day - iso_week_day + 10) / 7;
    if week < 1 {
        let previous_jan_1 = (jan_1 - 1 - days_in_year(year - 1)).rem_euclid(7) + 1;
        (year - 1, weeks_in_year(year - 1, previous_jan_1))
    } else if week > weeks_in_year(year, jan_1) {
        (year + 1, 1)
    } else {
        (year, week)
    }
}

/// Number of ISO weeks in a year: 53 when the year starts on a Thursday, or
/// on a Wednesday in a leap year.
fn weeks_in_year(year: i64, jan_1_iso_week_day: i64) -> i64 {
    if jan_1_iso_week_day == 4 || (is_leap_year(year) && jan_1_iso_week_day == 3) {
        53
    } else {
        52
    }
}

fn days_in_year(year: i64) -> i64 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Check if a year is a leap year.
fn is_leap_year(year: i64) -> bool {
    year % 400 == 0 || (year % 4 == 0 && year % 100 != 0)
}
