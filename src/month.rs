//! Month keys. A month is a "YYYY-MM" string; navigation is integer
//! arithmetic on (year, month) so December/January roll the year.

use chrono::Local;

const NAMES: [&str; 12] = [
    "JANUARY",
    "FEBRUARY",
    "MARCH",
    "APRIL",
    "MAY",
    "JUNE",
    "JULY",
    "AUGUST",
    "SEPTEMBER",
    "OCTOBER",
    "NOVEMBER",
    "DECEMBER",
];

/// The current month in the local timezone, as "YYYY-MM".
pub fn current() -> String {
    Local::now().format("%Y-%m").to_string()
}

/// Parse "YYYY-MM" into (year, month). Rejects month numbers outside 1-12.
pub fn parse(month: &str) -> Option<(i32, u32)> {
    let (y, m) = month.split_once('-')?;
    if y.len() != 4 || m.len() != 2 {
        return None;
    }
    let year: i32 = y.parse().ok()?;
    let month_num: u32 = m.parse().ok()?;
    if !(1..=12).contains(&month_num) {
        return None;
    }
    Some((year, month_num))
}

/// Shift a month key by `delta` months, rolling the year as needed.
pub fn shift(month: &str, delta: i32) -> Option<String> {
    let (year, month_num) = parse(month)?;
    let total = year * 12 + (month_num as i32 - 1) + delta;
    let new_year = total.div_euclid(12);
    let new_month = total.rem_euclid(12) + 1;
    Some(format!("{new_year:04}-{new_month:02}"))
}

/// Uppercase English name for a month number (1-12).
pub fn name(month_num: u32) -> &'static str {
    month_num
        .checked_sub(1)
        .and_then(|i| NAMES.get(i as usize))
        .copied()
        .unwrap_or("")
}

/// Human heading for a month key, e.g. "MARCH (2024)". Unparseable keys
/// come back unchanged.
pub fn label(month: &str) -> String {
    match parse(month) {
        Some((year, month_num)) => format!("{} ({})", name(month_num), year),
        None => month.to_string(),
    }
}
