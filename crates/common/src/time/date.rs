//! Date string conversions and local-clock helpers
//!
//! Calendar dates are plain `yyyy-mm-dd` strings end to end; the display
//! form is `dd/mm/yyyy`. Only shape and nominal ranges are checked (month
//! 1–12, day 1–31) — per-month day counts are left to the entry surface.

use chrono::{Local, LocalResult, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static ISO_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("ISO_DATE_RE should compile - this is a bug")
});

static DISPLAY_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2})/(\d{2})/(\d{4})$")
        .expect("DISPLAY_DATE_RE should compile - this is a bug")
});

/// Convert ISO `yyyy-mm-dd` to display `dd/mm/yyyy`.
///
/// # Examples
///
/// ```
/// use fieldlog_common::time::iso_to_display;
///
/// assert_eq!(iso_to_display("2025-03-07").as_deref(), Some("07/03/2025"));
/// assert_eq!(iso_to_display("2025-3-7"), None);
/// ```
pub fn iso_to_display(iso: &str) -> Option<String> {
    let caps = ISO_DATE_RE.captures(iso)?;
    let (year, month, day) = (&caps[1], &caps[2], &caps[3]);
    in_nominal_range(month, day).then(|| format!("{day}/{month}/{year}"))
}

/// Convert display `dd/mm/yyyy` to ISO `yyyy-mm-dd`.
///
/// # Examples
///
/// ```
/// use fieldlog_common::time::display_to_iso;
///
/// assert_eq!(display_to_iso("07/03/2025").as_deref(), Some("2025-03-07"));
/// assert_eq!(display_to_iso("32/01/2025"), None);
/// ```
pub fn display_to_iso(display: &str) -> Option<String> {
    let caps = DISPLAY_DATE_RE.captures(display)?;
    let (day, month, year) = (&caps[1], &caps[2], &caps[3]);
    in_nominal_range(month, day).then(|| format!("{year}-{month}-{day}"))
}

fn in_nominal_range(month: &str, day: &str) -> bool {
    let month: u32 = match month.parse() {
        Ok(value) => value,
        Err(_) => return false,
    };
    let day: u32 = match day.parse() {
        Ok(value) => value,
        Err(_) => return false,
    };
    (1..=12).contains(&month) && (1..=31).contains(&day)
}

/// Today's local date as ISO `yyyy-mm-dd`.
pub fn today_iso() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Current Unix time in milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Current local month as `yyyy-mm`, the report bucketing key.
pub fn current_month_key() -> String {
    Local::now().format("%Y-%m").to_string()
}

/// Render an epoch-millisecond stamp as a local `dd/mm/yyyy` date.
///
/// Returns `None` for non-positive or unrepresentable stamps; callers show
/// a placeholder instead.
pub fn timestamp_to_display_date(ms: i64) -> Option<String> {
    if ms <= 0 {
        return None;
    }
    match Local.timestamp_millis_opt(ms) {
        LocalResult::Single(dt) => Some(dt.format("%d/%m/%Y").to_string()),
        _ => None,
    }
}
