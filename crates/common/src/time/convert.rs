//! Decimal-hour, `HH:mm` and millisecond conversions
//!
//! Hours entered by hand travel as `HH:mm` strings; the stopwatch produces
//! milliseconds; reports store decimal hours. These functions are the only
//! bridges between the three representations.

use once_cell::sync::Lazy;
use regex::Regex;

static HHMM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2}):([0-5]\d)$").expect("HHMM_RE should compile - this is a bug")
});

static HHMM_SHAPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{1,2}:\d{2}$").expect("HHMM_SHAPE_RE should compile - this is a bug")
});

/// Format decimal hours as zero-padded `HH:mm`.
///
/// Input is clamped to `[0, 24]` and converted through total minutes so
/// minute rounding carries into the hour part instead of producing `xx:60`.
/// Non-finite input yields an empty string.
///
/// # Examples
///
/// ```
/// use fieldlog_common::time::hours_to_hhmm;
///
/// assert_eq!(hours_to_hhmm(2.47), "02:28");
/// assert_eq!(hours_to_hhmm(1.9999), "02:00");
/// assert_eq!(hours_to_hhmm(25.0), "24:00");
/// ```
pub fn hours_to_hhmm(hours: f64) -> String {
    if !hours.is_finite() {
        return String::new();
    }
    let clamped = hours.clamp(0.0, 24.0);
    let total_minutes = ((clamped * 60.0).round() as u32).min(24 * 60);
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}

/// Parse `HH:mm` into decimal hours.
///
/// Accepts one or two hour digits with minutes `00`–`59`; hours run `0`–`24`
/// and `24:mm` is valid only as `24:00`. Returns `None` on any violation.
///
/// # Examples
///
/// ```
/// use fieldlog_common::time::hhmm_to_hours;
///
/// assert_eq!(hhmm_to_hours("02:30"), Some(2.5));
/// assert_eq!(hhmm_to_hours("24:00"), Some(24.0));
/// assert_eq!(hhmm_to_hours("24:01"), None);
/// assert_eq!(hhmm_to_hours("23:60"), None);
/// ```
pub fn hhmm_to_hours(value: &str) -> Option<f64> {
    let caps = HHMM_RE.captures(value.trim())?;
    let hours: u32 = caps[1].parse().ok()?;
    let minutes: u32 = caps[2].parse().ok()?;
    if hours > 24 || (hours == 24 && minutes != 0) {
        return None;
    }
    Some(f64::from(hours) + f64::from(minutes) / 60.0)
}

/// Shape-only check for `H:mm`/`HH:mm` input.
///
/// Validation wants to tell "not even the right shape" apart from "shaped
/// but out of range", so this accepts strings [`hhmm_to_hours`] rejects
/// (`"2:70"`, `"25:00"`).
pub fn looks_like_hhmm(value: &str) -> bool {
    HHMM_SHAPE_RE.is_match(value.trim())
}

/// Spell decimal hours out as a pt-BR label ("02 horas e 28 minutos").
///
/// Same clamping and total-minutes arithmetic as [`hours_to_hhmm`].
pub fn hours_to_label(hours: f64) -> String {
    if !hours.is_finite() {
        return String::new();
    }
    let clamped = hours.clamp(0.0, 24.0);
    let total_minutes = ((clamped * 60.0).round() as u32).min(24 * 60);

    let h = total_minutes / 60;
    let m = if h == 24 { 0 } else { total_minutes % 60 };

    let hour_label = if h == 1 { "hora" } else { "horas" };
    let minute_label = if m == 1 { "minuto" } else { "minutos" };
    format!("{h:02} {hour_label} e {m:02} {minute_label}")
}

/// Wall-clock components of a millisecond duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockParts {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl std::fmt::Display for ClockParts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Split a millisecond duration into `HH`/`MM`/`SS` by integer floor.
///
/// # Examples
///
/// ```
/// use fieldlog_common::time::split_hhmmss;
///
/// let parts = split_hhmmss(3_723_000);
/// assert_eq!((parts.hours, parts.minutes, parts.seconds), (1, 2, 3));
/// assert_eq!(parts.to_string(), "01:02:03");
/// ```
pub fn split_hhmmss(ms: u64) -> ClockParts {
    let total_secs = ms / 1000;
    ClockParts {
        hours: total_secs / 3600,
        minutes: (total_secs % 3600) / 60,
        seconds: total_secs % 60,
    }
}

/// Convert a millisecond duration to decimal hours, rounded to two
/// decimals and clamped to `[0, 24]`.
pub fn ms_to_decimal_hours(ms: u64) -> f64 {
    round2(ms as f64 / 3_600_000.0).clamp(0.0, 24.0)
}

/// Round to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hhmm_round_trips_within_half_minute() {
        // Sweep [0, 24] in 0.01h steps; re-parsing the formatted value must
        // stay within 1/120h (half a minute) of the original.
        for step in 0..=2400u32 {
            let hours = f64::from(step) / 100.0;
            let formatted = hours_to_hhmm(hours);
            let parsed = hhmm_to_hours(&formatted).expect("formatted value parses");
            assert!(
                (parsed - hours).abs() <= 1.0 / 120.0 + 1e-9,
                "{hours} -> {formatted} -> {parsed}"
            );
        }
    }

    #[test]
    fn minute_rounding_carries_into_hours() {
        assert_eq!(hours_to_hhmm(1.9999), "02:00");
        assert_eq!(hours_to_hhmm(23.9999), "24:00");
        assert_eq!(hours_to_hhmm(0.9999), "01:00");
    }

    #[test]
    fn formatting_clamps_and_pads() {
        assert_eq!(hours_to_hhmm(-1.0), "00:00");
        assert_eq!(hours_to_hhmm(25.0), "24:00");
        assert_eq!(hours_to_hhmm(0.0), "00:00");
        assert_eq!(hours_to_hhmm(9.5), "09:30");
        assert_eq!(hours_to_hhmm(f64::NAN), "");
    }

    #[test]
    fn parsing_enforces_the_24_hour_boundary() {
        assert_eq!(hhmm_to_hours("24:00"), Some(24.0));
        assert_eq!(hhmm_to_hours("24:01"), None);
        assert_eq!(hhmm_to_hours("25:00"), None);
        assert_eq!(hhmm_to_hours("23:60"), None);
        assert_eq!(hhmm_to_hours("7:05"), Some(7.0 + 5.0 / 60.0));
        assert_eq!(hhmm_to_hours(" 08:15 "), Some(8.25));
        assert_eq!(hhmm_to_hours("7"), None);
        assert_eq!(hhmm_to_hours("7:5"), None);
        assert_eq!(hhmm_to_hours(""), None);
    }

    #[test]
    fn shape_check_ignores_ranges() {
        assert!(looks_like_hhmm("02:30"));
        assert!(looks_like_hhmm("2:70"));
        assert!(looks_like_hhmm("25:00"));
        assert!(!looks_like_hhmm("7"));
        assert!(!looks_like_hhmm("7:5"));
        assert!(!looks_like_hhmm("banana"));
    }

    #[test]
    fn split_floors_each_component() {
        let parts = split_hhmmss(86_399_999);
        assert_eq!((parts.hours, parts.minutes, parts.seconds), (23, 59, 59));
        assert_eq!(split_hhmmss(0).to_string(), "00:00:00");
        assert_eq!(split_hhmmss(999).to_string(), "00:00:00");
        assert_eq!(split_hhmmss(1000).to_string(), "00:00:01");
    }

    #[test]
    fn ms_conversion_rounds_then_clamps() {
        assert_eq!(ms_to_decimal_hours(0), 0.0);
        assert_eq!(ms_to_decimal_hours(3_600_000), 1.0);
        assert_eq!(ms_to_decimal_hours(8_892_000), 2.47);
        assert_eq!(ms_to_decimal_hours(87_000_000), 24.0);
    }

    #[test]
    fn labels_use_pt_br_plurals() {
        assert_eq!(hours_to_label(2.47), "02 horas e 28 minutos");
        assert_eq!(hours_to_label(1.0), "01 hora e 00 minutos");
        assert_eq!(hours_to_label(0.0167), "00 horas e 01 minuto");
        assert_eq!(hours_to_label(24.0), "24 horas e 00 minutos");
        assert_eq!(hours_to_label(0.0), "00 horas e 00 minutos");
    }
}
