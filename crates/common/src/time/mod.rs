//! Time utilities
//!
//! Pure conversions used throughout the application:
//! - **[`convert`]**: decimal hours ⇄ `HH:mm`, millisecond splits, pt-BR
//!   duration labels
//! - **[`date`]**: ISO ⇄ `dd/mm/yyyy` display dates and local-clock helpers
//!
//! All date handling is string-shaped on purpose: calendar dates are stored
//! and bucketed as plain `yyyy-mm-dd` text, never converted through time
//! zones.

pub mod convert;
pub mod date;

// Re-export commonly used items
pub use convert::{
    hhmm_to_hours, hours_to_hhmm, hours_to_label, looks_like_hhmm, ms_to_decimal_hours, round2,
    split_hhmmss, ClockParts,
};
pub use date::{
    current_month_key, display_to_iso, iso_to_display, now_ms, timestamp_to_display_date,
    today_iso,
};
