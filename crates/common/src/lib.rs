//! # Fieldlog Common
//!
//! Shared utilities for the Fieldlog workspace.
//!
//! - **[`time`]**: pure conversions between decimal hours, `HH:mm` display,
//!   millisecond durations, and ISO/display dates, plus local-clock helpers
//! - **[`validation`]**: field-level validation error type used by input
//!   forms
//!
//! ## Architecture
//! - No dependencies on other Fieldlog crates
//! - No I/O beyond reading the local clock

pub mod time;
pub mod validation;

// Re-export commonly used items
pub use validation::{FieldError, ValidationError, ValidationResult};
