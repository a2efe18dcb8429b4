//! # Fieldlog Domain
//!
//! Business domain types and models for Fieldlog.
//!
//! This crate contains:
//! - Domain data types (Note, Report, TimerSnapshot, UserProfile)
//! - Domain error types and Result definitions
//! - Domain constants (action-tag vocabulary, timer ceiling)
//!
//! ## Architecture
//! - No dependencies on other Fieldlog crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
