//! Monthly report aggregation
//!
//! Turns the month's notes into one derived, point-in-time report row and
//! keeps it stored idempotently (regenerating overwrites, never
//! duplicates).

pub mod assembler;
pub mod ports;
pub mod service;

pub use assembler::{assemble_report, month_label};
pub use ports::ReportRepository;
pub use service::ReportService;
