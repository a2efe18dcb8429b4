//! Infrastructure error types and conversions

pub mod conversions;

pub use conversions::InfraError;
