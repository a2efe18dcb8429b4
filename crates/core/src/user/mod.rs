//! User profile boundary
//!
//! Account and credential flows live outside this codebase; the core only
//! consumes a locally stored profile through a repository port.

pub mod ports;

pub use ports::UserProfileRepository;
