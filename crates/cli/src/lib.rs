//! # Fieldlog CLI
//!
//! Terminal front end for the Fieldlog workspace.
//!
//! This crate contains:
//! - The clap command surface (`fieldlog timer|note|report|export|profile`)
//! - [`AppContext`]: configuration, database and service wiring
//! - One handler module per command family
//!
//! ## Architecture
//! - Composition root: the only crate that sees every layer at once
//! - Handlers print for people on stdout; execution records go to tracing

pub mod cli;
pub mod commands;
pub mod context;
pub mod utils;

// Re-export commonly used items
pub use cli::Cli;
pub use context::AppContext;
