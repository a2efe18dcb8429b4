//! Report export document assembly
//!
//! Pure mapping from a stored report to the fields the printable form
//! shows. Rendering and file output live behind the exporter port.

pub mod document;
pub mod ports;

pub use document::{build_document, DocumentRow, ExportOptions, ReportDocument};
pub use ports::DocumentExporter;
