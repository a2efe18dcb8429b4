//! Report form rendering and file output

pub mod html_exporter;

pub use html_exporter::HtmlExporter;
