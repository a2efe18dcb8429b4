//! Port interface for document export

use std::path::PathBuf;

use async_trait::async_trait;
use fieldlog_domain::Result;

use super::document::ReportDocument;

/// Trait for rendering a document and writing it out.
#[async_trait]
pub trait DocumentExporter: Send + Sync {
    /// Render `document` and write it to the configured location,
    /// returning the path of the written file.
    async fn export(&self, document: &ReportDocument) -> Result<PathBuf>;
}
