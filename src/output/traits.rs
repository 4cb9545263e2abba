//! Exporter trait and shared output types

use crate::places::PlaceSet;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during export
///
/// Export failures are terminal for the run; the engine does not retry
/// them.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Where an export landed and how much it wrote
#[derive(Debug, Clone)]
pub struct ExportReceipt {
    pub path: PathBuf,
    pub places_written: usize,
}

/// Persists the final deduplicated place set
///
/// One call per run with the complete set; the write must be atomic from
/// the caller's point of view (a failed export leaves no half-written
/// artifact the caller is expected to clean up).
pub trait Exporter {
    fn export(&self, places: &PlaceSet) -> ExportResult<ExportReceipt>;
}
