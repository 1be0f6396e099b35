//! Per-file pipeline error taxonomy.
//!
//! A file whose name yields no URL is not an error; the driver counts it as
//! skipped and never starts its pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of one file's pipeline. Each variant maps to a stage: the stage
/// decides whether the file keeps its tags, its place on disk, or both.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Transport-level fetch failure (DNS, connect, timeout). No metadata
    /// change; the file stays in place.
    #[error("fetch failed: {0}")]
    Fetch(#[from] curl::Error),

    /// Server answered with a non-2xx status. Handled like a fetch failure.
    #[error("GET {url} returned HTTP {status}")]
    Http { url: String, status: u32 },

    /// A selector could not be parsed, so extraction cannot run. No partial
    /// field population.
    #[error("parse failed: {0}")]
    Parse(String),

    /// Tag container write-back failed; the file was not moved.
    #[error("metadata write failed for {path}: {source}")]
    MetadataWrite {
        path: PathBuf,
        #[source]
        source: id3::Error,
    },

    /// Filesystem move failed. Tags may already be written; that window
    /// between "tagged" and "moved" is reported, not hidden.
    #[error("move failed for {path}: {source}")]
    FileMove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
