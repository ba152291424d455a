//! Error types for the document-level layer.
//!
//! Uses [`thiserror`]. Core-level pattern and grid errors convert into
//! [`LinkError`] so callers deal with one error type end to end.

use schemalink_core::{GridError, PatternError};
use thiserror::Error;

/// Error type for scanning, link synthesis, and document rewriting.
#[derive(Debug, Error)]
pub enum LinkError {
    /// A reference pattern failed to compile.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// A grid definition was rejected.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// The page reader could not produce page content.
    #[error("reader error: {0}")]
    Reader(String),

    /// Error reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing or rewriting the PDF itself.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Malformed configuration or manifest record.
    #[error("config error: {0}")]
    Config(String),
}
