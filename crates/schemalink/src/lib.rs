//! schemalink: clickable grid-reference navigation for schematic PDF sets.
//!
//! Multi-page schematic drawings cross-reference each other with textual
//! codes like `/12.3-A` (page 12, column 3, row A of the title block grid).
//! This crate scans a document's extracted text for such codes, resolves
//! each one to a destination grid cell, and rewrites the PDF so every code
//! becomes an invisible clickable link: a GoTo jump to the target page
//! chained to a JavaScript call that flashes a highlight over the cell.
//!
//! The pure pieces (patterns, grids, extraction, synthesis) live in
//! `schemalink-core`; this crate adds document access, whole-document
//! scanning with cancellation, the `lopdf` rewriter, batch orchestration,
//! and persisted configuration records.

pub mod batch;
#[cfg(feature = "serde")]
pub mod config;
pub mod document;
pub mod error;
pub mod scan;
pub mod writer;

pub use batch::{BatchJob, BatchReport, DocumentReport, GridSource, process_document, run_batch};
#[cfg(feature = "serde")]
pub use config::{GridRecord, load_style_config, save_style_config};
pub use document::{DocumentReader, MemoryDocument};
pub use error::LinkError;
pub use scan::{CancelToken, scan_document};
pub use writer::write_linked_document;

pub use schemalink_core;
