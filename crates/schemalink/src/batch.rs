//! Multi-document batch runs.
//!
//! Documents are processed sequentially and in isolation: one document's
//! failure is recorded in its report and the batch moves on. Cancellation is
//! checked between documents (and inside each scan), so everything completed
//! before the flag fired stays in the report.

use std::path::PathBuf;

use schemalink_core::{
    Grid, PatternSpec, ScanWarning, SizeRatios, StyleConfig, detect_grid, synthesize,
};
use tracing::{info, warn};

use crate::document::DocumentReader;
use crate::error::LinkError;
use crate::scan::{CancelToken, scan_document};
use crate::writer::write_linked_document;

/// How each document's grid is obtained.
#[derive(Debug, Clone)]
pub enum GridSource {
    /// One explicit grid shared by every document.
    Exact(Grid),
    /// Auto-detect from this page of each document, falling back to the
    /// proportional layout when the title block yields nothing.
    Detect { page: usize, fallback: SizeRatios },
    /// Proportional layout sized to each document's first page.
    Proportional(SizeRatios),
}

impl GridSource {
    /// Resolve the grid for one document.
    pub fn resolve(&self, reader: &dyn DocumentReader) -> Result<Grid, LinkError> {
        match self {
            GridSource::Exact(grid) => Ok(grid.clone()),
            GridSource::Proportional(ratios) => proportional(reader, ratios),
            GridSource::Detect { page, fallback } => {
                let content = reader.page(*page)?;
                let detection = detect_grid(&content.tokens, content.width, content.height);
                match detection.boundaries(content.width, content.height) {
                    Some(boundaries) => Ok(Grid::Exact(boundaries)),
                    None => {
                        warn!(document = reader.id(), "grid detection empty, using proportional fallback");
                        proportional(reader, fallback)
                    }
                }
            }
        }
    }
}

fn proportional(reader: &dyn DocumentReader, ratios: &SizeRatios) -> Result<Grid, LinkError> {
    let (page_width, page_height) = reader
        .page_size(0)
        .ok_or_else(|| LinkError::Reader("document has no pages".to_string()))?;
    Ok(Grid::Proportional {
        ratios: ratios.clone(),
        page_width,
        page_height,
    })
}

/// One document to process: its extracted pages, the PDF they came from, and
/// where the linked document goes.
pub struct BatchJob {
    pub reader: Box<dyn DocumentReader>,
    pub source_path: PathBuf,
    pub output_path: PathBuf,
}

/// Outcome for a single document.
#[derive(Debug)]
pub struct DocumentReport {
    pub document_id: String,
    pub references_found: usize,
    pub links_written: usize,
    pub warnings: Vec<ScanWarning>,
    pub error: Option<LinkError>,
}

impl DocumentReport {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub documents: Vec<DocumentReport>,
    pub cancelled: bool,
}

impl BatchReport {
    pub fn total_references(&self) -> usize {
        self.documents.iter().map(|d| d.references_found).sum()
    }

    pub fn total_links(&self) -> usize {
        self.documents.iter().map(|d| d.links_written).sum()
    }

    pub fn failed_count(&self) -> usize {
        self.documents.iter().filter(|d| !d.succeeded()).count()
    }
}

/// Run the full pipeline over every job.
pub fn run_batch(
    jobs: &[BatchJob],
    spec: &PatternSpec,
    grid_source: &GridSource,
    config: &StyleConfig,
    cancel: &CancelToken,
) -> BatchReport {
    let mut report = BatchReport::default();

    for job in jobs {
        if cancel.is_cancelled() {
            report.cancelled = true;
            break;
        }
        let entry = process_document(job, spec, grid_source, config, cancel);
        report.documents.push(entry);
    }

    report
}

/// Run the full pipeline over a single job. Callers that drive their own
/// loop (for per-document progress reporting) use this directly; `run_batch`
/// wraps it with cancellation checks between documents.
pub fn process_document(
    job: &BatchJob,
    spec: &PatternSpec,
    grid_source: &GridSource,
    config: &StyleConfig,
    cancel: &CancelToken,
) -> DocumentReport {
    let reader = job.reader.as_ref();
    let mut entry = DocumentReport {
        document_id: reader.id().to_string(),
        references_found: 0,
        links_written: 0,
        warnings: Vec::new(),
        error: None,
    };
    run_pipeline(job, spec, grid_source, config, cancel, &mut entry);
    info!(
        document = %entry.document_id,
        references = entry.references_found,
        links = entry.links_written,
        ok = entry.succeeded(),
        "document processed"
    );
    entry
}

fn run_pipeline(
    job: &BatchJob,
    spec: &PatternSpec,
    grid_source: &GridSource,
    config: &StyleConfig,
    cancel: &CancelToken,
    entry: &mut DocumentReport,
) {
    let reader = job.reader.as_ref();
    let grid = match grid_source.resolve(reader) {
        Ok(grid) => grid,
        Err(e) => {
            entry.error = Some(e);
            return;
        }
    };

    let scan = scan_document(reader, spec, cancel);
    entry.references_found = scan.value.len();
    entry.warnings = scan.warnings;

    let page_heights: Vec<f64> = (0..reader.page_count())
        .filter_map(|i| reader.page_size(i))
        .map(|(_, h)| h)
        .collect();
    let synthesis = synthesize(&scan.value, &grid, &page_heights, config);
    entry.warnings.extend(synthesis.warnings);

    match write_linked_document(
        &job.source_path,
        &job.output_path,
        &synthesis.links,
        &synthesis.script,
    ) {
        Ok(written) => entry.links_written = written,
        Err(e) => entry.error = Some(e),
    }
}
