//! Whole-document reference scanning.
//!
//! Pages are scanned in order and failures are isolated: a page whose
//! content cannot be produced is skipped with a warning, and the remaining
//! pages still contribute their references. Cancellation is cooperative and
//! checked once per page, so everything gathered before the flag flips is
//! retained.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use schemalink_core::{
    PatternSpec, Reference, ScanResult, ScanWarning, ScanWarningCode, extract_page,
};
use tracing::{debug, warn};

use crate::document::DocumentReader;

/// Shared cancellation flag. Cloning hands out another handle to the same
/// flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Scan every page of `reader` for references matching `spec`.
///
/// Returns all references found in page order, plus warnings for pages that
/// failed or literals that could not be located. Stops early, keeping
/// partial results, once `cancel` fires.
pub fn scan_document(
    reader: &dyn DocumentReader,
    spec: &PatternSpec,
    cancel: &CancelToken,
) -> ScanResult<Vec<Reference>> {
    let mut references = Vec::new();
    let mut warnings = Vec::new();

    for index in 0..reader.page_count() {
        if cancel.is_cancelled() {
            debug!(page = index, "scan cancelled, keeping partial results");
            break;
        }
        let content = match reader.page(index) {
            Ok(content) => content,
            Err(e) => {
                warn!(page = index, error = %e, "page skipped");
                warnings.push(
                    ScanWarning::on_page(ScanWarningCode::PageScanFailed, e.to_string(), index)
                        .with_element(reader.id()),
                );
                continue;
            }
        };
        let mut page_result = extract_page(&content, spec, index, reader.id());
        debug!(
            page = index,
            found = page_result.value.len(),
            "page scanned"
        );
        references.append(&mut page_result.value);
        warnings.extend(page_result.warnings);
    }

    ScanResult::with_warnings(references, warnings)
}
