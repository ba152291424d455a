//! Navigation link synthesis.
//!
//! Turns extracted [`Reference`]s into concrete [`NavigationLink`]s: the
//! target page is the page token parsed minus one, the target rectangle is
//! the grid cell for the column/row tokens, and both rectangles are converted
//! to native PDF space (bottom-left origin). Pure: feeding the output of one
//! run back in produces the same links.

use crate::coords::{column_index, row_index, to_native};
use crate::error::{ScanWarning, ScanWarningCode};
use crate::extract::Reference;
use crate::grid::Grid;
use crate::script::Script;
use crate::style::StyleConfig;

/// One clickable link, fully resolved, in native PDF coordinates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavigationLink {
    pub literal_text: String,
    /// Page carrying the link annotation (0-indexed).
    pub source_page_index: usize,
    /// Annotation rectangle, native space.
    pub source_rect: [f64; 4],
    /// Destination page (0-indexed).
    pub target_page_index: usize,
    /// Destination cell rectangle, native space.
    pub target_rect: [f64; 4],
    /// The `highlight(...)` call for the link's chained script action.
    pub script_invocation: String,
}

/// Synthesis output: the links plus the one shared script they all call.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisResult {
    pub links: Vec<NavigationLink>,
    pub script: Script,
    pub warnings: Vec<ScanWarning>,
}

/// Resolve references against a grid and produce navigation links.
///
/// `page_heights` supplies the native-space flip per page; its length is the
/// document page count. A reference whose page token does not parse, or
/// points outside the document, is dropped with an
/// [`ScanWarningCode::UnresolvedReference`] warning.
pub fn synthesize(
    references: &[Reference],
    grid: &Grid,
    page_heights: &[f64],
    config: &StyleConfig,
) -> SynthesisResult {
    let mut links = Vec::new();
    let mut warnings = Vec::new();

    for reference in references {
        let target_page_index = match reference.page_token.parse::<usize>() {
            Ok(n) if n >= 1 && n <= page_heights.len() => n - 1,
            _ => {
                warnings.push(unresolved(reference, "page token outside document"));
                continue;
            }
        };
        let Some(&source_height) = page_heights.get(reference.source_page_index) else {
            warnings.push(unresolved(reference, "source page outside document"));
            continue;
        };

        let cell = grid.cell(
            column_index(&reference.column_token),
            row_index(&reference.row_token),
        );
        let target_rect = to_native(&cell, page_heights[target_page_index]);
        let source_rect = to_native(&reference.source_rect, source_height);

        links.push(NavigationLink {
            literal_text: reference.literal_text.clone(),
            source_page_index: reference.source_page_index,
            source_rect,
            target_page_index,
            target_rect,
            script_invocation: Script::invocation(target_page_index, target_rect),
        });
    }

    SynthesisResult {
        links,
        script: Script::from_config(config),
        warnings,
    }
}

fn unresolved(reference: &Reference, description: &str) -> ScanWarning {
    ScanWarning::on_page(
        ScanWarningCode::UnresolvedReference,
        description,
        reference.source_page_index,
    )
    .with_element(&reference.literal_text)
}
