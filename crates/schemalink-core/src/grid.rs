//! Grid cell geometry.
//!
//! A [`Grid`] resolves a (column, row) index pair to an exact page rectangle.
//! Exact mode uses explicit boundary coordinates (from the interactive editor
//! record or from auto-detection); proportional mode divides the page minus
//! margins according to per-cell size ratios. Both modes are pure functions
//! of their inputs: identical inputs always yield identical rectangles.

use crate::error::GridError;
use crate::geometry::BBox;

fn check_axis(name: &str, positions: &[f64]) -> Result<(), GridError> {
    if positions.len() < 2 {
        return Err(GridError::new(format!(
            "{name} axis has {} boundary position(s), need at least 2",
            positions.len()
        )));
    }
    for pair in positions.windows(2) {
        if pair[1] <= pair[0] {
            return Err(GridError::new(format!(
                "{name} axis boundaries not strictly increasing ({} then {})",
                pair[0], pair[1]
            )));
        }
    }
    Ok(())
}

/// Explicit grid boundary coordinates on a page.
///
/// N positions per axis define N−1 cells. Both sequences are strictly
/// increasing; this is validated at construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridBoundaries {
    column_positions: Vec<f64>,
    row_positions: Vec<f64>,
    page_width: f64,
    page_height: f64,
}

impl GridBoundaries {
    pub fn new(
        column_positions: Vec<f64>,
        row_positions: Vec<f64>,
        page_width: f64,
        page_height: f64,
    ) -> Result<Self, GridError> {
        check_axis("column", &column_positions)?;
        check_axis("row", &row_positions)?;
        Ok(Self {
            column_positions,
            row_positions,
            page_width,
            page_height,
        })
    }

    pub fn column_positions(&self) -> &[f64] {
        &self.column_positions
    }

    pub fn row_positions(&self) -> &[f64] {
        &self.row_positions
    }

    /// Number of columns (boundary count minus one).
    pub fn column_count(&self) -> usize {
        self.column_positions.len() - 1
    }

    /// Number of rows (boundary count minus one).
    pub fn row_count(&self) -> usize {
        self.row_positions.len() - 1
    }
}

/// Proportional cell sizing for the fallback mode.
///
/// Ratios are relative cell extents (1.0 = the narrowest cell); margins are
/// percentages of the page dimension, applied on both sides of the axis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeRatios {
    column_ratios: Vec<f64>,
    row_ratios: Vec<f64>,
    pub margin_left_pct: f64,
    pub margin_top_pct: f64,
}

impl SizeRatios {
    pub fn new(
        column_ratios: Vec<f64>,
        row_ratios: Vec<f64>,
        margin_left_pct: f64,
        margin_top_pct: f64,
    ) -> Result<Self, GridError> {
        if column_ratios.is_empty() || row_ratios.is_empty() {
            return Err(GridError::new("ratio lists must not be empty"));
        }
        if column_ratios.iter().chain(&row_ratios).any(|&r| r <= 0.0) {
            return Err(GridError::new("size ratios must be positive"));
        }
        Ok(Self {
            column_ratios,
            row_ratios,
            margin_left_pct,
            margin_top_pct,
        })
    }

    /// Uniform grid: every cell the same size (ratio 1.0 each).
    pub fn uniform(
        columns: usize,
        rows: usize,
        margin_left_pct: f64,
        margin_top_pct: f64,
    ) -> Result<Self, GridError> {
        Self::new(
            vec![1.0; columns.max(1)],
            vec![1.0; rows.max(1)],
            margin_left_pct,
            margin_top_pct,
        )
    }

    pub fn column_ratios(&self) -> &[f64] {
        &self.column_ratios
    }

    pub fn row_ratios(&self) -> &[f64] {
        &self.row_ratios
    }
}

/// Parse a comma-separated ratio list ("1,1.5,2") into exactly `count`
/// entries: short lists are padded with 1.0, long lists truncated, and an
/// unparsable list falls back to all-uniform.
pub fn parse_ratios(text: &str, count: usize) -> Vec<f64> {
    if text.trim().is_empty() {
        return vec![1.0; count];
    }
    let mut ratios: Vec<f64> = Vec::with_capacity(count);
    for part in text.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match part.parse::<f64>() {
            Ok(v) if v > 0.0 => ratios.push(v),
            _ => return vec![1.0; count],
        }
    }
    ratios.resize(count, 1.0);
    ratios
}

/// A cell resolver for one document page layout.
#[derive(Debug, Clone, PartialEq)]
pub enum Grid {
    /// Exact mode: cell edges are the recorded boundary lines.
    Exact(GridBoundaries),
    /// Proportional fallback: page minus margins, divided by size ratios.
    Proportional {
        ratios: SizeRatios,
        page_width: f64,
        page_height: f64,
    },
}

impl Grid {
    /// Resolve a (column, row) index pair to a page rectangle in top-left
    /// space. Out-of-range indices clamp to the nearest valid cell; the
    /// result is clamped into the page.
    pub fn cell(&self, col_index: usize, row_index: usize) -> BBox {
        match self {
            Grid::Exact(b) => {
                let col = col_index.min(b.column_positions.len() - 2);
                let row = row_index.min(b.row_positions.len() - 2);
                BBox::new(
                    b.column_positions[col],
                    b.row_positions[row],
                    b.column_positions[col + 1],
                    b.row_positions[row + 1],
                )
                .clamp_to(b.page_width, b.page_height)
            }
            Grid::Proportional {
                ratios,
                page_width,
                page_height,
            } => {
                let margin_x = page_width * ratios.margin_left_pct / 100.0;
                let margin_y = page_height * ratios.margin_top_pct / 100.0;
                let usable_width = page_width - 2.0 * margin_x;
                let usable_height = page_height - 2.0 * margin_y;

                let (x0, x1) = axis_span(&ratios.column_ratios, col_index, usable_width, margin_x);
                let (top, bottom) = axis_span(&ratios.row_ratios, row_index, usable_height, margin_y);
                BBox::new(x0, top, x1, bottom).clamp_to(*page_width, *page_height)
            }
        }
    }

    /// Page size this grid was built for.
    pub fn page_size(&self) -> (f64, f64) {
        match self {
            Grid::Exact(b) => (b.page_width, b.page_height),
            Grid::Proportional {
                page_width,
                page_height,
                ..
            } => (*page_width, *page_height),
        }
    }
}

/// Start/end of cell `index` along one proportional axis.
fn axis_span(ratios: &[f64], index: usize, usable: f64, margin: f64) -> (f64, f64) {
    let index = index.min(ratios.len() - 1);
    let total: f64 = ratios.iter().sum();
    let unit = usable / total;
    let start = margin + ratios[..index].iter().sum::<f64>() * unit;
    (start, start + ratios[index] * unit)
}
