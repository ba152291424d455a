//! Automatic grid detection from page border labels.
//!
//! Schematic title blocks print column numbers along the top edge and row
//! letters along the right edge. The detector scans the page's tokens for
//! those labels inside narrow boundary zones, clusters duplicates, and emits
//! ordered boundary positions plus relative size ratios for the grid model.

use std::collections::HashMap;

use crate::grid::GridBoundaries;
use crate::token::Token;

/// Fraction of the page dimension covered by the initial label zone.
const ZONE_PCT: f64 = 0.04;
/// Expanded zone used when the initial zone finds nothing.
const ZONE_PCT_EXPANDED: f64 = 0.08;
/// Largest integer accepted as a column label.
const MAX_COLUMN_LABEL: u32 = 15;
/// Margin derived from the first label's position, minus this slack.
const MARGIN_SLACK_PCT: f64 = 2.0;
/// Default margin percentage when an axis was not detected.
const DEFAULT_MARGIN_PCT: f64 = 5.0;

/// Ordered labels found along one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisDetection {
    /// Label texts in boundary order ("0", "1", ... or "A", "B", ...).
    pub labels: Vec<String>,
    /// Boundary positions: one per label, ascending, plus a synthetic
    /// trailing boundary at `last + average_gap` closing the final cell.
    pub positions: Vec<f64>,
    /// Relative cell sizes: consecutive gaps divided by the minimum gap.
    pub ratios: Vec<f64>,
}

impl AxisDetection {
    /// Number of cells this axis defines.
    pub fn cell_count(&self) -> usize {
        self.positions.len().saturating_sub(1)
    }
}

/// Result of scanning one page for grid labels.
///
/// Either axis may be `None` when no qualifying labels were found even after
/// zone expansion; the caller then falls back to manual configuration for
/// that axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridDetection {
    pub columns: Option<AxisDetection>,
    pub rows: Option<AxisDetection>,
    /// Left margin estimate for the proportional fallback, percent of width.
    pub margin_left_pct: f64,
    /// Top margin estimate for the proportional fallback, percent of height.
    pub margin_top_pct: f64,
}

impl GridDetection {
    /// True when neither axis produced labels.
    pub fn is_empty(&self) -> bool {
        self.columns.is_none() && self.rows.is_none()
    }

    /// Build exact boundaries when both axes were detected.
    pub fn boundaries(&self, page_width: f64, page_height: f64) -> Option<GridBoundaries> {
        let cols = self.columns.as_ref()?;
        let rows = self.rows.as_ref()?;
        GridBoundaries::new(
            cols.positions.clone(),
            rows.positions.clone(),
            page_width,
            page_height,
        )
        .ok()
    }
}

/// Scan a page's tokens for grid labels and derive boundaries and ratios.
///
/// Column labels are purely numeric tokens with value ≤ 15 whose vertical
/// center lies in the top zone (first 4% of the page height, expanded to 8%
/// when empty). Row labels are single alphabetic tokens whose horizontal
/// center lies in the right zone (last 4% of the width, expanded to 8%).
/// Duplicate labels are averaged; labels are then ordered by position.
pub fn detect_grid(tokens: &[Token], page_width: f64, page_height: f64) -> GridDetection {
    let columns = detect_axis(tokens, |t, zone| {
        column_label(t).filter(|_| t.bbox.y_center() < page_height * zone)
    });
    let rows = detect_axis(tokens, |t, zone| {
        row_label(t).filter(|_| t.bbox.x_center() > page_width * (1.0 - zone))
    });

    let margin_left_pct = columns
        .as_ref()
        .map(|c| margin_pct(c.positions[0], page_width))
        .unwrap_or(DEFAULT_MARGIN_PCT);
    let margin_top_pct = rows
        .as_ref()
        .map(|r| margin_pct(r.positions[0], page_height))
        .unwrap_or(DEFAULT_MARGIN_PCT);

    GridDetection {
        columns,
        rows,
        margin_left_pct,
        margin_top_pct,
    }
}

fn margin_pct(first_position: f64, page_extent: f64) -> f64 {
    ((first_position / page_extent) * 100.0 - MARGIN_SLACK_PCT)
        .floor()
        .clamp(0.0, 30.0)
}

/// A qualifying column label with its boundary position (horizontal center).
fn column_label(token: &Token) -> Option<(String, f64)> {
    let text = token.text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u32 = text.parse().ok()?;
    if value > MAX_COLUMN_LABEL {
        return None;
    }
    Some((text.to_string(), token.bbox.x_center()))
}

/// A qualifying row label with its boundary position (vertical center).
fn row_label(token: &Token) -> Option<(String, f64)> {
    let text = token.text.trim();
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => {
            Some((c.to_ascii_uppercase().to_string(), token.bbox.y_center()))
        }
        _ => None,
    }
}

fn detect_axis(
    tokens: &[Token],
    qualify: impl Fn(&Token, f64) -> Option<(String, f64)>,
) -> Option<AxisDetection> {
    let mut hits = collect_labels(tokens, |t| qualify(t, ZONE_PCT));
    if hits.is_empty() {
        hits = collect_labels(tokens, |t| qualify(t, ZONE_PCT_EXPANDED));
    }
    if hits.len() < 2 {
        return None;
    }

    // Average duplicate labels, then order by position.
    let mut ordered: Vec<(f64, String)> = hits
        .into_iter()
        .map(|(label, positions)| {
            let avg = positions.iter().sum::<f64>() / positions.len() as f64;
            (avg, label)
        })
        .collect();
    ordered.sort_by(|a, b| a.0.total_cmp(&b.0));

    let labels: Vec<String> = ordered.iter().map(|(_, l)| l.clone()).collect();
    let mut positions: Vec<f64> = ordered.iter().map(|(p, _)| *p).collect();

    // Close the final cell with a synthetic trailing boundary.
    let first = positions[0];
    let last = positions[positions.len() - 1];
    let average_gap = (last - first) / (positions.len() - 1) as f64;
    positions.push(last + average_gap);

    let ratios = relative_sizes(&positions);
    Some(AxisDetection {
        labels,
        positions,
        ratios,
    })
}

fn collect_labels(
    tokens: &[Token],
    qualify: impl Fn(&Token) -> Option<(String, f64)>,
) -> HashMap<String, Vec<f64>> {
    let mut hits: HashMap<String, Vec<f64>> = HashMap::new();
    for token in tokens {
        if let Some((label, position)) = qualify(token) {
            hits.entry(label).or_default().push(position);
        }
    }
    hits
}

/// Relative sizes between consecutive positions: each gap divided by the
/// minimum gap, so the narrowest cell gets ratio 1.0. Degenerate inputs
/// (non-increasing positions) yield uniform ratios.
pub fn relative_sizes(positions: &[f64]) -> Vec<f64> {
    if positions.len() < 2 {
        return Vec::new();
    }
    let gaps: Vec<f64> = positions.windows(2).map(|w| w[1] - w[0]).collect();
    let min_gap = gaps.iter().cloned().fold(f64::INFINITY, f64::min);
    if min_gap <= 0.0 {
        return vec![1.0; gaps.len()];
    }
    gaps.iter().map(|g| g / min_gap).collect()
}

/// Drop positions closer than `min_distance` to their kept predecessor.
/// Input must be sorted ascending; the first position is always kept.
pub fn filter_close_positions(positions: &[f64], min_distance: f64) -> Vec<f64> {
    let mut filtered: Vec<f64> = Vec::with_capacity(positions.len());
    for &p in positions {
        match filtered.last() {
            Some(&kept) if p - kept < min_distance => {}
            _ => filtered.push(p),
        }
    }
    filtered
}
