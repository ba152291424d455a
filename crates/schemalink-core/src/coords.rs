//! Logical token → grid index conversion and coordinate-space flips.
//!
//! Extraction works in top-left-origin space (y grows downward); the
//! document's native annotation space has its origin at the bottom-left.
//! Rectangles cross that seam exactly once, at synthesis time.

use crate::geometry::BBox;

/// Convert a column token to a zero-based column index.
///
/// Numeric tokens parse directly ("0" → 0, "12" → 12). Alphabetic tokens map
/// the letter to its alphabet offset (`A` → 0). Anything else resolves to
/// column 0.
pub fn column_index(token: &str) -> usize {
    let token = token.trim();
    if let Ok(n) = token.parse::<usize>() {
        return n;
    }
    match token.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => (c.to_ascii_uppercase() as u8 - b'A') as usize,
        _ => 0,
    }
}

/// Convert a row token to a zero-based row index.
///
/// A single letter maps to its alphabet offset (`A` → 0, `B` → 1). Multiple
/// letters are read as a base-26 positional number with A=1…Z=26 per digit,
/// most significant first (`AB` → 28). Numeric tokens parse directly.
pub fn row_index(token: &str) -> usize {
    let token = token.trim();
    if token.is_empty() {
        return 0;
    }
    if token.chars().all(|c| c.is_ascii_alphabetic()) {
        let mut chars = token.chars();
        let first = chars.next().unwrap();
        if chars.next().is_none() {
            return (first.to_ascii_uppercase() as u8 - b'A') as usize;
        }
        let mut index = 0usize;
        for c in token.chars() {
            index = index * 26 + (c.to_ascii_uppercase() as u8 - b'A' + 1) as usize;
        }
        return index;
    }
    token.parse::<usize>().unwrap_or(0)
}

/// Flip a top-left-origin rectangle into the native bottom-left-origin space
/// of a page with the given height. Returns `[x0, y0, x1, y1]` with
/// `y0 ≤ y1` in native space.
pub fn to_native(bbox: &BBox, page_height: f64) -> [f64; 4] {
    [
        bbox.x0,
        page_height - bbox.bottom,
        bbox.x1,
        page_height - bbox.top,
    ]
}
