//! Page-level reference extraction.
//!
//! Runs a compiled [`PatternSpec`] over one page's text, assigns capture
//! groups to page/column/row tokens per the role order, and resolves every
//! match to a literal on-page rectangle by searching the token stream.
//! Repeated identical literals are disambiguated with a per-page occurrence
//! counter: the Nth match of a literal consumes the Nth located bounding box
//! in text order. When the counter runs past the located instances the last
//! box is reused; a match with no located box at all is dropped with a
//! warning.

use std::collections::HashMap;

use crate::error::{ScanResult, ScanWarning, ScanWarningCode};
use crate::geometry::BBox;
use crate::pattern::PatternSpec;
use crate::token::{PageContent, Token};

/// Characters of context captured on each side of a match.
pub const CONTEXT_CHARS: usize = 30;

/// A detected cross-reference with its resolved source location and decoded
/// tokens. Created during extraction and immutable thereafter.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reference {
    /// The full matched text, e.g. "/12.3-A".
    pub literal_text: String,
    /// Target page token as written in the document.
    pub page_token: String,
    /// Grid column token.
    pub column_token: String,
    /// Grid row token.
    pub row_token: String,
    /// Page the reference appears on (0-indexed).
    pub source_page_index: usize,
    /// Rectangle of the literal on the source page, top-left space.
    pub source_rect: BBox,
    /// Up to 30 characters of surrounding text on each side, newlines
    /// collapsed to spaces.
    pub context_text: String,
    /// Which located instance of the literal this match consumed (1-based).
    pub occurrence_index: usize,
    /// Identifier of the owning document.
    pub document_id: String,
}

/// Searchable view of a page's tokens: concatenated text with a byte-offset
/// → token-index mapping, so literal occurrences can be located and resolved
/// to union bounding boxes.
struct TokenIndex {
    full: String,
    /// One entry per byte of `full`; `None` for inter-token separators.
    byte_to_token: Vec<Option<usize>>,
}

impl TokenIndex {
    fn build(tokens: &[Token]) -> Self {
        let mut full = String::new();
        let mut byte_to_token = Vec::new();
        for (i, token) in tokens.iter().enumerate() {
            if i > 0 {
                full.push(' ');
                byte_to_token.push(None);
            }
            let start = full.len();
            full.push_str(&token.text);
            byte_to_token.extend(std::iter::repeat_n(Some(i), full.len() - start));
        }
        Self {
            full,
            byte_to_token,
        }
    }

    /// All bounding boxes of `literal` on the page, in text order. A literal
    /// spanning multiple tokens resolves to the union of the covered boxes.
    fn locate(&self, tokens: &[Token], literal: &str) -> Vec<BBox> {
        if literal.is_empty() {
            return Vec::new();
        }
        let mut boxes = Vec::new();
        for (at, matched) in self.full.match_indices(literal) {
            let mut bbox: Option<BBox> = None;
            let mut last_idx = None;
            for offset in at..at + matched.len() {
                if let Some(idx) = self.byte_to_token[offset] {
                    if last_idx == Some(idx) {
                        continue;
                    }
                    last_idx = Some(idx);
                    bbox = Some(match bbox {
                        Some(b) => b.union(&tokens[idx].bbox),
                        None => tokens[idx].bbox,
                    });
                }
            }
            if let Some(b) = bbox {
                boxes.push(b);
            }
        }
        boxes
    }
}

/// Context window around a match: `CONTEXT_CHARS` characters before and
/// after, newlines collapsed to spaces.
fn context_window(text: &str, start: usize, end: usize) -> String {
    let before: Vec<char> = text[..start].chars().rev().take(CONTEXT_CHARS).collect();
    let mut context: String = before.into_iter().rev().collect();
    context.push_str(&text[start..end]);
    context.extend(text[end..].chars().take(CONTEXT_CHARS));
    context
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

/// Extract all references on one page.
///
/// Matches are produced in text order. Failures are isolated per match: a
/// literal with no located bounding box is dropped with a
/// [`ScanWarningCode::NoSourceRect`] warning and extraction continues.
pub fn extract_page(
    content: &PageContent,
    spec: &PatternSpec,
    page_index: usize,
    document_id: &str,
) -> ScanResult<Vec<Reference>> {
    let index = TokenIndex::build(&content.tokens);
    let mut located: HashMap<String, Vec<BBox>> = HashMap::new();
    let mut occurrence: HashMap<String, usize> = HashMap::new();
    let mut references = Vec::new();
    let mut warnings = Vec::new();

    for caps in spec.regex.captures_iter(&content.text) {
        let whole = caps.get(0).unwrap();
        let literal = whole.as_str();

        let groups = [
            caps.get(1).map(|g| g.as_str()).unwrap_or(""),
            caps.get(2).map(|g| g.as_str()).unwrap_or(""),
            caps.get(3).map(|g| g.as_str()).unwrap_or(""),
        ];
        let (page_token, column_token, row_token) = spec.assign_roles(&groups);

        let boxes = located
            .entry(literal.to_string())
            .or_insert_with(|| index.locate(&content.tokens, literal));
        if boxes.is_empty() {
            warnings.push(
                ScanWarning::on_page(
                    ScanWarningCode::NoSourceRect,
                    "no bounding box located for matched literal",
                    page_index,
                )
                .with_element(literal),
            );
            continue;
        }

        // The Nth match of this literal consumes the Nth located box; past
        // the end, the last box is reused (known ambiguity, kept as-is).
        let wanted = *occurrence.get(literal).unwrap_or(&0);
        let used = wanted.min(boxes.len() - 1);
        if wanted < boxes.len() {
            *occurrence.entry(literal.to_string()).or_insert(0) += 1;
        }

        references.push(Reference {
            literal_text: literal.to_string(),
            page_token: page_token.to_string(),
            column_token: column_token.to_string(),
            row_token: row_token.to_string(),
            source_page_index: page_index,
            source_rect: boxes[used],
            context_text: context_window(&content.text, whole.start(), whole.end()),
            occurrence_index: used + 1,
            document_id: document_id.to_string(),
        });
    }

    ScanResult::with_warnings(references, warnings)
}
