//! Error and warning types for schemalink-core.
//!
//! Provides [`PatternError`] and [`GridError`] for fatal configuration errors,
//! [`ScanWarning`] for non-fatal issues that allow best-effort continuation,
//! and [`ScanResult`] for pairing a value with collected warnings.
//!
//! The propagation policy follows the smallest-unit rule: a bad pattern aborts
//! the run before extraction starts, a bad grid falls back to proportional
//! mode, and everything below that (a single reference, a single page) is
//! reported as a warning and skipped.

use std::fmt;

/// A style template or matcher pattern failed to compile.
///
/// Reported to the caller before any extraction takes place; the run is
/// aborted, never continued with a guessed pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternError {
    /// Human-readable description of what failed to compile.
    pub message: String,
}

impl PatternError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pattern error: {}", self.message)
    }
}

impl std::error::Error for PatternError {}

/// A grid definition is unusable for exact cell resolution.
///
/// Raised when an axis has fewer than two boundary positions, the positions
/// are not strictly increasing, or a proportional ratio is non-positive.
/// Callers fall back to proportional mode where the spec allows it.
#[derive(Debug, Clone, PartialEq)]
pub struct GridError {
    pub message: String,
}

impl GridError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "grid error: {}", self.message)
    }
}

impl std::error::Error for GridError {}

/// Machine-readable warning code for categorizing scan issues.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", content = "detail")
)]
pub enum ScanWarningCode {
    /// A reference's target page index is out of bounds or its page token
    /// could not be parsed.
    UnresolvedReference,
    /// A matched literal had no located bounding box on its page.
    NoSourceRect,
    /// A single page's text/token extraction failed; the page was skipped.
    PageScanFailed,
    /// Any other warning not covered by specific variants.
    Other(String),
}

impl ScanWarningCode {
    /// Returns the string tag for this warning code.
    pub fn as_str(&self) -> &str {
        match self {
            ScanWarningCode::UnresolvedReference => "UNRESOLVED_REFERENCE",
            ScanWarningCode::NoSourceRect => "NO_SOURCE_RECT",
            ScanWarningCode::PageScanFailed => "PAGE_SCAN_FAILED",
            ScanWarningCode::Other(_) => "OTHER",
        }
    }
}

impl fmt::Display for ScanWarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal issue encountered while scanning or synthesizing.
///
/// Warnings isolate failures to the smallest unit: a dropped reference or a
/// skipped page never aborts the document, and a failed document never aborts
/// the batch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanWarning {
    /// Machine-readable warning code.
    pub code: ScanWarningCode,
    /// Human-readable description of the warning.
    pub description: String,
    /// Page number where the warning occurred (0-indexed), if applicable.
    pub page: Option<usize>,
    /// Element context (e.g. the literal reference text).
    pub element: Option<String>,
}

impl ScanWarning {
    /// Create a warning with a specific code and description.
    pub fn with_code(code: ScanWarningCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            page: None,
            element: None,
        }
    }

    /// Create a warning with page context.
    pub fn on_page(code: ScanWarningCode, description: impl Into<String>, page: usize) -> Self {
        Self {
            code,
            description: description.into(),
            page: Some(page),
            element: None,
        }
    }

    /// Attach element context, returning the modified warning.
    pub fn with_element(mut self, element: impl Into<String>) -> Self {
        self.element = Some(element.into());
        self
    }
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.description)?;
        if let Some(page) = self.page {
            write!(f, " (page {page})")?;
        }
        if let Some(ref element) = self.element {
            write!(f, " [{element}]")?;
        }
        Ok(())
    }
}

/// Result wrapper that pairs a value with collected warnings.
///
/// Used when scanning can partially succeed with non-fatal issues.
#[derive(Debug, Clone)]
pub struct ScanResult<T> {
    /// The produced value.
    pub value: T,
    /// Warnings collected along the way.
    pub warnings: Vec<ScanWarning>,
}

impl<T> ScanResult<T> {
    /// Create a result with no warnings.
    pub fn ok(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Create a result with warnings.
    pub fn with_warnings(value: T, warnings: Vec<ScanWarning>) -> Self {
        Self { value, warnings }
    }

    /// Returns true if there are no warnings.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Transform the value while preserving warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ScanResult<U> {
        ScanResult {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_error_display() {
        let err = PatternError::new("unbalanced group");
        assert_eq!(err.to_string(), "pattern error: unbalanced group");
    }

    #[test]
    fn pattern_error_implements_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(PatternError::new("bad"));
        assert_eq!(err.to_string(), "pattern error: bad");
    }

    #[test]
    fn grid_error_display() {
        let err = GridError::new("axis needs at least 2 boundaries");
        assert_eq!(err.to_string(), "grid error: axis needs at least 2 boundaries");
    }

    #[test]
    fn warning_code_tags() {
        assert_eq!(
            ScanWarningCode::UnresolvedReference.as_str(),
            "UNRESOLVED_REFERENCE"
        );
        assert_eq!(ScanWarningCode::NoSourceRect.as_str(), "NO_SOURCE_RECT");
        assert_eq!(ScanWarningCode::PageScanFailed.as_str(), "PAGE_SCAN_FAILED");
        assert_eq!(ScanWarningCode::Other("x".into()).as_str(), "OTHER");
    }

    #[test]
    fn warning_display_with_context() {
        let w = ScanWarning::on_page(
            ScanWarningCode::UnresolvedReference,
            "target page 99 out of range",
            3,
        )
        .with_element("/99.1-A");
        assert_eq!(
            w.to_string(),
            "[UNRESOLVED_REFERENCE] target page 99 out of range (page 3) [/99.1-A]"
        );
    }

    #[test]
    fn warning_display_minimal() {
        let w = ScanWarning::with_code(ScanWarningCode::PageScanFailed, "token dump truncated");
        assert_eq!(w.to_string(), "[PAGE_SCAN_FAILED] token dump truncated");
    }

    #[test]
    fn scan_result_ok_is_clean() {
        let r = ScanResult::ok(7);
        assert_eq!(r.value, 7);
        assert!(r.is_clean());
    }

    #[test]
    fn scan_result_map_preserves_warnings() {
        let warnings = vec![ScanWarning::with_code(
            ScanWarningCode::NoSourceRect,
            "no box",
        )];
        let r = ScanResult::with_warnings(10, warnings).map(|v| v * 2);
        assert_eq!(r.value, 20);
        assert_eq!(r.warnings.len(), 1);
        assert!(!r.is_clean());
    }
}
