//! schemalink-core: Reader-independent reference detection and link synthesis.
//!
//! This crate holds the pure building blocks of schemalink: reference pattern
//! compilation, grid models and title-block auto-detection, coordinate
//! conversion, page-level reference extraction, and navigation link
//! synthesis with the shared highlight script. Nothing here touches a PDF
//! file; page content arrives as positioned tokens and results leave as
//! plain values.

pub mod autodetect;
pub mod coords;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod grid;
pub mod pattern;
pub mod script;
pub mod style;
pub mod synth;
pub mod token;

pub use autodetect::{AxisDetection, GridDetection, detect_grid};
pub use coords::{column_index, row_index, to_native};
pub use error::{GridError, PatternError, ScanResult, ScanWarning, ScanWarningCode};
pub use extract::{CONTEXT_CHARS, Reference, extract_page};
pub use geometry::BBox;
pub use grid::{Grid, GridBoundaries, SizeRatios, parse_ratios};
pub use pattern::{
    CUSTOM_STYLE_NAME, PatternOrigin, PatternSpec, REFERENCE_STYLES, Role, StyleEntry,
    compile_named, compile_style, compile_template, style_entry,
};
pub use script::Script;
pub use style::{
    AnimationType, BlinkSpeed, Effect, FillColor, FillStyle, HighlightColor, LineStyle,
    StyleConfig,
};
pub use synth::{NavigationLink, SynthesisResult, synthesize};
pub use token::{PageContent, Token};
