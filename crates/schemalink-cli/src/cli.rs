use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Detect grid references in schematic PDFs and rewrite them as clickable
/// navigation links.
#[derive(Debug, Parser)]
#[command(name = "schemalink", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the built-in reference styles
    Patterns {
        /// Output format
        #[arg(long, value_enum, default_value_t = ListFormat::Text)]
        format: ListFormat,
    },

    /// Detect references in an extracted token dump
    Detect {
        /// Path to the token dump (JSON form of the extracted pages)
        #[arg(value_name = "TOKENS")]
        tokens: PathBuf,

        /// Reference style name (see `patterns`)
        #[arg(long, conflicts_with = "template")]
        style: Option<String>,

        /// Custom pattern template with {P}/{C}/{F} placeholders, or a raw regex
        #[arg(long)]
        template: Option<String>,

        /// Style record to take the pattern from
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Auto-detect the title block grid from page labels
    Grid {
        /// Path to the token dump
        #[arg(value_name = "TOKENS")]
        tokens: PathBuf,

        /// Page to scan for grid labels (1-indexed)
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Write the detected boundaries as a grid record
        #[arg(long, value_name = "FILE")]
        save: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = ListFormat::Text)]
        format: ListFormat,
    },

    /// Detect references in one PDF and write the linked document
    Link {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Token dump for the PDF's pages
        #[arg(long, value_name = "FILE")]
        tokens: PathBuf,

        /// Grid boundary record (otherwise auto-detect, then proportional fallback)
        #[arg(long, value_name = "FILE")]
        grid: Option<PathBuf>,

        /// Style record (pattern, highlight style, save options)
        #[arg(long, value_name = "FILE")]
        style_config: Option<PathBuf>,

        /// Output path. Default: '<input>_linked.pdf'
        #[arg(long, conflicts_with = "in_place")]
        output: Option<PathBuf>,

        /// Overwrite the input file
        #[arg(long)]
        in_place: bool,

        /// Columns for the proportional fallback grid
        #[arg(long, default_value_t = 10)]
        cols: usize,

        /// Rows for the proportional fallback grid
        #[arg(long, default_value_t = 8)]
        rows: usize,

        /// Left/right margin as a percentage of page width
        #[arg(long, default_value_t = 5.0)]
        margin_left: f64,

        /// Top/bottom margin as a percentage of page height
        #[arg(long, default_value_t = 5.0)]
        margin_top: f64,

        /// Comma-separated relative column widths (e.g. '1,1,2,1')
        #[arg(long)]
        col_ratios: Option<String>,

        /// Comma-separated relative row heights
        #[arg(long)]
        row_ratios: Option<String>,
    },

    /// Process a whole drawing set from a job manifest
    Batch {
        /// Manifest: JSON array of { "pdf", "tokens", "output" } entries
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,

        /// Grid boundary record shared by all documents
        #[arg(long, value_name = "FILE")]
        grid: Option<PathBuf>,

        /// Style record (pattern, highlight style, save options)
        #[arg(long, value_name = "FILE")]
        style_config: Option<PathBuf>,
    },
}

/// Output format for reference listings.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Plain text (tab-separated)
    Text,
    /// JSON output
    Json,
    /// CSV output
    Csv,
}

/// Output format for patterns/grid subcommands.
#[derive(Debug, Clone, ValueEnum)]
pub enum ListFormat {
    /// Plain text output
    Text,
    /// JSON output
    Json,
}
