use std::io::{self, IsTerminal, Write};
use std::path::Path;

use schemalink::schemalink_core::{PatternSpec, compile_named, compile_template};
use schemalink::{GridRecord, MemoryDocument, load_style_config};

/// Load a token dump with user-friendly error messages.
///
/// Returns `Err(1)` with a message printed to stderr if the file is missing
/// or not a valid dump.
pub fn load_dump(path: &Path) -> Result<MemoryDocument, i32> {
    if !path.exists() {
        eprintln!("Error: file not found: {}", path.display());
        return Err(1);
    }
    MemoryDocument::from_dump(path).map_err(|e| {
        eprintln!("Error: failed to load token dump: {e}");
        1
    })
}

/// Resolve the reference pattern from the command-line flags: an explicit
/// template wins, then a style name, then the pattern in a style record,
/// then the default style.
pub fn resolve_pattern(
    style: Option<&str>,
    template: Option<&str>,
    config: Option<&Path>,
) -> Result<PatternSpec, i32> {
    let result = if let Some(template) = template {
        compile_template(template)
    } else if let Some(style) = style {
        compile_named(style)
    } else if let Some(config) = config {
        let style = load_style_config(config).map_err(|e| {
            eprintln!("Error: {e}");
            1
        })?;
        style.compile_pattern()
    } else {
        compile_named("/1.0-A")
    };
    result.map_err(|e| {
        eprintln!("Error: {e}");
        1
    })
}

/// Load a grid boundary record.
pub fn load_grid_record(path: &Path) -> Result<GridRecord, i32> {
    GridRecord::load(path).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })
}

/// Escape a string for CSV output.
///
/// If the text contains commas, double quotes, or newlines, wraps it in
/// double quotes and escapes any internal double quotes by doubling them.
pub fn csv_escape(text: &str) -> String {
    if text.contains(',') || text.contains('"') || text.contains('\n') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// A progress reporter that prints "Processing N/M..." to stderr, but only
/// when stderr is connected to a TTY.
pub struct ProgressReporter {
    total: usize,
    is_tty: bool,
}

impl ProgressReporter {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            is_tty: io::stderr().is_terminal(),
        }
    }

    /// Report progress for item `current` (1-indexed).
    pub fn report(&self, current: usize) {
        if self.is_tty {
            eprint!("\rProcessing {}/{}...", current, self.total);
            let _ = io::stderr().flush();
        }
    }

    /// Clear the progress line.
    pub fn finish(&self) {
        if self.is_tty {
            eprint!("\r\x1b[2K");
            let _ = io::stderr().flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_escape_plain_text_unchanged() {
        assert_eq!(csv_escape("hello"), "hello");
    }

    #[test]
    fn csv_escape_quotes_and_commas() {
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn resolve_pattern_template_wins() {
        let spec = resolve_pattern(Some("/1.0-A"), Some("{P}:{C}"), None).unwrap();
        assert!(spec.regex.is_match("4:2"));
    }

    #[test]
    fn resolve_pattern_defaults_to_slash_style() {
        let spec = resolve_pattern(None, None, None).unwrap();
        assert!(spec.regex.is_match("/12.3-A"));
    }
}
