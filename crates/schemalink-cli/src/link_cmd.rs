use std::path::{Path, PathBuf};

use schemalink::schemalink_core::{Grid, SizeRatios, StyleConfig, parse_ratios, synthesize};
use schemalink::{CancelToken, GridSource, load_style_config, scan_document, write_linked_document};

use crate::shared::{load_dump, load_grid_record};

pub struct LinkArgs<'a> {
    pub file: &'a Path,
    pub tokens: &'a Path,
    pub grid: Option<&'a Path>,
    pub style_config: Option<&'a Path>,
    pub output: Option<&'a Path>,
    pub in_place: bool,
    pub cols: usize,
    pub rows: usize,
    pub margin_left: f64,
    pub margin_top: f64,
    pub col_ratios: Option<&'a str>,
    pub row_ratios: Option<&'a str>,
}

pub fn run(args: &LinkArgs) -> Result<(), i32> {
    if !args.file.exists() {
        eprintln!("Error: file not found: {}", args.file.display());
        return Err(1);
    }
    let doc = load_dump(args.tokens)?;

    let style = match args.style_config {
        Some(path) => load_style_config(path).map_err(|e| {
            eprintln!("Error: {e}");
            1
        })?,
        None => StyleConfig::default(),
    };
    let spec = style.compile_pattern().map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    let grid = resolve_grid(args, &doc)?;
    let output = output_path(args, &style);

    let scan = scan_document(&doc, &spec, &CancelToken::new());
    let synthesis = synthesize(&scan.value, &grid, &doc.page_heights(), &style);
    for warning in scan.warnings.iter().chain(&synthesis.warnings) {
        eprintln!("Warning: {warning}");
    }

    let written = write_linked_document(args.file, &output, &synthesis.links, &synthesis.script)
        .map_err(|e| {
            eprintln!("Error: {e}");
            1
        })?;

    if !style.disable_popups {
        println!("References found: {}", scan.value.len());
        println!("Links written: {written}");
        println!("Output: {}", output.display());
    }
    Ok(())
}

fn resolve_grid(args: &LinkArgs, doc: &schemalink::MemoryDocument) -> Result<Grid, i32> {
    if let Some(path) = args.grid {
        return load_grid_record(path)?.to_grid().map_err(|e| {
            eprintln!("Error: {e}");
            1
        });
    }
    let fallback = fallback_ratios(args)?;
    GridSource::Detect { page: 0, fallback }
        .resolve(doc)
        .map_err(|e| {
            eprintln!("Error: {e}");
            1
        })
}

fn fallback_ratios(args: &LinkArgs) -> Result<SizeRatios, i32> {
    let columns = parse_ratios(args.col_ratios.unwrap_or(""), args.cols);
    let rows = parse_ratios(args.row_ratios.unwrap_or(""), args.rows);
    SizeRatios::new(columns, rows, args.margin_left, args.margin_top).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })
}

fn output_path(args: &LinkArgs, style: &StyleConfig) -> PathBuf {
    if args.in_place || style.keep_original_name {
        return args.file.to_path_buf();
    }
    if let Some(output) = args.output {
        return output.to_path_buf();
    }
    let stem = args.file.file_stem().unwrap_or_default().to_string_lossy();
    args.file.with_file_name(format!("{stem}_linked.pdf"))
}
