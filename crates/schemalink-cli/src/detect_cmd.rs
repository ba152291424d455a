use std::path::Path;

use schemalink::schemalink_core::Reference;
use schemalink::{CancelToken, scan_document};

use crate::cli::OutputFormat;
use crate::shared::{csv_escape, load_dump, resolve_pattern};

pub fn run(
    tokens: &Path,
    style: Option<&str>,
    template: Option<&str>,
    config: Option<&Path>,
    format: &OutputFormat,
) -> Result<(), i32> {
    let doc = load_dump(tokens)?;
    let spec = resolve_pattern(style, template, config)?;

    let result = scan_document(&doc, &spec, &CancelToken::new());
    for warning in &result.warnings {
        eprintln!("Warning: {warning}");
    }

    match format {
        OutputFormat::Text => write_text(&result.value),
        OutputFormat::Json => write_json(&result.value),
        OutputFormat::Csv => write_csv(&result.value),
    }
    Ok(())
}

fn write_text(references: &[Reference]) {
    println!("page\tliteral\ttarget\tcolumn\trow\tinstance\tcontext");
    for r in references {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            r.source_page_index + 1,
            r.literal_text,
            r.page_token,
            r.column_token,
            r.row_token,
            r.occurrence_index,
            r.context_text,
        );
    }
}

fn reference_to_json(r: &Reference) -> serde_json::Value {
    serde_json::json!({
        "page": r.source_page_index + 1,
        "literal": r.literal_text,
        "target_page": r.page_token,
        "column": r.column_token,
        "row": r.row_token,
        "instance": r.occurrence_index,
        "context": r.context_text,
        "x0": r.source_rect.x0,
        "top": r.source_rect.top,
        "x1": r.source_rect.x1,
        "bottom": r.source_rect.bottom,
    })
}

fn write_json(references: &[Reference]) {
    let values: Vec<serde_json::Value> = references.iter().map(reference_to_json).collect();
    println!("{}", serde_json::to_string(&values).unwrap());
}

fn write_csv(references: &[Reference]) {
    println!("page,literal,target,column,row,instance,context");
    for r in references {
        println!(
            "{},{},{},{},{},{},{}",
            r.source_page_index + 1,
            csv_escape(&r.literal_text),
            csv_escape(&r.page_token),
            csv_escape(&r.column_token),
            csv_escape(&r.row_token),
            r.occurrence_index,
            csv_escape(&r.context_text),
        );
    }
}
