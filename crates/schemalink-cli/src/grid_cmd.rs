use std::path::Path;

use schemalink::{DocumentReader, GridRecord};
use schemalink::schemalink_core::{AxisDetection, detect_grid};

use crate::cli::ListFormat;
use crate::shared::load_dump;

pub fn run(
    tokens: &Path,
    page: usize,
    save: Option<&Path>,
    format: &ListFormat,
) -> Result<(), i32> {
    let doc = load_dump(tokens)?;
    if page == 0 || page > doc.page_count() {
        eprintln!(
            "Error: page {page} out of range (document has {} pages)",
            doc.page_count()
        );
        return Err(1);
    }
    let content = doc.page(page - 1).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    let detection = detect_grid(&content.tokens, content.width, content.height);
    if detection.is_empty() {
        eprintln!("Error: no grid labels found on page {page}");
        return Err(1);
    }

    match format {
        ListFormat::Text => write_text(&detection),
        ListFormat::Json => write_json(&detection),
    }

    if let Some(path) = save {
        let Some(boundaries) = detection.boundaries(content.width, content.height) else {
            eprintln!("Error: both axes are needed to save a grid record");
            return Err(1);
        };
        let record = GridRecord {
            column_lines: boundaries.column_positions().to_vec(),
            row_lines: boundaries.row_positions().to_vec(),
            page_width: content.width,
            page_height: content.height,
            page_num: page - 1,
            zoom_factor: 1.0,
        };
        record.save(path).map_err(|e| {
            eprintln!("Error: {e}");
            1
        })?;
        eprintln!("Grid record written to {}", path.display());
    }
    Ok(())
}

fn format_axis(axis: &AxisDetection) -> String {
    let positions: Vec<String> = axis.positions.iter().map(|p| format!("{p:.1}")).collect();
    format!(
        "{} cells, labels [{}], boundaries [{}]",
        axis.cell_count(),
        axis.labels.join(" "),
        positions.join(" ")
    )
}

fn write_text(detection: &schemalink::schemalink_core::GridDetection) {
    match &detection.columns {
        Some(axis) => println!("columns: {}", format_axis(axis)),
        None => println!("columns: not detected"),
    }
    match &detection.rows {
        Some(axis) => println!("rows: {}", format_axis(axis)),
        None => println!("rows: not detected"),
    }
    println!(
        "margins: left {:.1}% top {:.1}%",
        detection.margin_left_pct, detection.margin_top_pct
    );
}

fn axis_to_json(axis: &AxisDetection) -> serde_json::Value {
    serde_json::json!({
        "labels": axis.labels,
        "boundaries": axis.positions,
        "ratios": axis.ratios,
        "cells": axis.cell_count(),
    })
}

fn write_json(detection: &schemalink::schemalink_core::GridDetection) {
    let value = serde_json::json!({
        "columns": detection.columns.as_ref().map(axis_to_json),
        "rows": detection.rows.as_ref().map(axis_to_json),
        "margin_left_pct": detection.margin_left_pct,
        "margin_top_pct": detection.margin_top_pct,
    });
    println!("{value}");
}
