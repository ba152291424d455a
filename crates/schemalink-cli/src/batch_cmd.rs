use std::path::{Path, PathBuf};

use schemalink::schemalink_core::{SizeRatios, StyleConfig};
use schemalink::{
    BatchJob, BatchReport, CancelToken, GridSource, MemoryDocument, load_style_config,
    process_document,
};
use serde::Deserialize;

use crate::shared::{ProgressReporter, load_grid_record};

/// One manifest entry: the PDF, its token dump, and the output path.
#[derive(Debug, Deserialize)]
struct ManifestEntry {
    pdf: PathBuf,
    tokens: PathBuf,
    output: PathBuf,
}

pub fn run(manifest: &Path, grid: Option<&Path>, style_config: Option<&Path>) -> Result<(), i32> {
    let entries = load_manifest(manifest)?;
    if entries.is_empty() {
        eprintln!("Error: manifest lists no documents");
        return Err(1);
    }

    let style = match style_config {
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

    let grid_source = match grid {
        Some(path) => GridSource::Exact(load_grid_record(path)?.to_grid().map_err(|e| {
            eprintln!("Error: {e}");
            1
        })?),
        None => GridSource::Detect {
            page: 0,
            fallback: default_ratios(),
        },
    };

    let mut jobs = Vec::new();
    for entry in &entries {
        let reader = MemoryDocument::from_dump(&entry.tokens).map_err(|e| {
            eprintln!("Error: {e}");
            1
        })?;
        jobs.push(BatchJob {
            reader: Box::new(reader),
            source_path: entry.pdf.clone(),
            output_path: entry.output.clone(),
        });
    }

    let cancel = CancelToken::new();
    let progress = ProgressReporter::new(jobs.len());
    let mut report = BatchReport::default();
    for (i, job) in jobs.iter().enumerate() {
        progress.report(i + 1);
        report
            .documents
            .push(process_document(job, &spec, &grid_source, &style, &cancel));
    }
    progress.finish();

    if !style.disable_popups {
        for doc in &report.documents {
            match &doc.error {
                Some(e) => println!("{}: FAILED ({e})", doc.document_id),
                None => println!(
                    "{}: {} references, {} links, {} warnings",
                    doc.document_id,
                    doc.references_found,
                    doc.links_written,
                    doc.warnings.len()
                ),
            }
        }
    }
    println!(
        "Processed {} documents: {} references, {} links, {} failed",
        report.documents.len(),
        report.total_references(),
        report.total_links(),
        report.failed_count()
    );

    if report.failed_count() == report.documents.len() {
        return Err(1);
    }
    Ok(())
}

fn load_manifest(path: &Path) -> Result<Vec<ManifestEntry>, i32> {
    if !path.exists() {
        eprintln!("Error: file not found: {}", path.display());
        return Err(1);
    }
    let text = std::fs::read_to_string(path).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;
    serde_json::from_str(&text).map_err(|e| {
        eprintln!("Error: invalid manifest {}: {e}", path.display());
        1
    })
}

fn default_ratios() -> SizeRatios {
    SizeRatios::uniform(10, 8, 5.0, 5.0).expect("uniform ratios are valid")
}
