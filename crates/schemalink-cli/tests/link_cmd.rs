//! Integration tests for the `link` subcommand.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("schemalink").unwrap()
}

/// Minimal two-page PDF.
fn build_pdf(path: &Path) {
    use lopdf::{Document, Object, Stream, dictionary};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut kids = Vec::new();
    for _ in 0..2 {
        let content_id = doc.add_object(Stream::new(dictionary! {}, b"".to_vec()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(612), Object::Integer(792)],
            "Contents" => Object::Reference(content_id),
        });
        kids.push(Object::Reference(page_id));
    }
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(2),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.save(path).unwrap();
}

/// Token dump matching the fixture: one reference to page 2 on page 1.
fn write_dump(path: &Path) {
    let dump = serde_json::json!([
        {
            "width": 612.0,
            "height": 792.0,
            "text": "continues at /2.1-A",
            "tokens": [
                { "text": "/2.1-A", "bbox": { "x0": 72.0, "top": 60.0, "x1": 130.0, "bottom": 72.0 } }
            ]
        },
        { "width": 612.0, "height": 792.0, "text": "", "tokens": [] }
    ]);
    std::fs::write(path, dump.to_string()).unwrap();
}

#[test]
fn link_writes_annotated_output() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("doc.pdf");
    let dump = dir.path().join("doc.tokens.json");
    let output = dir.path().join("doc_out.pdf");
    build_pdf(&pdf);
    write_dump(&dump);

    cmd()
        .args([
            "link",
            pdf.to_str().unwrap(),
            "--tokens",
            dump.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("References found: 1"))
        .stdout(predicate::str::contains("Links written: 1"));

    let doc = lopdf::Document::load(&output).unwrap();
    let pages: Vec<_> = doc.get_pages().values().cloned().collect();
    let page = doc.get_dictionary(pages[0]).unwrap();
    let annots = page.get(b"Annots").unwrap().as_array().unwrap();
    assert_eq!(annots.len(), 1);
}

#[test]
fn link_default_output_name() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("drawing.pdf");
    let dump = dir.path().join("drawing.tokens.json");
    build_pdf(&pdf);
    write_dump(&dump);

    cmd()
        .args([
            "link",
            pdf.to_str().unwrap(),
            "--tokens",
            dump.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert!(dir.path().join("drawing_linked.pdf").exists());
}

#[test]
fn link_in_place_overwrites_input() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("doc.pdf");
    let dump = dir.path().join("doc.tokens.json");
    build_pdf(&pdf);
    write_dump(&dump);

    cmd()
        .args([
            "link",
            pdf.to_str().unwrap(),
            "--tokens",
            dump.to_str().unwrap(),
            "--in-place",
        ])
        .assert()
        .success();

    let doc = lopdf::Document::load(&pdf).unwrap();
    let pages: Vec<_> = doc.get_pages().values().cloned().collect();
    let page = doc.get_dictionary(pages[0]).unwrap();
    assert!(page.get(b"Annots").is_ok());
}

#[test]
fn link_with_grid_record() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("doc.pdf");
    let dump = dir.path().join("doc.tokens.json");
    let grid = dir.path().join("grid_config.json");
    let output = dir.path().join("out.pdf");
    build_pdf(&pdf);
    write_dump(&dump);
    std::fs::write(
        &grid,
        serde_json::json!({
            "column_lines": [0.0, 200.0, 400.0, 612.0],
            "row_lines": [0.0, 300.0, 600.0, 792.0],
            "page_width": 612.0,
            "page_height": 792.0
        })
        .to_string(),
    )
    .unwrap();

    cmd()
        .args([
            "link",
            pdf.to_str().unwrap(),
            "--tokens",
            dump.to_str().unwrap(),
            "--grid",
            grid.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Links written: 1"));
}

#[test]
fn link_missing_pdf_fails() {
    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("doc.tokens.json");
    write_dump(&dump);

    cmd()
        .args([
            "link",
            dir.path().join("absent.pdf").to_str().unwrap(),
            "--tokens",
            dump.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn link_quiet_with_disable_popups() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("doc.pdf");
    let dump = dir.path().join("doc.tokens.json");
    let styles = dir.path().join("styles_config.json");
    let output = dir.path().join("out.pdf");
    build_pdf(&pdf);
    write_dump(&dump);
    std::fs::write(
        &styles,
        serde_json::json!({ "disable_popups": true }).to_string(),
    )
    .unwrap();

    let assert = cmd()
        .args([
            "link",
            pdf.to_str().unwrap(),
            "--tokens",
            dump.to_str().unwrap(),
            "--style-config",
            styles.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.is_empty());
    assert!(output.exists());
}
