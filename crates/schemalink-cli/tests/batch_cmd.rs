//! Integration tests for the `batch` subcommand.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("schemalink").unwrap()
}

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

fn write_dump(path: &Path) {
    let dump = serde_json::json!([
        {
            "width": 612.0,
            "height": 792.0,
            "text": "see /2.1-A",
            "tokens": [
                { "text": "/2.1-A", "bbox": { "x0": 72.0, "top": 60.0, "x1": 130.0, "bottom": 72.0 } }
            ]
        },
        { "width": 612.0, "height": 792.0, "text": "", "tokens": [] }
    ]);
    std::fs::write(path, dump.to_string()).unwrap();
}

#[test]
fn batch_processes_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let mut manifest_entries = Vec::new();
    for name in ["a", "b"] {
        let pdf = dir.path().join(format!("{name}.pdf"));
        let dump = dir.path().join(format!("{name}.tokens.json"));
        build_pdf(&pdf);
        write_dump(&dump);
        manifest_entries.push(serde_json::json!({
            "pdf": pdf,
            "tokens": dump,
            "output": dir.path().join(format!("{name}_linked.pdf")),
        }));
    }
    let manifest = dir.path().join("manifest.json");
    std::fs::write(
        &manifest,
        serde_json::Value::Array(manifest_entries).to_string(),
    )
    .unwrap();

    cmd()
        .args(["batch", manifest.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Processed 2 documents: 2 references, 2 links, 0 failed",
        ));

    assert!(dir.path().join("a_linked.pdf").exists());
    assert!(dir.path().join("b_linked.pdf").exists());
}

#[test]
fn batch_continues_past_failed_document() {
    let dir = tempfile::tempdir().unwrap();
    let good_pdf = dir.path().join("good.pdf");
    let good_dump = dir.path().join("good.tokens.json");
    let bad_dump = dir.path().join("bad.tokens.json");
    build_pdf(&good_pdf);
    write_dump(&good_dump);
    write_dump(&bad_dump);

    // First entry's PDF does not exist; the second must still be written.
    let manifest = dir.path().join("manifest.json");
    std::fs::write(
        &manifest,
        serde_json::json!([
            {
                "pdf": dir.path().join("missing.pdf"),
                "tokens": bad_dump,
                "output": dir.path().join("missing_linked.pdf"),
            },
            {
                "pdf": good_pdf,
                "tokens": good_dump,
                "output": dir.path().join("good_linked.pdf"),
            }
        ])
        .to_string(),
    )
    .unwrap();

    cmd()
        .args(["batch", manifest.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("FAILED"))
        .stdout(predicate::str::contains("1 failed"));

    assert!(dir.path().join("good_linked.pdf").exists());
}

#[test]
fn batch_empty_manifest_fails() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("manifest.json");
    std::fs::write(&manifest, "[]").unwrap();

    cmd()
        .args(["batch", manifest.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no documents"));
}

#[test]
fn batch_invalid_manifest_fails() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("manifest.json");
    std::fs::write(&manifest, "{ not json").unwrap();

    cmd()
        .args(["batch", manifest.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid manifest"));
}
