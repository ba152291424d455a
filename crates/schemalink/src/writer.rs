//! PDF rewriting.
//!
//! Takes the synthesized links and produces the interactive document: one
//! invisible Link annotation per reference, each carrying a GoTo action to
//! the target page chained (via `/Next`) to a JavaScript action that calls
//! the shared highlight routine, which is installed once in the document's
//! `/Names` `/JavaScript` tree. All original page content is preserved; the
//! output is written to a sibling temp file and renamed into place so a
//! failed run never leaves a truncated document.

use std::fs;
use std::path::{Path, PathBuf};

use lopdf::{Document, Object, ObjectId, dictionary};
use schemalink_core::{NavigationLink, Script};
use tracing::{debug, warn};

use crate::error::LinkError;

/// Name under which the shared routine is registered in the `/JavaScript`
/// name tree.
const SCRIPT_NAME: &str = "SchemalinkHighlight";

/// Rewrite `input` into `output` with navigation links and the shared
/// highlight script. Returns the number of link annotations written.
///
/// `input` and `output` may be the same path; the temp-and-rename save makes
/// in-place rewriting safe.
pub fn write_linked_document(
    input: &Path,
    output: &Path,
    links: &[NavigationLink],
    script: &Script,
) -> Result<usize, LinkError> {
    let mut doc = Document::load(input)?;
    let pages: Vec<ObjectId> = doc.get_pages().values().cloned().collect();

    let mut written = 0;
    for link in links {
        let Some(&source_page) = pages.get(link.source_page_index) else {
            warn!(page = link.source_page_index, literal = %link.literal_text, "source page missing, link skipped");
            continue;
        };
        let Some(&target_page) = pages.get(link.target_page_index) else {
            warn!(page = link.target_page_index, literal = %link.literal_text, "target page missing, link skipped");
            continue;
        };

        let annot_id = doc.add_object(link_annotation(link, target_page));
        attach_annotation(&mut doc, source_page, annot_id)?;
        written += 1;
    }

    install_script(&mut doc, &script.render())?;
    debug!(links = written, output = %output.display(), "document rewritten");

    save_atomic(&mut doc, output)
        .inspect_err(|_| {
            let _ = fs::remove_file(temp_path(output));
        })?;
    Ok(written)
}

/// The invisible link annotation: GoTo first, then the highlight call.
fn link_annotation(link: &NavigationLink, target_page: ObjectId) -> lopdf::Dictionary {
    let js_action = dictionary! {
        "S" => "JavaScript",
        "JS" => Object::string_literal(link.script_invocation.as_str()),
    };
    let mut goto_action = dictionary! {
        "S" => "GoTo",
        // /XYZ wants left and top; viewers expect integer coordinates here.
        "D" => vec![
            Object::Reference(target_page),
            "XYZ".into(),
            Object::Integer(link.target_rect[0] as i64),
            Object::Integer(link.target_rect[3] as i64),
            Object::Integer(0),
        ],
    };
    goto_action.set("Next", Object::Dictionary(js_action));

    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => link.source_rect.iter().map(|&v| Object::Real(v as f32)).collect::<Vec<_>>(),
        "Border" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(0)],
        "A" => Object::Dictionary(goto_action),
        "H" => "N",
    }
}

/// Append an annotation reference to a page's `/Annots`, which may be
/// absent, an inline array, or a reference to a shared array.
fn attach_annotation(
    doc: &mut Document,
    page_id: ObjectId,
    annot_id: ObjectId,
) -> Result<(), LinkError> {
    let indirect_annots = {
        let page = doc.get_dictionary(page_id)?;
        match page.get(b"Annots") {
            Ok(Object::Reference(id)) => Some(*id),
            _ => None,
        }
    };

    if let Some(array_id) = indirect_annots {
        doc.get_object_mut(array_id)?
            .as_array_mut()?
            .push(Object::Reference(annot_id));
        return Ok(());
    }

    let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
    match page.get_mut(b"Annots") {
        Ok(Object::Array(array)) => array.push(Object::Reference(annot_id)),
        _ => page.set("Annots", vec![Object::Reference(annot_id)]),
    }
    Ok(())
}

/// Register `script_text` as a document-level script in the catalog's
/// `/Names` `/JavaScript` tree. An earlier schemalink script is replaced,
/// not duplicated.
fn install_script(doc: &mut Document, script_text: &str) -> Result<(), LinkError> {
    let action_id = doc.add_object(dictionary! {
        "S" => "JavaScript",
        "JS" => Object::string_literal(script_text),
    });
    let js_tree = dictionary! {
        "Names" => vec![
            Object::string_literal(SCRIPT_NAME),
            Object::Reference(action_id),
        ],
    };

    let root_id = doc.trailer.get(b"Root")?.as_reference()?;
    let indirect_names = {
        let catalog = doc.get_dictionary(root_id)?;
        match catalog.get(b"Names") {
            Ok(Object::Reference(id)) => Some(*id),
            _ => None,
        }
    };

    let names = if let Some(names_id) = indirect_names {
        doc.get_object_mut(names_id)?.as_dict_mut()?
    } else {
        let catalog = doc.get_object_mut(root_id)?.as_dict_mut()?;
        if !matches!(catalog.get(b"Names"), Ok(Object::Dictionary(_))) {
            catalog.set("Names", Object::Dictionary(dictionary! {}));
        }
        match catalog.get_mut(b"Names") {
            Ok(Object::Dictionary(dict)) => dict,
            _ => unreachable!("Names was just set to a dictionary"),
        }
    };
    names.set("JavaScript", Object::Dictionary(js_tree));
    Ok(())
}

fn temp_path(output: &Path) -> PathBuf {
    let mut tmp = output.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

fn save_atomic(doc: &mut Document, output: &Path) -> Result<(), LinkError> {
    let tmp = temp_path(output);
    doc.save(&tmp)?;
    fs::rename(&tmp, output)?;
    Ok(())
}
