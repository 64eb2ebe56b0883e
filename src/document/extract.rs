//! Single-page document materialization.

use std::collections::HashSet;

use lopdf::{dictionary, Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};

/// Page attributes that may be inherited from the page tree.
const INHERITABLE_KEYS: &[&[u8]] = &[b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic `Parent` chains in damaged files.
const MAX_TREE_DEPTH: usize = 64;

/// Produce a standalone PDF containing only the page at zero-based `index`.
///
/// Only the objects reachable from the page are copied, so the cost depends
/// on the page, not on the size of the document. Inherited attributes are
/// written onto the page itself. References to other pages (link targets,
/// annotation owners) are left dangling, which readers treat as null.
pub fn extract_page(doc: &LopdfDocument, index: usize) -> Result<Vec<u8>> {
    let pages = doc.get_pages();
    let page_count = pages.len();
    if index >= page_count {
        return Err(Error::PageOutOfRange(index, page_count));
    }
    let page_num = index as u32 + 1;

    let page_id = *pages
        .get(&page_num)
        .ok_or(Error::PageOutOfRange(index, page_count))?;

    let mut page = doc
        .get_dictionary(page_id)
        .map_err(|e| Error::PageExtraction(format!("Page {}: {}", page_num, e)))?
        .clone();
    for key in INHERITABLE_KEYS {
        if !page.has(key) {
            if let Some(value) = inherited(doc, &page, key) {
                page.set(key.to_vec(), value.clone());
            }
        }
    }
    page.remove(b"Parent");

    let mut single = LopdfDocument::with_version(doc.version.clone());
    single.max_id = doc.max_id;
    copy_reachable(doc, &mut single, &page, page_id);

    let pages_id = single.new_object_id();
    page.set("Parent", pages_id);
    single.objects.insert(page_id, Object::Dictionary(page));
    single.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1_i64,
        }),
    );
    let catalog_id = single.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    single.trailer.set("Root", catalog_id);
    single.renumber_objects();

    let mut buffer = Vec::new();
    single
        .save_to(&mut buffer)
        .map_err(|e| Error::PageExtraction(format!("Page {}: {}", page_num, e)))?;

    log::trace!(
        "Extracted page {} ({} objects, {} bytes)",
        page_num,
        single.objects.len(),
        buffer.len()
    );
    Ok(buffer)
}

/// Look up `key` on the ancestors of a page.
fn inherited<'a>(doc: &'a LopdfDocument, page: &Dictionary, key: &[u8]) -> Option<&'a Object> {
    let mut parent = page.get(b"Parent").and_then(|p| p.as_reference()).ok();
    for _ in 0..MAX_TREE_DEPTH {
        let node = doc.get_dictionary(parent?).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
        parent = node.get(b"Parent").and_then(|p| p.as_reference()).ok();
    }
    None
}

/// Copy every object reachable from `page` into `target`, keeping ids.
///
/// `Parent` links and other page tree nodes are not followed.
fn copy_reachable(
    source: &LopdfDocument,
    target: &mut LopdfDocument,
    page: &Dictionary,
    page_id: ObjectId,
) {
    let mut seen: HashSet<ObjectId> = HashSet::from([page_id]);
    let mut pending = Vec::new();
    collect_dict_refs(page, &mut pending);

    while let Some(id) = pending.pop() {
        if !seen.insert(id) {
            continue;
        }
        let Ok(object) = source.get_object(id) else {
            continue;
        };
        if is_page_tree_node(object) {
            continue;
        }
        collect_refs(object, &mut pending);
        target.objects.insert(id, object.clone());
    }
}

fn collect_refs(object: &Object, out: &mut Vec<ObjectId>) {
    match object {
        Object::Reference(id) => out.push(*id),
        Object::Array(items) => items.iter().for_each(|item| collect_refs(item, out)),
        Object::Dictionary(dict) => collect_dict_refs(dict, out),
        Object::Stream(stream) => collect_dict_refs(&stream.dict, out),
        _ => {}
    }
}

fn collect_dict_refs(dict: &Dictionary, out: &mut Vec<ObjectId>) {
    for (key, value) in dict.iter() {
        if key.as_slice() != b"Parent" {
            collect_refs(value, out);
        }
    }
}

fn is_page_tree_node(object: &Object) -> bool {
    let Object::Dictionary(dict) = object else {
        return false;
    };
    matches!(
        dict.get(b"Type").and_then(|t| t.as_name()),
        Ok(b"Page") | Ok(b"Pages")
    )
}
