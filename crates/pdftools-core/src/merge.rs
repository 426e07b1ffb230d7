//! PDF merge
//!
//! Combines uploaded PDFs into a single document, preserving upload order.

use crate::error::PdfToolsError;
use lopdf::{Document, Object, ObjectId};
use std::collections::BTreeMap;

/// Merge documents into one, pages in input order.
///
/// The first document becomes the destination. Every subsequent source has
/// its object IDs shifted past the destination's current max id so nothing
/// collides, its objects are copied over, and its page references are
/// appended to the destination page tree.
pub fn merge_documents(documents: Vec<Vec<u8>>) -> Result<Vec<u8>, PdfToolsError> {
    if documents.is_empty() {
        return Err(PdfToolsError::Operation("No documents to merge".into()));
    }

    if documents.len() == 1 {
        return Ok(documents.into_iter().next().unwrap());
    }

    let mut loaded = Vec::with_capacity(documents.len());
    for (i, bytes) in documents.iter().enumerate() {
        let doc = Document::load_mem(bytes).map_err(|e| {
            PdfToolsError::Parse(format!("Failed to load document {}: {}", i, e))
        })?;
        loaded.push(doc);
    }

    let mut dest = loaded.remove(0);
    let mut max_id = dest.max_id;
    let mut page_refs = page_references(&dest);

    for source in loaded {
        let source_pages = page_references(&source);
        let offset = max_id;

        let mut shifted = BTreeMap::new();
        for (old_id, object) in source.objects.into_iter() {
            shifted.insert((old_id.0 + offset, old_id.1), shift_references(object, offset));
        }
        dest.objects.extend(shifted);

        for (num, gen) in source_pages {
            page_refs.push((num + offset, gen));
        }

        max_id = (source.max_id + offset).max(max_id);
    }

    rebuild_page_tree(&mut dest, page_refs)?;
    dest.max_id = max_id;
    dest.compress();

    let mut buffer = Vec::new();
    dest.save_to(&mut buffer)
        .map_err(|e| PdfToolsError::Operation(format!("Failed to save merged PDF: {}", e)))?;

    Ok(buffer)
}

fn page_references(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().values().copied().collect()
}

/// Shift every indirect reference inside `obj` by `offset`.
fn shift_references(obj: Object, offset: u32) -> Object {
    match obj {
        Object::Reference(id) => Object::Reference((id.0 + offset, id.1)),
        Object::Array(items) => Object::Array(
            items
                .into_iter()
                .map(|o| shift_references(o, offset))
                .collect(),
        ),
        Object::Dictionary(mut dict) => {
            for (_, value) in dict.iter_mut() {
                *value = shift_references(value.clone(), offset);
            }
            Object::Dictionary(dict)
        }
        Object::Stream(mut stream) => {
            for (_, value) in stream.dict.iter_mut() {
                *value = shift_references(value.clone(), offset);
            }
            Object::Stream(stream)
        }
        other => other,
    }
}

/// Point the destination's root Pages node at the combined page list.
fn rebuild_page_tree(doc: &mut Document, page_refs: Vec<ObjectId>) -> Result<(), PdfToolsError> {
    let catalog_id = doc
        .trailer
        .get(b"Root")
        .map_err(|_| PdfToolsError::Operation("No Root in trailer".into()))?
        .as_reference()
        .map_err(|_| PdfToolsError::Operation("Root is not a reference".into()))?;

    let pages_id = doc
        .objects
        .get(&catalog_id)
        .ok_or_else(|| PdfToolsError::Operation("Catalog not found".into()))?
        .as_dict()
        .map_err(|_| PdfToolsError::Operation("Invalid catalog".into()))?
        .get(b"Pages")
        .map_err(|_| PdfToolsError::Operation("No Pages in catalog".into()))?
        .as_reference()
        .map_err(|_| PdfToolsError::Operation("Pages is not a reference".into()))?;

    match doc.objects.get_mut(&pages_id) {
        Some(Object::Dictionary(pages_dict)) => {
            let kids: Vec<Object> = page_refs.iter().map(|&id| Object::Reference(id)).collect();
            pages_dict.set("Count", Object::Integer(kids.len() as i64));
            pages_dict.set("Kids", Object::Array(kids));
        }
        _ => return Err(PdfToolsError::Operation("Invalid pages dictionary".into())),
    }

    // Every page now hangs directly off the root node
    for (_, object) in doc.objects.iter_mut() {
        if let Object::Dictionary(dict) = object {
            if matches!(dict.get(b"Type"), Ok(Object::Name(name)) if name == b"Page") {
                dict.set("Parent", Object::Reference(pages_id));
            }
        }
    }

    Ok(())
}
