//! PDF merge transform
//!
//! Combines multiple documents into one, pages in upload order. The first
//! document becomes the destination; every later document has its object
//! ids offset past the destination's id space before its objects and pages
//! are imported, so cross-references stay intact.

use lopdf::{Document, Object, ObjectId};

use crate::document::set_page_kids;
use crate::error::SharpToolsError;

/// Merge the given PDFs into a single document.
///
/// Errors when the input is empty; a single document is returned unchanged.
pub fn merge_documents(documents: Vec<Vec<u8>>) -> Result<Vec<u8>, SharpToolsError> {
    if documents.is_empty() {
        return Err(SharpToolsError::OperationError(
            "No documents to merge".to_string(),
        ));
    }

    if documents.len() == 1 {
        return Ok(documents.into_iter().next().unwrap());
    }

    let mut loaded = Vec::with_capacity(documents.len());
    for (i, bytes) in documents.iter().enumerate() {
        let doc = Document::load_mem(bytes).map_err(|e| {
            SharpToolsError::ParseError(format!("Failed to load document {}: {}", i, e))
        })?;
        loaded.push(doc);
    }

    let mut dest = loaded.remove(0);
    let mut max_id = dest.max_id;
    let mut page_refs = page_references(&dest);

    for source in loaded {
        let id_offset = max_id;
        let source_pages = page_references(&source);
        let source_max_id = source.max_id;

        for (old_id, object) in source.objects {
            let new_id = (old_id.0 + id_offset, old_id.1);
            dest.objects.insert(new_id, remap_object_refs(object, id_offset));
        }

        for old_ref in source_pages {
            page_refs.push((old_ref.0 + id_offset, old_ref.1));
        }

        max_id = (source_max_id + id_offset).max(max_id);
    }

    set_page_kids(&mut dest, page_refs)?;
    dest.max_id = max_id;

    // The imported catalogs and page-tree nodes are garbage now
    dest.prune_objects();
    dest.compress();

    let mut buffer = Vec::new();
    dest.save_to(&mut buffer)
        .map_err(|e| SharpToolsError::OperationError(format!("Failed to save merged PDF: {}", e)))?;

    Ok(buffer)
}

/// Page object references of a document, in page order.
fn page_references(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().values().copied().collect()
}

/// Recursively shift every reference inside an object by `offset`.
fn remap_object_refs(obj: Object, offset: u32) -> Object {
    match obj {
        Object::Reference(id) => Object::Reference((id.0 + offset, id.1)),
        Object::Array(arr) => Object::Array(
            arr.into_iter()
                .map(|o| remap_object_refs(o, offset))
                .collect(),
        ),
        Object::Dictionary(mut dict) => {
            for (_, value) in dict.iter_mut() {
                *value = remap_object_refs(value.clone(), offset);
            }
            Object::Dictionary(dict)
        }
        Object::Stream(mut stream) => {
            for (_, value) in stream.dict.iter_mut() {
                *value = remap_object_refs(value.clone(), offset);
            }
            Object::Stream(stream)
        }
        other => other,
    }
}
