//! PDF split transform
//!
//! Builds a new document from a page selection by rewriting the page tree:
//! the requested pages become the root Kids array, in request order, and
//! everything the result no longer references is pruned away.

use std::collections::HashSet;

use lopdf::{Document, ObjectId};

use crate::document::set_page_kids;
use crate::error::SharpToolsError;

/// Extract the requested pages (1-indexed) into a new document.
///
/// The selection is applied as given: order is preserved, a page requested
/// twice appears twice, and indices outside `[1, page_count]` are skipped
/// without error. An empty effective selection still produces a valid
/// document, with zero pages.
pub fn split_document(bytes: &[u8], pages: &[u32]) -> Result<Vec<u8>, SharpToolsError> {
    let doc = Document::load_mem(bytes).map_err(|e| SharpToolsError::ParseError(e.to_string()))?;

    let page_map = doc.get_pages();
    let mut out = doc.clone();

    let mut kids: Vec<ObjectId> = Vec::with_capacity(pages.len());
    let mut seen: HashSet<ObjectId> = HashSet::new();

    for &number in pages {
        if let Some(&page_id) = page_map.get(&number) {
            if seen.insert(page_id) {
                kids.push(page_id);
            } else {
                // Repeat occurrence: each page node may appear in the tree
                // only once, so clone the dictionary under a fresh id.
                kids.push(duplicate_page(&mut out, page_id)?);
            }
        }
    }

    set_page_kids(&mut out, kids)?;

    // Drop the unselected pages and whatever only they referenced
    out.prune_objects();
    out.compress();

    let mut buffer = Vec::new();
    out.save_to(&mut buffer)
        .map_err(|e| SharpToolsError::OperationError(format!("Save failed: {}", e)))?;

    Ok(buffer)
}

/// Shallow-copy a page dictionary under a new object id.
///
/// Contents and resources stay shared by reference.
fn duplicate_page(doc: &mut Document, page_id: ObjectId) -> Result<ObjectId, SharpToolsError> {
    let page = doc
        .objects
        .get(&page_id)
        .ok_or_else(|| SharpToolsError::OperationError("Page object not found".to_string()))?
        .clone();
    Ok(doc.add_object(page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{content::Content, content::Operation, Dictionary, Object, Stream};

    // Helper to create a simple PDF with N pages
    fn create_test_pdf(num_pages: u32) -> Vec<u8> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let mut page_ids = Vec::new();

        for i in 0..num_pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new(
                        "Tf",
                        vec![Object::Name(b"F1".to_vec()), Object::Integer(12)],
                    ),
                    Operation::new("Td", vec![Object::Integer(100), Object::Integer(700)]),
                    Operation::new(
                        "Tj",
                        vec![Object::String(
                            format!("Page {}", i + 1).into_bytes(),
                            lopdf::StringFormat::Literal,
                        )],
                    ),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));

            let page = Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Page".to_vec())),
                ("Parent", Object::Reference(pages_id)),
                (
                    "MediaBox",
                    Object::Array(vec![
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(612),
                        Object::Integer(792),
                    ]),
                ),
                ("Contents", Object::Reference(content_id)),
            ]);
            let page_id = doc.add_object(page);
            page_ids.push(page_id);
        }

        let pages = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Count", Object::Integer(num_pages as i64)),
            (
                "Kids",
                Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
            ),
        ]);
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]);
        let catalog_id = doc.add_object(catalog);
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    #[test]
    fn extracts_single_page() {
        let pdf = create_test_pdf(5);
        let result = split_document(&pdf, &[1]).unwrap();
        let doc = Document::load_mem(&result).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn extracts_multiple_pages() {
        let pdf = create_test_pdf(5);
        let result = split_document(&pdf, &[1, 3, 5]).unwrap();
        let doc = Document::load_mem(&result).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn preserves_request_order() {
        let pdf = create_test_pdf(5);

        // Page object ids survive the transform, so the source mapping
        // tells us which original page each output position holds.
        let source = Document::load_mem(&pdf).unwrap();
        let source_pages = source.get_pages();

        let result = split_document(&pdf, &[3, 1]).unwrap();
        let doc = Document::load_mem(&result).unwrap();
        let out_pages = doc.get_pages();

        assert_eq!(out_pages.len(), 2);
        assert_eq!(out_pages[&1], source_pages[&3]);
        assert_eq!(out_pages[&2], source_pages[&1]);
    }

    #[test]
    fn skips_out_of_range_pages() {
        let pdf = create_test_pdf(3);
        let result = split_document(&pdf, &[2, 99]).unwrap();
        let doc = Document::load_mem(&result).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn skips_page_zero() {
        let pdf = create_test_pdf(3);
        let result = split_document(&pdf, &[0, 2]).unwrap();
        let doc = Document::load_mem(&result).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn duplicate_selection_duplicates_the_page() {
        let pdf = create_test_pdf(3);
        let result = split_document(&pdf, &[2, 2]).unwrap();
        let doc = Document::load_mem(&result).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn empty_selection_yields_zero_pages() {
        let pdf = create_test_pdf(3);
        let result = split_document(&pdf, &[]).unwrap();
        let doc = Document::load_mem(&result).unwrap();
        assert_eq!(doc.get_pages().len(), 0);
    }

    #[test]
    fn full_selection_round_trips_page_count() {
        let pdf = create_test_pdf(5);
        let result = split_document(&pdf, &[1, 2, 3, 4, 5]).unwrap();
        let doc = Document::load_mem(&result).unwrap();
        assert_eq!(doc.get_pages().len(), 5);
    }

    #[test]
    fn rejects_garbage_input() {
        let result = split_document(b"not a pdf", &[1]);
        assert!(matches!(result, Err(SharpToolsError::ParseError(_))));
    }
}
