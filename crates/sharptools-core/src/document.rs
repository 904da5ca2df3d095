//! Page-tree plumbing shared by the split and merge transforms.

use lopdf::{Document, Object, ObjectId};

use crate::error::SharpToolsError;

fn operation_error(message: &str) -> SharpToolsError {
    SharpToolsError::OperationError(message.to_string())
}

/// Resolve the root Pages node via the trailer and catalog.
pub(crate) fn pages_root(doc: &Document) -> Result<ObjectId, SharpToolsError> {
    let root_obj = doc
        .trailer
        .get(b"Root")
        .map_err(|_| operation_error("No Root in trailer"))?;

    let catalog_id = root_obj
        .as_reference()
        .map_err(|_| operation_error("Root is not a reference"))?;

    let catalog = doc
        .objects
        .get(&catalog_id)
        .ok_or_else(|| operation_error("Catalog not found"))?
        .as_dict()
        .map_err(|_| operation_error("Invalid catalog"))?;

    let pages_obj = catalog
        .get(b"Pages")
        .map_err(|_| operation_error("No Pages in catalog"))?;

    pages_obj
        .as_reference()
        .map_err(|_| operation_error("Pages is not a reference"))
}

/// Replace the document's page list with `kids`, in order.
///
/// Rewrites Kids and Count on the root Pages node and reparents every kept
/// page onto it, so pages pulled out of nested page trees (or imported from
/// another document) do not keep references to nodes that no longer exist.
pub(crate) fn set_page_kids(
    doc: &mut Document,
    kids: Vec<ObjectId>,
) -> Result<(), SharpToolsError> {
    let pages_id = pages_root(doc)?;

    for &kid in &kids {
        if let Some(Object::Dictionary(page)) = doc.objects.get_mut(&kid) {
            page.set("Parent", Object::Reference(pages_id));
        }
    }

    match doc.objects.get_mut(&pages_id) {
        Some(Object::Dictionary(pages_dict)) => {
            pages_dict.set("Count", Object::Integer(kids.len() as i64));
            pages_dict.set(
                "Kids",
                Object::Array(kids.into_iter().map(Object::Reference).collect()),
            );
            Ok(())
        }
        _ => Err(operation_error("Invalid pages dictionary")),
    }
}
