//! PDF page operations for the Sharp Toolkit backend
//!
//! This crate provides the document transforms behind the toolkit's
//! endpoints: extracting a page selection into a new document and merging
//! several documents into one, both built on lopdf. Everything operates on
//! in-memory byte buffers; callers own the upload and the result.

mod document;
pub mod error;
pub mod merge;
pub mod selection;
pub mod split;

pub use error::SharpToolsError;
pub use merge::merge_documents;
pub use selection::parse_selection;
pub use split::split_document;

/// Parse PDF bytes and return page count
pub fn page_count(bytes: &[u8]) -> Result<u32, SharpToolsError> {
    let doc = lopdf::Document::load_mem(bytes)
        .map_err(|e| SharpToolsError::ParseError(e.to_string()))?;
    Ok(doc.get_pages().len() as u32)
}
