//! Page extraction
//!
//! Builds a new PDF containing only the selected pages of the input.

use crate::error::PdfToolsError;
use lopdf::Document;
use std::collections::HashSet;

/// Extract the given pages (0-based, as produced by the range parser).
///
/// Works by deleting the complement: clone the document, drop every page
/// that wasn't selected, then prune the objects nothing references anymore.
/// Selected pages keep their document order.
pub fn extract_pages(bytes: &[u8], indices: &[u32]) -> Result<Vec<u8>, PdfToolsError> {
    if indices.is_empty() {
        return Err(PdfToolsError::InvalidRange("No pages selected".into()));
    }

    let doc = Document::load_mem(bytes).map_err(|e| PdfToolsError::Parse(e.to_string()))?;

    let page_count = doc.get_pages().len() as u32;
    for &index in indices {
        if index >= page_count {
            return Err(PdfToolsError::InvalidRange(format!(
                "Page {} does not exist (document has {} pages)",
                index + 1,
                page_count
            )));
        }
    }

    let mut new_doc = doc.clone();

    // lopdf page numbers are 1-based
    let keep: HashSet<u32> = indices.iter().map(|&i| i + 1).collect();
    let delete: Vec<u32> = (1..=page_count)
        .rev()
        .filter(|p| !keep.contains(p))
        .collect();

    for page_number in delete {
        new_doc.delete_pages(&[page_number]);
    }

    new_doc.prune_objects();
    new_doc.compress();

    let mut buffer = Vec::new();
    new_doc
        .save_to(&mut buffer)
        .map_err(|e| PdfToolsError::Operation(format!("Save failed: {}", e)))?;

    Ok(buffer)
}
