//! PDF compression
//!
//! Re-saves a document with unreferenced objects pruned and content streams
//! deflated. Output size is not guaranteed to shrink; already-optimized
//! files can come back slightly larger, and callers report both sizes
//! instead of failing.

use crate::error::PdfToolsError;
use lopdf::Document;

/// Rewrite `bytes` as a compacted PDF.
pub fn compress_document(bytes: &[u8]) -> Result<Vec<u8>, PdfToolsError> {
    let mut doc = Document::load_mem(bytes).map_err(|e| PdfToolsError::Parse(e.to_string()))?;

    doc.prune_objects();
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| PdfToolsError::Operation(format!("Save failed: {}", e)))?;

    Ok(buffer)
}
