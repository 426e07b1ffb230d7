//! PDF utility operations
//!
//! The library half of the PDF toolbox: merge, page extraction (split),
//! compression, and image-to-PDF assembly over in-memory byte buffers,
//! plus the page-range parser the split endpoint is built on. All PDF
//! mechanics are delegated to lopdf; image decoding to the image crate.

pub mod compress;
pub mod error;
pub mod images;
pub mod merge;
pub mod ranges;
pub mod split;

#[cfg(test)]
pub mod test_support;

pub use compress::compress_document;
pub use error::PdfToolsError;
pub use images::{images_to_pdf, ImageKind, ImageUpload};
pub use merge::merge_documents;
pub use ranges::{all_pages, parse_page_range, selects_all};
pub use split::extract_pages;

/// Parse PDF bytes and return the page count.
pub fn page_count(bytes: &[u8]) -> Result<u32, PdfToolsError> {
    let doc = lopdf::Document::load_mem(bytes).map_err(|e| PdfToolsError::Parse(e.to_string()))?;
    Ok(doc.get_pages().len() as u32)
}
