//! Image to PDF assembly
//!
//! Builds a PDF with one page per uploaded image, each page sized exactly to
//! the image's pixel dimensions. JPEG data is embedded as-is behind a
//! DCTDecode filter so it is never recompressed; PNG data is decoded to RGB
//! and deflated into a FlateDecode stream (alpha is dropped).

use crate::error::PdfToolsError;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::{DynamicImage, ImageFormat};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use std::io::Write;
use tracing::warn;

/// One uploaded image file.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
}

impl ImageKind {
    fn other(self) -> ImageKind {
        match self {
            ImageKind::Jpeg => ImageKind::Png,
            ImageKind::Png => ImageKind::Jpeg,
        }
    }
}

/// Decide how to embed an upload: declared MIME first, then the filename
/// extension, then magic bytes. Anything unrecognized is treated as PNG and
/// left to the decoder (the embed path retries with the other format on
/// failure).
pub fn detect_kind(name: &str, content_type: Option<&str>, bytes: &[u8]) -> ImageKind {
    let lower = name.to_ascii_lowercase();
    if content_type == Some("image/jpeg") || lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        return ImageKind::Jpeg;
    }
    if content_type == Some("image/png") || lower.ends_with(".png") {
        return ImageKind::Png;
    }
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return ImageKind::Jpeg;
    }
    ImageKind::Png
}

/// Assemble the uploads into a single PDF.
///
/// Empty uploads are skipped. An image that fails to embed under its
/// detected format is retried once as the other format; if that also fails
/// it is skipped with a warning. Producing zero pages is an error.
pub fn images_to_pdf(images: &[ImageUpload]) -> Result<Vec<u8>, PdfToolsError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut page_ids = Vec::new();

    for upload in images {
        if upload.bytes.is_empty() {
            continue;
        }

        let kind = detect_kind(&upload.name, upload.content_type.as_deref(), &upload.bytes);

        let page_id = match embed_as_page(&mut doc, pages_id, &upload.bytes, kind) {
            Ok(id) => id,
            Err(first_err) => {
                match embed_as_page(&mut doc, pages_id, &upload.bytes, kind.other()) {
                    Ok(id) => id,
                    Err(_) => {
                        warn!(name = %upload.name, error = %first_err, "skipping image that failed to embed");
                        continue;
                    }
                }
            }
        };
        page_ids.push(page_id);
    }

    if page_ids.is_empty() {
        return Err(PdfToolsError::Image(
            "No images could be embedded".into(),
        ));
    }

    let pages = dictionary! {
        "Type" => Object::Name(b"Pages".to_vec()),
        "Count" => Object::Integer(page_ids.len() as i64),
        "Kids" => Object::Array(page_ids.iter().map(|&id| Object::Reference(id)).collect()),
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => Object::Name(b"Catalog".to_vec()),
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| PdfToolsError::Operation(format!("Failed to save PDF: {}", e)))?;

    Ok(buffer)
}

/// Embed one image as an XObject plus a page that draws it at natural size.
/// Returns the page's object id.
fn embed_as_page(
    doc: &mut Document,
    pages_id: lopdf::ObjectId,
    bytes: &[u8],
    kind: ImageKind,
) -> Result<lopdf::ObjectId, PdfToolsError> {
    let (xobject, width, height) = match kind {
        ImageKind::Jpeg => jpeg_xobject(bytes)?,
        ImageKind::Png => png_xobject(bytes)?,
    };

    let image_id = doc.add_object(Object::Stream(xobject));

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    Object::Integer(width as i64),
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(height as i64),
                    Object::Integer(0),
                    Object::Integer(0),
                ],
            ),
            Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let encoded = content
        .encode()
        .map_err(|e| PdfToolsError::Operation(format!("Failed to encode content: {}", e)))?;
    let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

    let resources = dictionary! {
        "XObject" => dictionary! { "Im0" => Object::Reference(image_id) },
    };

    let page_id = doc.add_object(dictionary! {
        "Type" => Object::Name(b"Page".to_vec()),
        "Parent" => Object::Reference(pages_id),
        "MediaBox" => Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(width as i64),
            Object::Integer(height as i64),
        ]),
        "Resources" => Object::Dictionary(resources),
        "Contents" => Object::Reference(content_id),
    });

    Ok(page_id)
}

/// Raw JPEG bytes behind a DCTDecode filter. The file is decoded only to
/// learn its dimensions and color type.
fn jpeg_xobject(bytes: &[u8]) -> Result<(Stream, u32, u32), PdfToolsError> {
    let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Jpeg)
        .map_err(|e| PdfToolsError::Image(format!("Failed to decode JPEG: {}", e)))?;

    let width = decoded.width();
    let height = decoded.height();
    let color_space: &[u8] = match decoded {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageLuma16(_) => b"DeviceGray",
        _ => b"DeviceRGB",
    };

    let dict = dictionary! {
        "Type" => Object::Name(b"XObject".to_vec()),
        "Subtype" => Object::Name(b"Image".to_vec()),
        "Width" => Object::Integer(width as i64),
        "Height" => Object::Integer(height as i64),
        "ColorSpace" => Object::Name(color_space.to_vec()),
        "BitsPerComponent" => Object::Integer(8),
        "Filter" => Object::Name(b"DCTDecode".to_vec()),
    };

    Ok((Stream::new(dict, bytes.to_vec()), width, height))
}

/// PNG decoded to RGB8 and deflated into a FlateDecode stream.
fn png_xobject(bytes: &[u8]) -> Result<(Stream, u32, u32), PdfToolsError> {
    let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(|e| PdfToolsError::Image(format!("Failed to decode PNG: {}", e)))?;

    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(rgb.as_raw())
        .and_then(|_| encoder.finish())
        .map(|compressed| {
            let dict = dictionary! {
                "Type" => Object::Name(b"XObject".to_vec()),
                "Subtype" => Object::Name(b"Image".to_vec()),
                "Width" => Object::Integer(width as i64),
                "Height" => Object::Integer(height as i64),
                "ColorSpace" => Object::Name(b"DeviceRGB".to_vec()),
                "BitsPerComponent" => Object::Integer(8),
                "Filter" => Object::Name(b"FlateDecode".to_vec()),
            };
            (Stream::new(dict, compressed), width, height)
        })
        .map_err(|e| PdfToolsError::Image(format!("Failed to deflate pixels: {}", e)))
}
