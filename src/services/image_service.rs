//! Image engine operations: decode, normalize to RGB, JPEG re-encode, and
//! single-page PDF embedding.

use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use lopdf::{Document, Object, Stream, dictionary};
use thiserror::Error;

/// JPEG quality used when embedding a converted image into a PDF page.
const CONVERT_JPEG_QUALITY: u8 = 75;

#[derive(Error, Debug)]
pub enum ImageServiceError {
    #[error("Image processing failed: {0}")]
    Codec(#[from] image::ImageError),

    #[error("PDF assembly failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("PDF serialization failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Decode `data`, strip alpha/palette/16-bit modes down to 8-bit RGB, and
/// wrap the result in a single-page PDF sized 1 px = 1 pt.
pub fn convert_to_pdf(data: &[u8]) -> Result<Vec<u8>, ImageServiceError> {
    let rgb = decode_rgb(data)?;
    let (width, height) = rgb.dimensions();
    let jpeg = encode_jpeg(&rgb, CONVERT_JPEG_QUALITY)?;
    single_page_pdf(width, height, jpeg)
}

/// Re-encode `data` as JPEG at `quality` (1-95).
pub fn compress_to_jpeg(data: &[u8], quality: u8) -> Result<Vec<u8>, ImageServiceError> {
    let rgb = decode_rgb(data)?;
    encode_jpeg(&rgb, quality)
}

fn decode_rgb(data: &[u8]) -> Result<RgbImage, ImageServiceError> {
    Ok(image::load_from_memory(data)?.to_rgb8())
}

fn encode_jpeg(rgb: &RgbImage, quality: u8) -> Result<Vec<u8>, ImageServiceError> {
    let mut out = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut out, quality);
    encoder.encode_image(rgb)?;
    Ok(out)
}

/// One page, one DCTDecode image XObject painted edge to edge.
fn single_page_pdf(width: u32, height: u32, jpeg: Vec<u8>) -> Result<Vec<u8>, ImageServiceError> {
    let mut doc = Document::with_version("1.5");

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => Object::Integer(width as i64),
            "Height" => Object::Integer(height as i64),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => Object::Integer(8),
            "Filter" => "DCTDecode",
        },
        jpeg,
    ));

    let content = format!("q\n{w} 0 0 {h} 0 0 cm\n/Im0 Do\nQ\n", w = width, h = height);
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(width as i64),
            Object::Integer(height as i64),
        ],
        "Contents" => Object::Reference(content_id),
        "Resources" => dictionary! {
            "XObject" => dictionary! { "Im0" => Object::Reference(image_id) },
        },
    });

    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => vec![Object::Reference(page_id)],
        "Count" => Object::Integer(1),
    });

    if let Ok(page) = doc.get_object_mut(page_id) {
        if let Ok(dict) = page.as_dict_mut() {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut out = Vec::new();
    doc.save_to(&mut out)?;
    Ok(out)
}
