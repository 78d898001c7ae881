//! Image XObjects for PDF generation.
//!
//! Per PDF spec Section 8.9, images are embedded as XObjects. Label code
//! rasters are black-on-white, so everything here is 8-bit DeviceGray with
//! FlateDecode compression.

use std::collections::HashMap;
use std::io::Write;

use crate::error::{Error, Result};
use crate::object::Object;

/// A grayscale raster prepared for embedding as a PDF Image XObject.
#[derive(Debug, Clone)]
pub struct ImageXObject {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Flate-compressed 8-bit luma samples, row-major
    pub data: Vec<u8>,
}

impl ImageXObject {
    /// Compress an in-memory grayscale raster into XObject form.
    pub fn from_gray_image(img: &image::GrayImage) -> Result<Self> {
        let compressed = compress_image_data(img.as_raw())?;
        Ok(Self {
            width: img.width(),
            height: img.height(),
            data: compressed,
        })
    }

    /// Build the PDF Image XObject dictionary.
    pub fn build_xobject_dict(&self) -> HashMap<String, Object> {
        let mut dict = HashMap::new();

        dict.insert("Type".to_string(), Object::Name("XObject".to_string()));
        dict.insert("Subtype".to_string(), Object::Name("Image".to_string()));
        dict.insert("Width".to_string(), Object::Integer(self.width as i64));
        dict.insert("Height".to_string(), Object::Integer(self.height as i64));
        dict.insert("ColorSpace".to_string(), Object::Name("DeviceGray".to_string()));
        dict.insert("BitsPerComponent".to_string(), Object::Integer(8));
        dict.insert("Filter".to_string(), Object::Name("FlateDecode".to_string()));
        dict.insert("Length".to_string(), Object::Integer(self.data.len() as i64));

        dict
    }
}

/// Compress raw image samples using Flate.
fn compress_image_data(data: &[u8]) -> Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| Error::Encoding(format!("image compression failed: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| Error::Encoding(format!("image compression failed: {}", e)))
}

/// Image placement on a PDF page.
#[derive(Debug, Clone)]
pub struct ImagePlacement {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Display width
    pub width: f32,
    /// Display height
    pub height: f32,
}

impl ImagePlacement {
    /// Create a new image placement.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a placement of the given size centered on (cx, cy).
    pub fn centered(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    /// Generate the transformation matrix for this placement.
    ///
    /// Returns the six values for the `cm` operator.
    pub fn transform_matrix(&self) -> (f32, f32, f32, f32, f32, f32) {
        (self.width, 0.0, 0.0, self.height, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xobject_dict() {
        let img = image::GrayImage::from_pixel(10, 4, image::Luma([255u8]));
        let xobject = ImageXObject::from_gray_image(&img).unwrap();

        let dict = xobject.build_xobject_dict();
        assert_eq!(dict.get("Type"), Some(&Object::Name("XObject".to_string())));
        assert_eq!(dict.get("Subtype"), Some(&Object::Name("Image".to_string())));
        assert_eq!(dict.get("Width"), Some(&Object::Integer(10)));
        assert_eq!(dict.get("Height"), Some(&Object::Integer(4)));
        assert_eq!(dict.get("ColorSpace"), Some(&Object::Name("DeviceGray".to_string())));
        assert_eq!(dict.get("Filter"), Some(&Object::Name("FlateDecode".to_string())));
    }

    #[test]
    fn test_compression_round_trip() {
        let img = image::GrayImage::from_fn(8, 8, |x, y| {
            image::Luma([if (x + y) % 2 == 0 { 0u8 } else { 255u8 }])
        });
        let xobject = ImageXObject::from_gray_image(&img).unwrap();

        use std::io::Read;
        let mut decoder = flate2::read::ZlibDecoder::new(&xobject.data[..]);
        let mut decompressed = Vec::new();
        decoder.read_to_end(&mut decompressed).unwrap();
        assert_eq!(decompressed, img.as_raw().as_slice());
    }

    #[test]
    fn test_placement_transform() {
        let placement = ImagePlacement::new(36.0, 126.0, 72.0, 72.0);
        let (a, b, c, d, e, f) = placement.transform_matrix();
        assert_eq!((a, b, c, d, e, f), (72.0, 0.0, 0.0, 72.0, 36.0, 126.0));
    }

    #[test]
    fn test_centered_placement() {
        let placement = ImagePlacement::centered(108.0, 72.0, 50.4, 50.4);
        assert!((placement.x - 82.8).abs() < 0.001);
        assert!((placement.y - 46.8).abs() < 0.001);
    }
}
