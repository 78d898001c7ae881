//! Machine-readable code generation for label pages.
//!
//! Encodes a payload string as either a QR code or a Code 128 barcode,
//! rasterized black-on-white directly in memory. The raster never touches
//! the filesystem: it is handed to the page canvas as an XObject and
//! released when the page draw completes.

use crate::error::{Error, Result};
use crate::writer::image_xobject::ImageXObject;

/// Pixels rendered per QR module.
const QR_BOX_SIZE: u32 = 10;
/// Quiet border around the QR symbol, in modules.
const QR_BORDER: u32 = 1;
/// Raster height of a Code 128 symbol in pixels. Bars are constant
/// vertically, so this only affects the embedded image, not the page.
const BARCODE_RASTER_HEIGHT: u32 = 40;

/// An ephemeral code raster, keyed by the payload it encodes.
///
/// Owned by the page composition that created it; composite it onto the
/// page and let it drop.
#[derive(Debug, Clone)]
pub struct CodeImage {
    raster: image::GrayImage,
    modules: u32,
}

impl CodeImage {
    /// Encode a payload as a QR code.
    ///
    /// Error-correction level High (~30% symbol damage tolerance), minimal
    /// fitting symbol version, one-module quiet border.
    pub fn encode_qr(payload: &str) -> Result<Self> {
        use qrcode::{EcLevel, QrCode};

        let code = QrCode::with_error_correction_level(payload, EcLevel::H)
            .map_err(|e| Error::Encoding(format!("QR code encoding error: {}", e)))?;

        let qr_width = code.width() as u32;
        let total_modules = qr_width + 2 * QR_BORDER;
        let size_px = total_modules * QR_BOX_SIZE;

        let mut raster = image::GrayImage::from_pixel(size_px, size_px, image::Luma([255u8]));

        let colors = code.to_colors();
        for (i, module) in colors.iter().enumerate() {
            if *module == qrcode::Color::Dark {
                let mx = (i as u32 % qr_width + QR_BORDER) * QR_BOX_SIZE;
                let my = (i as u32 / qr_width + QR_BORDER) * QR_BOX_SIZE;
                for dy in 0..QR_BOX_SIZE {
                    for dx in 0..QR_BOX_SIZE {
                        raster.put_pixel(mx + dx, my + dy, image::Luma([0u8]));
                    }
                }
            }
        }

        Ok(Self {
            raster,
            modules: total_modules,
        })
    }

    /// Encode a payload as a Code 128 barcode.
    ///
    /// Zero quiet-zone padding: the caller manages placement margins. One
    /// raster column per bar module, so the module count below gives the
    /// symbol's natural width.
    pub fn encode_code128(payload: &str) -> Result<Self> {
        use barcoders::sym::code128::Code128;

        // Character set B prefix (Ɓ) per the barcoders API; covers the
        // full printable-ASCII payload alphabet.
        let barcode = Code128::new(&format!("\u{0181}{}", payload))
            .map_err(|e| Error::Encoding(format!("Code128 encoding error: {}", e)))?;
        let encoded = barcode.encode();

        let modules = encoded.len() as u32;
        let mut raster =
            image::GrayImage::from_pixel(modules, BARCODE_RASTER_HEIGHT, image::Luma([255u8]));
        for (x, bar) in encoded.iter().enumerate() {
            if *bar == 1 {
                for y in 0..BARCODE_RASTER_HEIGHT {
                    raster.put_pixel(x as u32, y, image::Luma([0u8]));
                }
            }
        }

        Ok(Self { raster, modules })
    }

    /// Number of modules: per side for QR (quiet border included), total
    /// bar modules for Code 128.
    pub fn module_count(&self) -> u32 {
        self.modules
    }

    /// Convert the raster into an embeddable Image XObject.
    pub fn to_xobject(&self) -> Result<ImageXObject> {
        ImageXObject::from_gray_image(&self.raster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_qr() {
        let code = CodeImage::encode_qr("Nfix_Topeka_2024_Block-1_Treat-Control_V4_101").unwrap();
        // Version 1 is 21 modules; longer payloads pick larger symbols.
        assert!(code.module_count() >= 21 + 2);
        assert_eq!(code.raster.width(), code.module_count() * QR_BOX_SIZE);
        assert_eq!(code.raster.width(), code.raster.height());
    }

    #[test]
    fn test_qr_has_dark_and_light_pixels() {
        let code = CodeImage::encode_qr("B001").unwrap();
        let pixels: Vec<u8> = code.raster.pixels().map(|p| p.0[0]).collect();
        assert!(pixels.contains(&0));
        assert!(pixels.contains(&255));
    }

    #[test]
    fn test_qr_quiet_border_is_white() {
        let code = CodeImage::encode_qr("X99").unwrap();
        let last = code.raster.width() - 1;
        assert_eq!(code.raster.get_pixel(0, 0).0[0], 255);
        assert_eq!(code.raster.get_pixel(last, 0).0[0], 255);
        assert_eq!(code.raster.get_pixel(0, last).0[0], 255);
        assert_eq!(code.raster.get_pixel(last, last).0[0], 255);
    }

    #[test]
    fn test_oversized_qr_payload_fails() {
        let payload = "A".repeat(4096);
        let result = CodeImage::encode_qr(&payload);
        assert!(matches!(result, Err(Error::Encoding(_))));
    }

    #[test]
    fn test_encode_code128() {
        let code = CodeImage::encode_code128("B001").unwrap();
        assert!(code.module_count() > 0);
        assert_eq!(code.raster.width(), code.module_count());
        assert_eq!(code.raster.height(), BARCODE_RASTER_HEIGHT);
        // Symbols start with a bar, and there is no quiet-zone padding
        assert_eq!(code.raster.get_pixel(0, 0).0[0], 0);
    }

    #[test]
    fn test_code128_rejects_non_ascii() {
        let result = CodeImage::encode_code128("Blöck-1");
        assert!(matches!(result, Err(Error::Encoding(_))));
    }

    #[test]
    fn test_code128_full_ascii_payload() {
        let code = CodeImage::encode_code128("Treat-Control V4 #101").unwrap();
        assert!(code.module_count() > 0);
    }

    #[test]
    fn test_to_xobject() {
        let code = CodeImage::encode_qr("B001").unwrap();
        let xobject = code.to_xobject().unwrap();
        assert_eq!(xobject.width, code.raster.width());
        assert_eq!(xobject.height, code.raster.height());
        assert!(!xobject.data.is_empty());
    }
}
