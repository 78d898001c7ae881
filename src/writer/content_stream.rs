//! PDF content stream builder.
//!
//! Builds PDF content streams containing the graphics and text operators
//! label pages use, according to PDF specification ISO 32000-1:2008
//! Section 8-9.

use super::image_xobject::{ImagePlacement, ImageXObject};
use crate::error::Result;
use std::io::Write;

/// Operations that can be added to a content stream.
#[derive(Debug, Clone)]
pub enum ContentStreamOp {
    /// Save graphics state (q)
    SaveState,
    /// Restore graphics state (Q)
    RestoreState,
    /// Set transformation matrix (cm)
    Transform(f32, f32, f32, f32, f32, f32),
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Set font and size (Tf)
    SetFont(String, f32),
    /// Set text matrix (Tm)
    SetTextMatrix(f32, f32, f32, f32, f32, f32),
    /// Show text (Tj) - literal string
    ShowText(String),
    /// Set line width (w)
    SetLineWidth(f32),
    /// Move to (m)
    MoveTo(f32, f32),
    /// Line to (l)
    LineTo(f32, f32),
    /// Rectangle (re)
    Rectangle(f32, f32, f32, f32),
    /// Close path (h)
    ClosePath,
    /// Stroke (S)
    Stroke,
    /// Fill (f)
    Fill,
    /// End path without filling/stroking (n)
    EndPath,
    /// Paint XObject (Do)
    PaintXObject(String),
}

/// An image that needs to be registered as an XObject.
///
/// When the builder draws an image it emits the content stream operators
/// immediately and tracks the raster here so the writer can register it
/// as an XObject in the page resources when the PDF is assembled.
#[derive(Debug, Clone)]
pub struct PendingImage {
    /// The image data
    pub image: ImageXObject,
    /// The resource ID assigned to this image (e.g., "Im1")
    pub resource_id: String,
}

/// Builder for PDF content streams.
///
/// Creates the byte sequence for one page's content stream.
#[derive(Debug, Default)]
pub struct ContentStreamBuilder {
    /// Operations in the stream
    operations: Vec<ContentStreamOp>,
    /// Current font name
    current_font: Option<String>,
    /// Current font size
    current_font_size: f32,
    /// Whether we're in a text object
    in_text_object: bool,
    /// Images that need to be registered as XObjects
    pending_images: Vec<PendingImage>,
    /// Next image resource ID counter
    next_image_id: u32,
}

impl ContentStreamBuilder {
    /// Create a new content stream builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation to the stream.
    pub fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Begin a text object.
    pub fn begin_text(&mut self) -> &mut Self {
        if !self.in_text_object {
            self.op(ContentStreamOp::BeginText);
            self.in_text_object = true;
        }
        self
    }

    /// End a text object.
    pub fn end_text(&mut self) -> &mut Self {
        if self.in_text_object {
            self.op(ContentStreamOp::EndText);
            self.in_text_object = false;
        }
        self
    }

    /// Set font for text operations.
    pub fn set_font(&mut self, font_name: &str, size: f32) -> &mut Self {
        if self.current_font.as_deref() != Some(font_name) || self.current_font_size != size {
            self.op(ContentStreamOp::SetFont(font_name.to_string(), size));
            self.current_font = Some(font_name.to_string());
            self.current_font_size = size;
        }
        self
    }

    /// Add text at a position (literal string for Base-14 fonts).
    pub fn text(&mut self, text: &str, x: f32, y: f32) -> &mut Self {
        self.begin_text();
        self.op(ContentStreamOp::SetTextMatrix(1.0, 0.0, 0.0, 1.0, x, y));
        self.op(ContentStreamOp::ShowText(text.to_string()));
        self
    }

    /// Set line width.
    pub fn set_line_width(&mut self, width: f32) -> &mut Self {
        self.op(ContentStreamOp::SetLineWidth(width))
    }

    /// Draw a rectangle.
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        self.op(ContentStreamOp::Rectangle(x, y, width, height))
    }

    /// Stroke the current path.
    pub fn stroke(&mut self) -> &mut Self {
        self.op(ContentStreamOp::Stroke)
    }

    /// Stroke a rectangle outline (no fill).
    pub fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        self.end_text();
        self.rect(x, y, width, height).stroke()
    }

    /// Draw an image XObject at the specified position and size.
    ///
    /// The raster stays in memory: it is tracked as a pending XObject and
    /// painted via a Do operator inside a saved graphics state.
    pub fn draw_image(&mut self, image: ImageXObject, placement: &ImagePlacement) -> &mut Self {
        self.end_text();

        self.next_image_id += 1;
        let resource_id = format!("Im{}", self.next_image_id);
        self.pending_images.push(PendingImage {
            image,
            resource_id: resource_id.clone(),
        });

        let (a, b, c, d, e, f) = placement.transform_matrix();
        self.op(ContentStreamOp::SaveState);
        self.op(ContentStreamOp::Transform(a, b, c, d, e, f));
        self.op(ContentStreamOp::PaintXObject(resource_id));
        self.op(ContentStreamOp::RestoreState);
        self
    }

    /// Take the pending images that need to be registered as XObjects.
    pub fn take_pending_images(&mut self) -> Vec<PendingImage> {
        std::mem::take(&mut self.pending_images)
    }

    /// Get a reference to pending images without removing them.
    pub fn pending_images(&self) -> &[PendingImage] {
        &self.pending_images
    }

    /// Build the content stream to bytes.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();

        for op in &self.operations {
            self.write_op(&mut buf, op)?;
            writeln!(buf)?;
        }

        Ok(buf)
    }

    /// Write a single operation to the buffer.
    fn write_op<W: Write>(&self, w: &mut W, op: &ContentStreamOp) -> std::io::Result<()> {
        match op {
            ContentStreamOp::SaveState => write!(w, "q"),
            ContentStreamOp::RestoreState => write!(w, "Q"),
            ContentStreamOp::Transform(a, b, c, d, e, f) => {
                write!(w, "{} {} {} {} {} {} cm", a, b, c, d, e, f)
            },
            ContentStreamOp::BeginText => write!(w, "BT"),
            ContentStreamOp::EndText => write!(w, "ET"),
            ContentStreamOp::SetFont(name, size) => write!(w, "/{} {} Tf", name, size),
            ContentStreamOp::SetTextMatrix(a, b, c, d, e, f) => {
                write!(w, "{} {} {} {} {} {} Tm", a, b, c, d, e, f)
            },
            ContentStreamOp::ShowText(text) => {
                write!(w, "(")?;
                self.write_escaped_string(w, text)?;
                write!(w, ") Tj")
            },
            ContentStreamOp::SetLineWidth(width) => write!(w, "{} w", width),
            ContentStreamOp::MoveTo(x, y) => write!(w, "{} {} m", x, y),
            ContentStreamOp::LineTo(x, y) => write!(w, "{} {} l", x, y),
            ContentStreamOp::Rectangle(x, y, w_val, h) => {
                write!(w, "{} {} {} {} re", x, y, w_val, h)
            },
            ContentStreamOp::ClosePath => write!(w, "h"),
            ContentStreamOp::Stroke => write!(w, "S"),
            ContentStreamOp::Fill => write!(w, "f"),
            ContentStreamOp::EndPath => write!(w, "n"),
            ContentStreamOp::PaintXObject(name) => write!(w, "/{} Do", name),
        }
    }

    /// Write an escaped PDF string.
    fn write_escaped_string<W: Write>(&self, w: &mut W, text: &str) -> std::io::Result<()> {
        for byte in text.bytes() {
            match byte {
                b'(' => write!(w, "\\(")?,
                b')' => write!(w, "\\)")?,
                b'\\' => write!(w, "\\\\")?,
                b'\n' => write!(w, "\\n")?,
                b'\r' => write!(w, "\\r")?,
                b'\t' => write!(w, "\\t")?,
                _ => w.write_all(&[byte])?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::image_xobject::ImageXObject;

    #[test]
    fn test_simple_text() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .begin_text()
            .set_font("Helvetica", 8.0)
            .text("Site: Topeka", 7.2, 89.4)
            .end_text();

        let bytes = builder.build().unwrap();
        let content = String::from_utf8_lossy(&bytes);

        assert!(content.contains("BT"));
        assert!(content.contains("/Helvetica 8 Tf"));
        assert!(content.contains("(Site: Topeka) Tj"));
        assert!(content.contains("ET"));
    }

    #[test]
    fn test_font_changes_are_deduplicated() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .set_font("Helvetica", 8.0)
            .text("a", 0.0, 0.0)
            .set_font("Helvetica", 8.0)
            .text("b", 0.0, 10.0)
            .end_text();

        let bytes = builder.build().unwrap();
        let content = String::from_utf8_lossy(&bytes);
        assert_eq!(content.matches(" Tf").count(), 1);
    }

    #[test]
    fn test_text_escaping() {
        let mut builder = ContentStreamBuilder::new();
        builder.text("Treat-(Control)", 0.0, 0.0).end_text();

        let bytes = builder.build().unwrap();
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.contains("(Treat-\\(Control\\)) Tj"));
    }

    #[test]
    fn test_stroke_rect() {
        let mut builder = ContentStreamBuilder::new();
        builder.set_line_width(1.0).stroke_rect(3.6, 1.8, 208.8, 136.8);

        let bytes = builder.build().unwrap();
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.contains("1 w"));
        assert!(content.contains("3.6 1.8 208.8 136.8 re"));
        assert!(content.contains("S"));
    }

    #[test]
    fn test_draw_image_emits_do_and_tracks_pending() {
        let raster = image::GrayImage::from_pixel(2, 2, image::Luma([0u8]));
        let xobject = ImageXObject::from_gray_image(&raster).unwrap();

        let mut builder = ContentStreamBuilder::new();
        builder.draw_image(xobject, &ImagePlacement::new(36.0, 126.0, 72.0, 72.0));

        assert_eq!(builder.pending_images().len(), 1);
        assert_eq!(builder.pending_images()[0].resource_id, "Im1");

        let bytes = builder.build().unwrap();
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.contains("q"));
        assert!(content.contains("72 0 0 72 36 126 cm"));
        assert!(content.contains("/Im1 Do"));
        assert!(content.contains("Q"));
    }

    #[test]
    fn test_image_inside_text_closes_text_object() {
        let raster = image::GrayImage::from_pixel(1, 1, image::Luma([255u8]));
        let xobject = ImageXObject::from_gray_image(&raster).unwrap();

        let mut builder = ContentStreamBuilder::new();
        builder.text("B001", 10.0, 10.0);
        builder.draw_image(xobject, &ImagePlacement::new(0.0, 0.0, 10.0, 10.0));

        let bytes = builder.build().unwrap();
        let content = String::from_utf8_lossy(&bytes);
        let et = content.find("ET").unwrap();
        let do_op = content.find("/Im1 Do").unwrap();
        assert!(et < do_op);
    }
}
