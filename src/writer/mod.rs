//! PDF writing module for generating label documents.
//!
//! ## Architecture
//!
//! ```text
//! label page drawing calls
//!     ↓
//! [ContentStreamBuilder] (operators → content stream bytes)
//!     ↓
//! [PdfWriter] (assembles complete PDF structure)
//!     ↓
//! [ObjectSerializer] (serializes PDF objects)
//!     ↓
//! PDF bytes
//! ```
//!
//! Code rasters ([`CodeImage`]) are generated in memory and composited
//! onto pages as Image XObjects; nothing is written to disk until the
//! document is finalized.

mod code_image;
mod content_stream;
mod font_metrics;
mod image_xobject;
mod object_serializer;
mod pdf_writer;

pub use code_image::CodeImage;
pub use content_stream::{ContentStreamBuilder, ContentStreamOp, PendingImage};
pub use font_metrics::{centered_x, text_width, FontWeight};
pub use image_xobject::{ImagePlacement, ImageXObject};
pub use object_serializer::ObjectSerializer;
pub use pdf_writer::{PageBuilder, PdfWriter, PdfWriterConfig};
