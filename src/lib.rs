//! # labelpress
//!
//! Turns tabular research-plot data into printable small-format labels:
//! a machine-readable code (QR or Code 128) plus human-readable text,
//! laid out on a fixed physical label size and emitted as a paginated
//! PDF document.
//!
//! ## Label styles
//!
//! - **qr** — 2"x3" portrait: QR code of the row ID above a six-field
//!   text block (Plot, Site, Year, Sampling Stage/Depth, Project,
//!   Treatment)
//! - **biomass** — 3"x2" bordered: centered three-line text stack over a
//!   QR code or Code 128 barcode, optional unique-code footer
//! - **line** — 3"x2" for narrow plastic stakes: QR code dead center,
//!   identifier column on the left, info column on the right
//!
//! ## Quick start
//!
//! ```ignore
//! use labelpress::{
//!     LabelAssembler, LabelRow, LabelStyle, MemoryStore, RenderConfig, Symbology,
//! };
//!
//! let rows = vec![
//!     LabelRow::new().with("info1", "B001").with("info2", "Rep1").with("info3", "V4"),
//! ];
//!
//! let store = MemoryStore::new();
//! let assembler = LabelAssembler::new(RenderConfig::new());
//! let handle = assembler.generate(&rows, LabelStyle::Biomass, Symbology::Barcode, &store)?;
//! let pdf_bytes = store.get(handle.name())?;
//! # Ok::<(), labelpress::Error>(())
//! ```
//!
//! Rendering is synchronous per request and shares no mutable state
//! between requests; the only cross-request state is the injected
//! document store.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// PDF object model
pub mod object;

// Label rendering pipeline
pub mod labels;

// Document storage backends
pub mod store;

// PDF generation
pub mod writer;

// Re-exports
pub use config::{OutputMode, RenderConfig, IN_MEMORY_ENV};
pub use error::{Error, Result};
pub use labels::{
    document_name, expand_experiment, format_fields, rows_from_json, ExperimentPlan, FieldValue,
    FormattedField, FormattedFields, LabelAssembler, LabelRow, LabelStyle, RenderedDocument,
    Symbology,
};
pub use store::{open_store, DocumentHandle, DocumentStore, FileStore, MemoryStore};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
