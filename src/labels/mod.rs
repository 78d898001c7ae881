//! Label rendering: rows in, paginated label documents out.
//!
//! ```text
//! rows -> [formatter] -> [composer] -> [assembler] -> PDF bytes -> store
//! ```

mod assembler;
mod composer;
mod formatter;
mod row;

pub use assembler::{document_name, LabelAssembler, RenderedDocument};
pub use composer::compose_label_page;
pub use formatter::{format_fields, FormattedField, FormattedFields, PLACEHOLDER, QR_FIELD_ORDER};
pub use row::{
    expand_experiment, rows_from_json, ExperimentPlan, FieldValue, LabelRow, LabelStyle, Symbology,
};
