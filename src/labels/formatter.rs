//! Row formatting: select and format the display fields for a style.
//!
//! Formatting is a pure function of row + style. It never fails: absent
//! fields degrade to the `N/A` placeholder or drop their line, per the
//! style rules.

use super::row::{LabelRow, LabelStyle};
use crate::writer::FontWeight;

/// Placeholder rendered for fields a layout reads but the row lacks.
pub const PLACEHOLDER: &str = "N/A";

/// Field order for the QR style's text block.
pub const QR_FIELD_ORDER: [&str; 6] =
    ["Plot", "Site", "Year", "Sampling Stage/Depth", "Project", "Treatment"];

/// One formatted display field: final text plus its font policy.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedField {
    /// Text exactly as drawn
    pub text: String,
    /// Font weight
    pub weight: FontWeight,
    /// Font size in points
    pub size: f32,
}

impl FormattedField {
    fn new(text: impl Into<String>, weight: FontWeight, size: f32) -> Self {
        Self {
            text: text.into(),
            weight,
            size,
        }
    }
}

/// The fixed, ordered field list for one label, per style.
#[derive(Debug, Clone, PartialEq)]
pub enum FormattedFields {
    /// Six `label: value` lines in [`QR_FIELD_ORDER`]; Plot bold/10pt,
    /// the rest regular/8pt.
    Qr {
        /// Lines in draw order, top to bottom
        lines: Vec<FormattedField>,
    },
    /// Centered three-line stack plus an optional unique-code line.
    Biomass {
        /// info1 (bold 14), info2 (bold 12), info3 (regular 10)
        lines: [FormattedField; 3],
        /// Bold 8pt, only when ucode is present and non-blank
        unique_code: Option<FormattedField>,
    },
    /// Two side columns around a centered code.
    Line {
        /// Static caption over the identifier (regular 10)
        caption: FormattedField,
        /// Primary identifier, info1 (bold 14)
        identifier: FormattedField,
        /// Space-joined info2/info3, non-blank parts only (bold 12)
        info: Option<FormattedField>,
        /// `Code: {ucode}` (regular 10), only when ucode is non-blank
        code: Option<FormattedField>,
    },
}

/// Format a row's display fields for the given style.
pub fn format_fields(row: &LabelRow, style: LabelStyle) -> FormattedFields {
    match style {
        LabelStyle::Qr => format_qr(row),
        LabelStyle::Biomass => format_biomass(row),
        LabelStyle::Line => format_line(row),
    }
}

fn format_qr(row: &LabelRow) -> FormattedFields {
    let lines = QR_FIELD_ORDER
        .iter()
        .map(|attr| {
            let value = row.display_or(attr, PLACEHOLDER);
            let (weight, size) = if *attr == "Plot" {
                (FontWeight::Bold, 10.0)
            } else {
                (FontWeight::Normal, 8.0)
            };
            FormattedField::new(format!("{}: {}", attr, value), weight, size)
        })
        .collect();

    FormattedFields::Qr { lines }
}

fn format_biomass(row: &LabelRow) -> FormattedFields {
    let lines = [
        FormattedField::new(row.display_or("info1", PLACEHOLDER), FontWeight::Bold, 14.0),
        FormattedField::new(row.display_or("info2", PLACEHOLDER), FontWeight::Bold, 12.0),
        FormattedField::new(row.display_or("info3", PLACEHOLDER), FontWeight::Normal, 10.0),
    ];

    let unique_code = row
        .present("ucode")
        .map(|u| FormattedField::new(u, FontWeight::Bold, 8.0));

    FormattedFields::Biomass { lines, unique_code }
}

fn format_line(row: &LabelRow) -> FormattedFields {
    let caption = FormattedField::new("Plot", FontWeight::Normal, 10.0);
    let identifier =
        FormattedField::new(row.display_or("info1", PLACEHOLDER), FontWeight::Bold, 14.0);

    let parts: Vec<String> = ["info2", "info3"]
        .iter()
        .filter_map(|name| row.present(name))
        .collect();
    let info = if parts.is_empty() {
        None
    } else {
        Some(FormattedField::new(parts.join(" "), FontWeight::Bold, 12.0))
    };

    let code = row
        .present("ucode")
        .map(|u| FormattedField::new(format!("Code: {}", u), FontWeight::Normal, 10.0));

    FormattedFields::Line {
        caption,
        identifier,
        info,
        code,
    }
}
