//! Row data model for label generation.
//!
//! A [`LabelRow`] is an ordered mapping from field name to value. Field
//! sets differ by style; any field a layout reads may be missing, and
//! missing fields degrade to placeholders during formatting rather than
//! failing.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single field value: text, integer, or missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Integer value (e.g., a study year)
    Int(i64),
    /// Text value
    Text(String),
    /// Explicitly missing (JSON null)
    Missing,
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

/// One data row: an ordered field-name -> value mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelRow {
    fields: IndexMap<String, FieldValue>,
}

impl LabelRow {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value, replacing any existing value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Builder-style field assignment.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Raw field lookup.
    pub fn raw(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Field value formatted for display. `None` when the field is absent
    /// or explicitly missing; blank text comes back as-is.
    pub fn display(&self, name: &str) -> Option<String> {
        match self.fields.get(name) {
            Some(FieldValue::Text(s)) => Some(s.clone()),
            Some(FieldValue::Int(i)) => Some(i.to_string()),
            Some(FieldValue::Missing) | None => None,
        }
    }

    /// Field value if present and non-blank after trimming.
    ///
    /// This is the single home of the shared tie-break policy: absent,
    /// null, and blank-after-trim all count as not present.
    pub fn present(&self, name: &str) -> Option<String> {
        let value = self.display(name)?;
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Field value for display, with a placeholder for missing fields.
    pub fn display_or(&self, name: &str, fallback: &str) -> String {
        self.present(name).unwrap_or_else(|| fallback.to_string())
    }

    /// Number of fields in the row.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Parse a JSON array of objects into rows.
///
/// Anything that is not an array of flat objects is rejected with
/// [`Error::MalformedRow`]; this is the only place that error is raised.
pub fn rows_from_json(json: &str) -> Result<Vec<LabelRow>> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| Error::MalformedRow(format!("invalid JSON: {}", e)))?;

    let array = value
        .as_array()
        .ok_or_else(|| Error::MalformedRow("expected a JSON array of rows".to_string()))?;

    let mut rows = Vec::with_capacity(array.len());
    for (i, entry) in array.iter().enumerate() {
        let object = entry
            .as_object()
            .ok_or_else(|| Error::MalformedRow(format!("row {} is not an object", i)))?;

        let mut row = LabelRow::new();
        for (name, field) in object {
            let value = match field {
                serde_json::Value::Null => FieldValue::Missing,
                serde_json::Value::String(s) => FieldValue::Text(s.clone()),
                serde_json::Value::Number(n) => match n.as_i64() {
                    Some(i) => FieldValue::Int(i),
                    None => FieldValue::Text(n.to_string()),
                },
                serde_json::Value::Bool(b) => FieldValue::Text(b.to_string()),
                _ => {
                    return Err(Error::MalformedRow(format!(
                        "row {} field '{}' has a nested value",
                        i, name
                    )))
                },
            };
            row.set(name.clone(), value);
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Visual template for a label page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelStyle {
    /// 2"x3" portrait label: QR code above a field list
    Qr,
    /// 3"x2" bordered label: centered text stack over a code
    Biomass,
    /// 3"x2" label for narrow plastic stakes: centered code, side columns
    Line,
}

impl LabelStyle {
    /// Style tag used in document names.
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelStyle::Qr => "qr",
            LabelStyle::Biomass => "biomass",
            LabelStyle::Line => "line",
        }
    }

    /// Fixed physical page size in points, constant per style.
    pub fn page_size(&self) -> (f32, f32) {
        match self {
            LabelStyle::Qr => (144.0, 216.0),
            LabelStyle::Biomass | LabelStyle::Line => (216.0, 144.0),
        }
    }
}

impl std::str::FromStr for LabelStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "qr" => Ok(LabelStyle::Qr),
            "biomass" => Ok(LabelStyle::Biomass),
            "line" => Ok(LabelStyle::Line),
            other => Err(Error::MalformedRow(format!("unknown label style '{}'", other))),
        }
    }
}

/// Code symbology selection. Orthogonal to [`LabelStyle`]: biomass honors
/// it, line always renders a 2-D code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbology {
    /// 2-D matrix code
    #[serde(rename = "qr")]
    QrCode,
    /// 1-D Code 128 linear barcode
    #[serde(rename = "barcode")]
    Barcode,
}

impl Symbology {
    /// Symbology tag used in document names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Symbology::QrCode => "qr",
            Symbology::Barcode => "barcode",
        }
    }
}

impl std::str::FromStr for Symbology {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "qr" => Ok(Symbology::QrCode),
            "barcode" => Ok(Symbology::Barcode),
            other => Err(Error::MalformedRow(format!("unknown symbology '{}'", other))),
        }
    }
}

/// Parameters describing a randomized complete block experiment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentPlan {
    /// Project name
    pub project: String,
    /// Site name
    pub site: String,
    /// Study year
    pub year: i64,
    /// Number of blocks (replicates)
    pub blocks: u32,
    /// Treatment names, one plot per treatment per block
    pub treatments: Vec<String>,
    /// Sampling stage or depth
    pub sampling_stage: String,
}

/// Expand an experiment plan into one QR-style row per plot.
///
/// Plots are numbered `{block}{treatment_index:02}` and the scannable ID
/// joins the identifying parts with underscores.
pub fn expand_experiment(plan: &ExperimentPlan) -> Vec<LabelRow> {
    let treatments: Vec<&str> = if plan.treatments.is_empty() {
        vec!["Treatment"]
    } else {
        plan.treatments.iter().map(|t| t.trim()).collect()
    };
    let blocks = plan.blocks.max(1);

    let mut rows = Vec::with_capacity(blocks as usize * treatments.len());
    for block in 1..=blocks {
        for (i, treatment) in treatments.iter().enumerate() {
            let plot = format!("{}{:02}", block, i + 1);
            let id = [
                plan.project.clone(),
                plan.site.clone(),
                plan.year.to_string(),
                format!("Block-{}", block),
                format!("Treat-{}", treatment),
                plan.sampling_stage.clone(),
                plot.clone(),
            ]
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join("_");

            let row = LabelRow::new()
                .with("Project", plan.project.as_str())
                .with("Site", plan.site.as_str())
                .with("Year", plan.year)
                .with("Block", block as i64)
                .with("Treatment", *treatment)
                .with("Plot", plot.as_str())
                .with("Sampling Stage/Depth", plan.sampling_stage.as_str())
                .with("Experiment Type", "Randomized Complete Block")
                .with("ID", id);
            rows.push(row);
        }
    }

    rows
}
