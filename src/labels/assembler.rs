//! Document assembly: one page per row, in row order.

use super::composer::compose_label_page;
use super::row::{LabelRow, LabelStyle, Symbology};
use crate::config::RenderConfig;
use crate::error::Result;
use crate::store::{DocumentHandle, DocumentStore};
use crate::writer::{PdfWriter, PdfWriterConfig};
use chrono::{DateTime, Local};

/// A finalized multi-page label document.
///
/// Created fresh for every generation request and never mutated after
/// assembly; hand it to a [`DocumentStore`] to make it retrievable.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    bytes: bytes::Bytes,
    page_count: usize,
}

impl RenderedDocument {
    /// The document bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the document, yielding its bytes.
    pub fn into_bytes(self) -> bytes::Bytes {
        self.bytes
    }

    /// Number of pages (one per input row).
    pub fn page_count(&self) -> usize {
        self.page_count
    }
}

/// Builds label documents from row collections.
pub struct LabelAssembler {
    config: RenderConfig,
}

impl LabelAssembler {
    /// Create an assembler with the given configuration.
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render every row to one page, in input order.
    ///
    /// An empty row slice yields a valid zero-page document. A row whose
    /// payload cannot be encoded fails the whole assembly; no rows are
    /// skipped silently.
    pub fn assemble(
        &self,
        rows: &[LabelRow],
        style: LabelStyle,
        symbology: Symbology,
    ) -> Result<RenderedDocument> {
        log::debug!(
            "assembling {} {} label page(s), symbology {}",
            rows.len(),
            style.as_str(),
            symbology.as_str()
        );

        let writer_config =
            PdfWriterConfig::default().with_creator(self.config.creator.clone());
        let mut writer = PdfWriter::with_config(writer_config);

        let (width, height) = style.page_size();
        for row in rows {
            let mut page = writer.add_page(width, height);
            compose_label_page(&mut page, row, style, symbology)?;
            page.finish();
        }

        let page_count = writer.page_count();
        let bytes = writer.finish()?;
        log::info!("assembled {} page(s), {} bytes", page_count, bytes.len());

        Ok(RenderedDocument {
            bytes: bytes::Bytes::from(bytes),
            page_count,
        })
    }

    /// Hand a finished document to the backing store under `name`.
    pub fn finalize(
        &self,
        document: RenderedDocument,
        name: &str,
        store: &dyn DocumentStore,
    ) -> Result<DocumentHandle> {
        let handle = store.put(name, document.into_bytes())?;
        log::info!("finalized document '{}'", name);
        Ok(handle)
    }

    /// Assemble, name, and finalize in one step, stamping the document
    /// name with the current local time.
    pub fn generate(
        &self,
        rows: &[LabelRow],
        style: LabelStyle,
        symbology: Symbology,
        store: &dyn DocumentStore,
    ) -> Result<DocumentHandle> {
        let document = self.assemble(rows, style, symbology)?;
        let name = document_name(style, symbology, Local::now());
        self.finalize(document, &name, store)
    }
}

/// The file name for a generation request.
///
/// Biomass names carry the symbology (`biomass_qr_labels_…`,
/// `biomass_barcode_labels_…`); the qr and line styles always use the
/// same code kind, so their names stay plain.
pub fn document_name(style: LabelStyle, symbology: Symbology, at: DateTime<Local>) -> String {
    let stamp = at.format("%Y%m%d_%H%M%S");
    match style {
        LabelStyle::Biomass => {
            format!("{}_{}_labels_{}.pdf", style.as_str(), symbology.as_str(), stamp)
        },
        LabelStyle::Qr | LabelStyle::Line => format!("{}_labels_{}.pdf", style.as_str(), stamp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn assembler() -> LabelAssembler {
        LabelAssembler::new(RenderConfig::new())
    }

    fn biomass_rows(ids: &[&str]) -> Vec<LabelRow> {
        ids.iter()
            .map(|id| {
                LabelRow::new()
                    .with("info1", *id)
                    .with("info2", "Rep1")
                    .with("info3", "V4")
            })
            .collect()
    }

    #[test]
    fn test_page_count_matches_row_count() {
        let rows = biomass_rows(&["B001", "B002", "B003"]);
        let doc = assembler()
            .assemble(&rows, LabelStyle::Biomass, Symbology::QrCode)
            .unwrap();
        assert_eq!(doc.page_count(), 3);
        let content = String::from_utf8_lossy(doc.bytes());
        assert!(content.contains("/Count 3"));
    }

    #[test]
    fn test_page_order_matches_row_order() {
        let rows = biomass_rows(&["AAA", "BBB", "CCC"]);
        let doc = assembler()
            .assemble(&rows, LabelStyle::Biomass, Symbology::QrCode)
            .unwrap();
        let content = String::from_utf8_lossy(doc.bytes()).to_string();
        let a = content.find("(AAA) Tj").unwrap();
        let b = content.find("(BBB) Tj").unwrap();
        let c = content.find("(CCC) Tj").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_empty_rows_yield_zero_page_document() {
        let doc = assembler()
            .assemble(&[], LabelStyle::Qr, Symbology::QrCode)
            .unwrap();
        assert_eq!(doc.page_count(), 0);
        let content = String::from_utf8_lossy(doc.bytes());
        assert!(content.starts_with("%PDF-1.7"));
        assert!(content.contains("/Count 0"));
        assert!(content.ends_with("%%EOF"));
    }

    #[test]
    fn test_bad_row_fails_whole_assembly() {
        let mut rows = biomass_rows(&["B001", "B002"]);
        rows[1].set("info1", "Blöck");
        let result = assembler().assemble(&rows, LabelStyle::Biomass, Symbology::Barcode);
        assert!(result.is_err());
    }

    #[test]
    fn test_document_names() {
        let at = Local.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();
        assert_eq!(
            document_name(LabelStyle::Biomass, Symbology::QrCode, at),
            "biomass_qr_labels_20240115_093000.pdf"
        );
        assert_eq!(
            document_name(LabelStyle::Biomass, Symbology::Barcode, at),
            "biomass_barcode_labels_20240115_093000.pdf"
        );
        assert_eq!(
            document_name(LabelStyle::Qr, Symbology::QrCode, at),
            "qr_labels_20240115_093000.pdf"
        );
        assert_eq!(
            document_name(LabelStyle::Line, Symbology::QrCode, at),
            "line_labels_20240115_093000.pdf"
        );
    }
}
