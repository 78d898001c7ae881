//! Page composition: draw one label's full visual content onto a page.
//!
//! The geometry here is the binary contract of the printed output. All
//! constants are in points (1 inch = 72 points) and are fixed per style;
//! changing any of them changes the physical result.

use super::formatter::{format_fields, FormattedFields, PLACEHOLDER};
use super::row::{LabelRow, LabelStyle, Symbology};
use crate::error::Result;
use crate::writer::{centered_x, CodeImage, ImagePlacement, PageBuilder};

// QR style, 2"x3" portrait
const QR_CODE_POS: (f32, f32) = (36.0, 126.0);
const QR_CODE_SIZE: f32 = 72.0;
const QR_TEXT_X: f32 = 7.2;
const QR_TEXT_TOP_Y: f32 = 104.4;
const QR_LINE_STEP: f32 = 15.0;

// Biomass and line styles, 3"x2" landscape
const PAGE_CENTER_X: f32 = 108.0;
const BORDER_INSET: f32 = 3.6;
const BORDER_WIDTH: f32 = 208.8;
const BORDER_HEIGHT: f32 = 136.8;

const BIOMASS_BORDER_Y: f32 = 1.8;
const BIOMASS_LINE_YS: [f32; 3] = [115.2, 86.4, 64.8];
const BIOMASS_QR_SIZE: f32 = 43.2;
const BIOMASS_QR_Y: f32 = 14.4;
const BIOMASS_BARCODE_Y: f32 = 21.6;
const BIOMASS_UCODE_Y: f32 = 5.76;
/// Width of one Code 128 bar module on the page.
const BAR_MODULE_WIDTH: f32 = 0.7;
const BAR_HEIGHT: f32 = 28.8;

const LINE_CENTER_Y: f32 = 72.0;
const LINE_QR_SIZE: f32 = 50.4;
const LINE_LEFT_X: f32 = 10.8;
const LINE_RIGHT_X: f32 = 151.2;
const LINE_UPPER_Y: f32 = 86.4;
const LINE_LOWER_Y: f32 = 61.2;

/// Draw one row's label onto a fresh page of the given style.
///
/// The code raster is generated in memory, composited, and dropped before
/// this returns; it never outlives the page draw.
pub fn compose_label_page(
    page: &mut PageBuilder<'_>,
    row: &LabelRow,
    style: LabelStyle,
    symbology: Symbology,
) -> Result<()> {
    match style {
        LabelStyle::Qr => compose_qr(page, row),
        LabelStyle::Biomass => compose_biomass(page, row, symbology),
        LabelStyle::Line => compose_line(page, row),
    }
}

/// QR style: code at a fixed top position, field list below, no border.
fn compose_qr(page: &mut PageBuilder<'_>, row: &LabelRow) -> Result<()> {
    let payload = row.present("ID").unwrap_or_else(|| "NO_ID".to_string());
    let code = CodeImage::encode_qr(&payload)?;
    page.draw_image(
        code.to_xobject()?,
        &ImagePlacement::new(QR_CODE_POS.0, QR_CODE_POS.1, QR_CODE_SIZE, QR_CODE_SIZE),
    );

    let FormattedFields::Qr { lines } = format_fields(row, LabelStyle::Qr) else {
        unreachable!("qr formatter returns the qr variant");
    };
    for (i, line) in lines.iter().enumerate() {
        let y = QR_TEXT_TOP_Y - QR_LINE_STEP * i as f32;
        page.add_text(&line.text, QR_TEXT_X, y, line.weight, line.size);
    }

    Ok(())
}

/// Biomass style: bordered page, centered text stack, code near the bottom.
fn compose_biomass(
    page: &mut PageBuilder<'_>,
    row: &LabelRow,
    symbology: Symbology,
) -> Result<()> {
    page.stroke_rect(BORDER_INSET, BIOMASS_BORDER_Y, BORDER_WIDTH, BORDER_HEIGHT);

    let FormattedFields::Biomass { lines, unique_code } =
        format_fields(row, LabelStyle::Biomass)
    else {
        unreachable!("biomass formatter returns the biomass variant");
    };
    for (line, y) in lines.iter().zip(BIOMASS_LINE_YS) {
        let x = centered_x(&line.text, line.weight, line.size, PAGE_CENTER_X);
        page.add_text(&line.text, x, y, line.weight, line.size);
    }

    let payload = row.present("info1").unwrap_or_else(|| PLACEHOLDER.to_string());
    match symbology {
        Symbology::QrCode => {
            let code = CodeImage::encode_qr(&payload)?;
            page.draw_image(
                code.to_xobject()?,
                &ImagePlacement::new(
                    PAGE_CENTER_X - BIOMASS_QR_SIZE / 2.0,
                    BIOMASS_QR_Y,
                    BIOMASS_QR_SIZE,
                    BIOMASS_QR_SIZE,
                ),
            );
        },
        Symbology::Barcode => {
            let code = CodeImage::encode_code128(&payload)?;
            // Center horizontally using the symbol's own module width
            let width = code.module_count() as f32 * BAR_MODULE_WIDTH;
            page.draw_image(
                code.to_xobject()?,
                &ImagePlacement::new(
                    PAGE_CENTER_X - width / 2.0,
                    BIOMASS_BARCODE_Y,
                    width,
                    BAR_HEIGHT,
                ),
            );
        },
    }

    if let Some(code_line) = unique_code {
        let x = centered_x(&code_line.text, code_line.weight, code_line.size, PAGE_CENTER_X);
        page.add_text(&code_line.text, x, BIOMASS_UCODE_Y, code_line.weight, code_line.size);
    }

    Ok(())
}

/// Line style: code in the exact page center, text columns on both sides.
fn compose_line(page: &mut PageBuilder<'_>, row: &LabelRow) -> Result<()> {
    page.stroke_rect(BORDER_INSET, BORDER_INSET, BORDER_WIDTH, BORDER_HEIGHT);

    let payload = row
        .present("ucode")
        .or_else(|| row.present("info1"))
        .unwrap_or_else(|| "ID".to_string());
    let code = CodeImage::encode_qr(&payload)?;
    page.draw_image(
        code.to_xobject()?,
        &ImagePlacement::centered(PAGE_CENTER_X, LINE_CENTER_Y, LINE_QR_SIZE, LINE_QR_SIZE),
    );

    let FormattedFields::Line {
        caption,
        identifier,
        info,
        code: code_line,
    } = format_fields(row, LabelStyle::Line)
    else {
        unreachable!("line formatter returns the line variant");
    };

    page.add_text(&caption.text, LINE_LEFT_X, LINE_UPPER_Y, caption.weight, caption.size);
    page.add_text(
        &identifier.text,
        LINE_LEFT_X,
        LINE_LOWER_Y,
        identifier.weight,
        identifier.size,
    );

    if let Some(info) = info {
        page.add_text(&info.text, LINE_RIGHT_X, LINE_UPPER_Y, info.weight, info.size);
    }
    if let Some(code_line) = code_line {
        page.add_text(
            &code_line.text,
            LINE_RIGHT_X,
            LINE_LOWER_Y,
            code_line.weight,
            code_line.size,
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::PdfWriter;

    fn render_single(row: &LabelRow, style: LabelStyle, symbology: Symbology) -> String {
        let mut writer = PdfWriter::new();
        let (width, height) = style.page_size();
        {
            let mut page = writer.add_page(width, height);
            compose_label_page(&mut page, row, style, symbology).unwrap();
            page.finish();
        }
        String::from_utf8_lossy(&writer.finish().unwrap()).to_string()
    }

    #[test]
    fn test_qr_page_contents() {
        let row = LabelRow::new()
            .with("Plot", "101")
            .with("Site", "Topeka")
            .with("Year", 2024i64)
            .with("Project", "Nfix")
            .with("Treatment", "Control")
            .with("Sampling Stage/Depth", "V4")
            .with("ID", "Nfix_Topeka_2024_Block-1_Treat-Control_V4_101");
        let content = render_single(&row, LabelStyle::Qr, Symbology::QrCode);

        assert!(content.contains("[0 0 144 216]"));
        assert!(content.contains("/Im1 Do"));
        assert!(content.contains("72 0 0 72 36 126 cm"));
        assert!(content.contains("(Plot: 101) Tj"));
        assert!(content.contains("/Helvetica-Bold 10 Tf"));
        assert!(content.contains("(Treatment: Control) Tj"));
        // No border on the qr style
        assert!(!content.contains("208.8 136.8 re"));
    }

    #[test]
    fn test_qr_missing_id_uses_fallback_payload() {
        let row = LabelRow::new().with("Plot", "101");
        // NO_ID payload still renders a page rather than failing
        let content = render_single(&row, LabelStyle::Qr, Symbology::QrCode);
        assert!(content.contains("/Im1 Do"));
        assert!(content.contains("(Site: N/A) Tj"));
    }

    #[test]
    fn test_biomass_barcode_page_contents() {
        let row = LabelRow::new()
            .with("info1", "B001")
            .with("info2", "Rep1")
            .with("info3", "V4")
            .with("ucode", "");
        let content = render_single(&row, LabelStyle::Biomass, Symbology::Barcode);

        assert!(content.contains("[0 0 216 144]"));
        assert!(content.contains("3.6 1.8 208.8 136.8 re"));
        assert!(content.contains("(B001) Tj"));
        assert!(content.contains("(Rep1) Tj"));
        assert!(content.contains("/Im1 Do"));
        // Empty ucode: no 8pt unique-code line
        assert!(!content.contains("/Helvetica-Bold 8 Tf"));
    }

    #[test]
    fn test_biomass_qr_symbology() {
        let row = LabelRow::new()
            .with("info1", "B001")
            .with("info2", "Rep1")
            .with("info3", "V4")
            .with("ucode", "U-77");
        let content = render_single(&row, LabelStyle::Biomass, Symbology::QrCode);

        // 43.2pt square at y=14.4
        assert!(content.contains("43.2 0 0 43.2 86.4 14.4 cm"));
        assert!(content.contains("(U-77) Tj"));
        assert!(content.contains("/Helvetica-Bold 8 Tf"));
    }

    #[test]
    fn test_line_page_contents() {
        let row = LabelRow::new()
            .with("info1", "L007")
            .with("info2", "Site A")
            .with("info3", "")
            .with("ucode", "X99");
        let content = render_single(&row, LabelStyle::Line, Symbology::QrCode);

        assert!(content.contains("3.6 3.6 208.8 136.8 re"));
        // 50.4pt QR centered on (108, 72)
        assert!(content.contains("50.4 0 0 50.4 82.8 46.8 cm"));
        assert!(content.contains("(Plot) Tj"));
        assert!(content.contains("(L007) Tj"));
        assert!(content.contains("(Site A) Tj"));
        assert!(content.contains("(Code: X99) Tj"));
    }

    #[test]
    fn test_line_without_optional_fields() {
        let row = LabelRow::new().with("info1", "L007");
        let content = render_single(&row, LabelStyle::Line, Symbology::QrCode);

        assert!(content.contains("(L007) Tj"));
        assert!(!content.contains("(Code:"));
    }

    #[test]
    fn test_line_symbology_is_ignored() {
        let row = LabelRow::new().with("info1", "L007").with("ucode", "X99");
        let with_barcode = render_single(&row, LabelStyle::Line, Symbology::Barcode);
        let with_qr = render_single(&row, LabelStyle::Line, Symbology::QrCode);
        assert_eq!(with_barcode, with_qr);
    }

    #[test]
    fn test_code128_failure_propagates() {
        let row = LabelRow::new().with("info1", "Blöck");
        let mut writer = PdfWriter::new();
        let (width, height) = LabelStyle::Biomass.page_size();
        let mut page = writer.add_page(width, height);
        let result = compose_label_page(&mut page, &row, LabelStyle::Biomass, Symbology::Barcode);
        assert!(result.is_err());
    }
}
