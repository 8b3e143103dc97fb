use super::pdf_doc::{FontStyle, Orientation, PdfDocument};
use super::{EncodeError, ExportContext, ExportFormat, ReportEncoder};
use crate::format::{CellStyle, format_cell, format_date};
use crate::result::ReportResult;

const MARGIN: f32 = 20.0;
const ROW_HEIGHT: f32 = 8.0;
const TABLE_TOP: f32 = 50.0;
const HEADER_CHARS: usize = 20;
const CELL_CHARS: usize = 30;
/// Above this many columns the page turns landscape.
const PORTRAIT_MAX_COLUMNS: usize = 5;

/// Single-table A4 document: title, date and record count, then a header
/// row and one line per record, breaking onto new pages as needed.
pub struct PdfEncoder;

impl ReportEncoder for PdfEncoder {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn encode(&self, report: &ReportResult, ctx: &ExportContext) -> Result<Vec<u8>, EncodeError> {
        let columns = report.columns();
        let orientation = if columns.len() > PORTRAIT_MAX_COLUMNS {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        };
        let mut doc = PdfDocument::a4(orientation);
        let width = doc.width();
        let height = doc.height();

        let title = if report.title().is_empty() {
            "Report"
        } else {
            report.title()
        };
        doc.set_font(FontStyle::Normal, 16.0);
        doc.text(MARGIN, 20.0, title);

        doc.set_font(FontStyle::Normal, 10.0);
        doc.text(
            MARGIN,
            30.0,
            &format!("Date: {}", format_date(ctx.date, &ctx.locale)),
        );
        doc.text(MARGIN, 35.0, &format!("Total Records: {}", report.row_count()));

        let col_width = (width - 2.0 * MARGIN) / columns.len().max(1) as f32;
        let mut y = TABLE_TOP;

        doc.set_font(FontStyle::Bold, 9.0);
        for (i, column) in columns.iter().enumerate() {
            doc.text(
                MARGIN + i as f32 * col_width,
                y,
                &truncate(&column.label, HEADER_CHARS),
            );
        }
        y += ROW_HEIGHT;
        doc.line(MARGIN, y, width - MARGIN, y);
        y += 2.0;

        doc.set_font(FontStyle::Normal, 9.0);
        for record in report.rows() {
            if y > height - MARGIN {
                doc.add_page();
                y = MARGIN;
            }
            for (i, column) in columns.iter().enumerate() {
                let cell = format_cell(record.get(&column.name), CellStyle::Export, &ctx.locale);
                doc.text(MARGIN + i as f32 * col_width, y, &truncate(&cell, CELL_CHARS));
            }
            y += ROW_HEIGHT;
        }

        Ok(doc.finish(title)?)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
