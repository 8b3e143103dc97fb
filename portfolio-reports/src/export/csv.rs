use super::{EncodeError, ExportContext, ExportFormat, ReportEncoder};
use crate::format::{CellStyle, format_cell};
use crate::result::ReportResult;
use ::csv::{QuoteStyle, Terminator, WriterBuilder};

/// UTF-8 byte order mark, so spreadsheet tools detect the encoding.
const BOM: &str = "\u{feff}";

/// Header row of labels, then one row per record with every cell quoted.
pub struct CsvEncoder;

impl ReportEncoder for CsvEncoder {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn encode(&self, report: &ReportResult, ctx: &ExportContext) -> Result<Vec<u8>, EncodeError> {
        let mut out = BOM.as_bytes().to_vec();

        {
            let mut header = WriterBuilder::new()
                .quote_style(QuoteStyle::Necessary)
                .terminator(Terminator::Any(b'\n'))
                .from_writer(&mut out);
            header.write_record(report.columns().iter().map(|c| c.label.as_str()))?;
            header.flush()?;
        }

        {
            let mut rows = WriterBuilder::new()
                .quote_style(QuoteStyle::Always)
                .terminator(Terminator::Any(b'\n'))
                .from_writer(&mut out);
            for record in report.rows() {
                rows.write_record(report.columns().iter().map(|c| {
                    format_cell(record.get(&c.name), CellStyle::Export, &ctx.locale)
                }))?;
            }
            rows.flush()?;
        }

        Ok(out)
    }
}
