use super::{EncodeError, ExportContext, ExportFormat, ReportEncoder};
use crate::result::ReportResult;
use serde_json::{Map, Value};

/// Array of objects keyed by column label, values kept raw.
///
/// Two columns sharing a label collapse into one key; the later column wins.
pub struct JsonEncoder;

impl ReportEncoder for JsonEncoder {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn encode(&self, report: &ReportResult, _ctx: &ExportContext) -> Result<Vec<u8>, EncodeError> {
        let rows: Vec<Value> = report
            .rows()
            .iter()
            .map(|record| {
                let object: Map<String, Value> = report
                    .columns()
                    .iter()
                    .map(|c| {
                        let value = record.get(&c.name).cloned().unwrap_or(Value::Null);
                        (c.label.clone(), value)
                    })
                    .collect();
                Value::Object(object)
            })
            .collect();

        Ok(serde_json::to_vec_pretty(&rows)?)
    }
}
