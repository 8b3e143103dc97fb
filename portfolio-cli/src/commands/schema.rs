use crate::backend::Backends;
use crate::output::{create_standard_table, header_cell};
use anyhow::Result;
use portfolio_model::FieldKind;
use portfolio_reports::{Locale, ReportSession};
use std::io::Write;

pub async fn run(
    backends: &Backends,
    locale: &Locale,
    record_type: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let mut session = ReportSession::new(locale.clone());
    let schema = session
        .select_record_type(backends.records.as_ref(), record_type)
        .await?;

    let filterable: Vec<String> = session
        .filterable_fields()
        .iter()
        .map(|f| f.name.clone())
        .collect();

    let mut table = create_standard_table();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Kind"),
        header_cell("Filter"),
        header_cell("Options"),
    ]);
    for field in session.selectable_fields() {
        let kind = field.kind.map_or("built-in", FieldKind::as_str);
        let filter = if filterable.contains(&field.name) { "✓" } else { "" };
        let options = schema
            .field(&field.name)
            .and_then(|f| f.allowed_values.as_ref())
            .map(|values| values.join(", "))
            .unwrap_or_default();
        table.add_row(vec![
            field.name.as_str(),
            field.label.as_str(),
            kind,
            filter,
            options.as_str(),
        ]);
    }

    writeln!(out, "{record_type}")?;
    writeln!(out, "{table}")?;
    Ok(())
}
