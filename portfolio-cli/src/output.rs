//! Terminal tables.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use portfolio_reports::{Preview, PreviewTable};
use std::io::{self, Write};

pub fn create_standard_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold).fg(Color::Cyan)
}

pub fn write_preview(out: &mut dyn Write, preview: &Preview) -> io::Result<()> {
    match preview {
        Preview::Empty { title, message } => {
            writeln!(out, "{title}")?;
            writeln!(out, "{message}")
        }
        Preview::Table(table) => write_preview_table(out, table),
    }
}

fn write_preview_table(out: &mut dyn Write, preview: &PreviewTable) -> io::Result<()> {
    let mut table = create_standard_table();
    table.set_header(preview.headers.iter().map(|h| header_cell(h)));
    for row in &preview.rows {
        table.add_row(
            std::iter::once(Cell::new(row.number)).chain(row.cells.iter().map(Cell::new)),
        );
    }
    writeln!(out, "{}", preview.title)?;
    writeln!(out, "{table}")?;
    writeln!(out, "{}", preview.summary)
}
