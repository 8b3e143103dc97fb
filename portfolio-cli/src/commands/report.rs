use crate::backend::Backends;
use crate::cli::ReportArgs;
use crate::output::write_preview;
use anyhow::{Context, Result};
use portfolio_reports::{ExportContext, ExportFormat, Locale, ReportSession};
use std::io::Write;
use tracing::{info, warn};

pub async fn run(
    backends: &Backends,
    locale: &Locale,
    args: &ReportArgs,
    out: &mut dyn Write,
) -> Result<()> {
    let store = backends.records.as_ref();
    let mut session = ReportSession::new(locale.clone());
    session.select_record_type(store, &args.record_type).await?;

    for field in &args.fields {
        if !session.selected_fields().contains(field) {
            session.toggle_field(field)?;
        }
    }
    for (field, value) in &args.filters {
        session.set_filter(field, value)?;
    }

    let report = session.generate(store).await?;

    if !args.no_preview {
        if let Some(preview) = session.preview() {
            write_preview(out, &preview)?;
        }
    }

    if args.formats.is_empty() {
        return Ok(());
    }
    if report.is_empty() {
        warn!("Report for {} is empty, nothing to export", args.record_type);
        return Ok(());
    }

    tokio::fs::create_dir_all(&args.out)
        .await
        .with_context(|| format!("Failed to create output directory {}", args.out.display()))?;

    let ctx = ExportContext::today(locale.clone());
    let mut written: Vec<ExportFormat> = Vec::new();
    let mut first_error = None;
    for format in &args.formats {
        if written.contains(format) {
            continue;
        }
        let artifact = match session.export(*format, &ctx) {
            Ok(artifact) => artifact,
            Err(e) => {
                warn!("{format} export failed: {e}");
                first_error.get_or_insert(e);
                continue;
            }
        };
        let path = args.out.join(&artifact.file_name);
        tokio::fs::write(&path, &artifact.bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {} ({} bytes)", path.display(), artifact.bytes.len());
        writeln!(out, "{}: {}", format.label(), path.display())?;
        written.push(*format);
    }

    match first_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
