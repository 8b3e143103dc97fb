use crate::backend::Backends;
use crate::cli::{AddEvidenceArgs, EvidenceCommand};
use crate::output::{create_standard_table, header_cell};
use anyhow::{Context, Result, bail};
use portfolio_model::{EvidenceDraft, PortfolioSection};
use portfolio_store::EvidenceBank;
use std::io::Write;

pub async fn run(backends: &Backends, command: &EvidenceCommand, out: &mut dyn Write) -> Result<()> {
    let bank = EvidenceBank::new(backends.records.clone(), backends.files.clone());
    match command {
        EvidenceCommand::List { section } => list(&bank, section.as_deref(), out).await,
        EvidenceCommand::Add(args) => add(&bank, args, out).await,
        EvidenceCommand::Delete { id } => {
            bank.delete(id).await?;
            writeln!(out, "Deleted {id}")?;
            Ok(())
        }
    }
}

fn section(key: &str) -> Result<PortfolioSection> {
    match PortfolioSection::from_key(key) {
        Some(section) => Ok(section),
        None => {
            let known: Vec<_> = PortfolioSection::ALL.iter().map(|s| s.key()).collect();
            bail!("Unknown section {key:?} (expected one of: {})", known.join(", "))
        }
    }
}

async fn list(bank: &EvidenceBank, section_key: Option<&str>, out: &mut dyn Write) -> Result<()> {
    let items = match section_key {
        Some(key) => bank.list(section(key)?.key()).await?,
        None => bank.list_all().await?,
    };

    if items.is_empty() {
        writeln!(out, "لا توجد شواهد")?;
        return Ok(());
    }

    let mut table = create_standard_table();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Section"),
        header_cell("Type"),
        header_cell("Title"),
        header_cell("Date"),
        header_cell("Tags"),
    ]);
    for item in &items {
        let section_title = PortfolioSection::from_key(&item.section_key)
            .map(|s| s.title().to_string())
            .unwrap_or_else(|| item.section_key.clone());
        table.add_row(vec![
            item.id.clone(),
            section_title,
            format!("{} {}", item.evidence_type.icon(), item.evidence_type.label()),
            item.title.clone(),
            item.date.clone(),
            item.tags.join(", "),
        ]);
    }
    writeln!(out, "{table}")?;
    writeln!(out, "{} items", items.len())?;
    Ok(())
}

async fn add(bank: &EvidenceBank, args: &AddEvidenceArgs, out: &mut dyn Write) -> Result<()> {
    let mut draft = EvidenceDraft::new(section(&args.section)?, args.title.clone());
    draft.description = args.description.clone();
    draft.evidence_type = args.kind.into();
    draft.date = args.date.clone();
    draft.tags = args.tags.clone();
    draft.notes = args.notes.clone();

    if let Some(url) = &args.url {
        draft.file_url = url.clone();
    }
    if let Some(path) = &args.file {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());
        draft.file_url = bank.upload(&file_name, bytes).await?;
    }

    let evidence = bank.add(draft).await?;
    writeln!(out, "Added {} ({})", evidence.id, evidence.title)?;
    Ok(())
}
