use clap::{Args, Parser, Subcommand, ValueEnum};
use portfolio_model::EvidenceType;
use portfolio_reports::ExportFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "portfolio")]
#[command(about = "Teacher portfolio reports and evidence bank")]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Serve records from a JSON fixture instead of the backend
    #[arg(long, global = true, conflicts_with = "backend_url")]
    pub fixture: Option<PathBuf>,

    /// Backend API base URL
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the fields of a record type
    Schema {
        /// Record type name, e.g. Certificate
        record_type: String,
    },

    /// Generate a report, print its preview and write exports
    Report(ReportArgs),

    /// Manage the evidence bank
    #[command(subcommand)]
    Evidence(EvidenceCommand),

    /// Show or update the teacher profile
    #[command(subcommand)]
    Profile(ProfileCommand),
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Record type name
    pub record_type: String,

    /// Field to include, in column order (repeatable)
    #[arg(short, long = "field")]
    pub fields: Vec<String>,

    /// Constraint as FIELD=VALUE (repeatable)
    #[arg(long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Export format: csv, json or pdf (repeatable)
    #[arg(long = "format")]
    pub formats: Vec<ExportFormat>,

    /// Directory for export files
    #[arg(short, long, default_value = ".")]
    pub out: PathBuf,

    /// Do not print the preview table
    #[arg(long)]
    pub no_preview: bool,
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected FIELD=VALUE, got {raw:?}")),
    }
}

#[derive(Subcommand, Debug)]
pub enum EvidenceCommand {
    /// List evidence, optionally for one section
    List {
        /// Section key, e.g. planning
        #[arg(long)]
        section: Option<String>,
    },

    /// Add an evidence entry
    Add(AddEvidenceArgs),

    /// Delete an evidence entry
    Delete {
        /// Evidence id
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct AddEvidenceArgs {
    /// Section key
    #[arg(long, default_value = "evidences")]
    pub section: String,

    #[arg(long)]
    pub title: String,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long = "type", value_enum, default_value_t = EvidenceKind::Image)]
    pub kind: EvidenceKind,

    /// Date as YYYY-MM-DD
    #[arg(long, default_value = "")]
    pub date: String,

    /// Comma-separated tags
    #[arg(long, default_value = "")]
    pub tags: String,

    #[arg(long, default_value = "")]
    pub notes: String,

    /// File to upload as the attachment
    #[arg(long, conflicts_with = "url")]
    pub file: Option<PathBuf>,

    /// Existing attachment URL
    #[arg(long)]
    pub url: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvidenceKind {
    Image,
    Pdf,
    Link,
    Video,
    Text,
    QrCode,
}

impl From<EvidenceKind> for EvidenceType {
    fn from(kind: EvidenceKind) -> Self {
        match kind {
            EvidenceKind::Image => EvidenceType::Image,
            EvidenceKind::Pdf => EvidenceType::Pdf,
            EvidenceKind::Link => EvidenceType::Link,
            EvidenceKind::Video => EvidenceType::Video,
            EvidenceKind::Text => EvidenceType::Text,
            EvidenceKind::QrCode => EvidenceType::QrCode,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Print the stored profile
    Show,

    /// Create the profile or update the given fields
    Set(SetProfileArgs),
}

#[derive(Args, Debug, Default)]
pub struct SetProfileArgs {
    #[arg(long)]
    pub full_name: Option<String>,

    #[arg(long)]
    pub specialization: Option<String>,

    #[arg(long)]
    pub school: Option<String>,

    #[arg(long)]
    pub stage: Option<String>,

    #[arg(long)]
    pub experience_years: Option<u32>,

    /// Qualification (repeatable; replaces the stored list)
    #[arg(long = "qualification")]
    pub qualifications: Vec<String>,

    #[arg(long)]
    pub philosophy: Option<String>,

    #[arg(long = "planning-notes")]
    pub planning_intro: Option<String>,

    #[arg(long = "strategies-notes")]
    pub strategies_remedial: Option<String>,
}
