//! CLI configuration.
//!
//! ```toml
//! [backend]
//! base_url = "https://api.example.com/apps/portfolio"
//! api_key = "..."
//! timeout_secs = 30
//! # fixture = "demos/certificates.json"
//!
//! [locale]
//! date_format = "%Y-%m-%d"
//! ```

use crate::cli::Cli;
use anyhow::{Context, Result};
use portfolio_reports::Locale;
use portfolio_store::HttpBackendConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub locale: Locale,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// JSON fixture served in memory instead of the HTTP backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixture: Option<PathBuf>,
    #[serde(flatten)]
    pub http: HttpBackendConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Config file (if any) with command-line overrides applied.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(fixture) = &cli.fixture {
            config.backend.fixture = Some(fixture.clone());
        }
        if let Some(url) = &cli.backend_url {
            config.backend.http.base_url = url.clone();
            config.backend.fixture = None;
        }
        Ok(config)
    }
}
