pub mod cli;
pub mod plates;
pub mod toml_config;

use crate::core::client::DEFAULT_BASE_URL;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::{self, Validate};

#[cfg(feature = "cli")]
use clap::Parser;

#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "vehicle-harvest"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Harvest vehicle records by license plate into a dated JSON snapshot")
)]
pub struct CliConfig {
    /// Plates to query, in order (comma separated)
    #[cfg_attr(feature = "cli", arg(long, value_delimiter = ','))]
    pub plates: Vec<String>,

    /// CSV or text file with one plate per row; appended after --plates
    #[cfg_attr(feature = "cli", arg(long))]
    pub plates_file: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, env = "BOOSTR_API_KEY", hide_env_values = true))]
    pub api_key: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_BASE_URL))]
    pub base_url: String,

    /// Existing directory the snapshot is written to
    #[cfg_attr(feature = "cli", arg(long, default_value = "."))]
    pub output_path: String,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Log CPU and memory usage per phase"))]
    pub monitor: bool,

    #[cfg_attr(feature = "cli", arg(long, value_enum, default_value_t = LogFormat::Compact))]
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Appends the plates from `--plates-file`, if any, after the inline ones.
    pub fn resolve_plates(&mut self) -> Result<()> {
        if let Some(path) = self.plates_file.take() {
            let from_file = plates::load_plates_file(&path)?;
            tracing::info!("📄 Loaded {} plates from {}", from_file.len(), path);
            self.plates.extend(from_file);
        }
        Ok(())
    }
}

impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn plates(&self) -> &[String] {
        &self.plates
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        let api_key = validation::validate_required_field("api_key", &self.api_key)?;
        validation::validate_non_empty_string("api_key", api_key)?;
        validation::validate_path("output_path", &self.output_path)?;
        Ok(())
    }
}
