use crate::config::plates;
use crate::core::client::DEFAULT_BASE_URL;
use crate::core::ConfigProvider;
use crate::utils::error::{HarvestError, Result};
use crate::utils::validation::{self, Validate};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex")
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub harvest: HarvestConfig,
    pub source: SourceConfig,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    pub name: Option<String>,
    #[serde(default)]
    pub plates: Vec<String>,
    pub plates_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| HarvestError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BOOSTR_API_KEY})；未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &Captures<'_>| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// Appends the plates from `harvest.plates_file`, resolved against `base_dir`
    /// when relative.
    pub fn resolve_plates(&mut self, base_dir: &Path) -> Result<()> {
        if let Some(file) = self.harvest.plates_file.take() {
            let path = base_dir.join(&file);
            let from_file = plates::load_plates_file(&path)?;
            tracing::info!("📄 Loaded {} plates from {}", from_file.len(), path.display());
            self.harvest.plates.extend(from_file);
        }
        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        &self.source.base_url
    }

    fn api_key(&self) -> &str {
        self.source.api_key.as_deref().unwrap_or_default()
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn plates(&self) -> &[String] {
        &self.harvest.plates
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.base_url", &self.source.base_url)?;

        let api_key = validation::validate_required_field("source.api_key", &self.source.api_key)?;
        if ENV_VAR_PATTERN.is_match(api_key) {
            return Err(HarvestError::ConfigError {
                message: format!("source.api_key references an unset variable: {}", api_key),
            });
        }
        validation::validate_non_empty_string("source.api_key", api_key)?;

        validation::validate_path("load.output_path", &self.load.output_path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[harvest]
name = "daily-plates"
plates = ["KSLS76", "SHVK45", "TSTL65"]

[source]
api_key = "literal-key"

[load]
output_path = "./metadata/vehiculos"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.harvest.name.as_deref(), Some("daily-plates"));
        assert_eq!(config.plates(), ["KSLS76", "SHVK45", "TSTL65"]);
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.api_key(), "literal-key");
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("VEHICLE_HARVEST_TEST_KEY", "from-env");

        let toml_content = r#"
[harvest]

[source]
api_key = "${VEHICLE_HARVEST_TEST_KEY}"

[load]
output_path = "./output"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api_key(), "from-env");

        std::env::remove_var("VEHICLE_HARVEST_TEST_KEY");
    }

    #[test]
    fn test_unset_env_var_fails_validation() {
        let toml_content = r#"
[harvest]

[source]
api_key = "${VEHICLE_HARVEST_DEFINITELY_UNSET}"

[load]
output_path = "./output"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(HarvestError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[harvest]

[source]
base_url = "invalid-url"
api_key = "k"

[load]
output_path = "./output"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file_with_plates_file() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("plates.csv"), "patente\nSHVK45\n").unwrap();

        let mut temp_file = NamedTempFile::new_in(dir.path()).unwrap();
        let toml_content = r#"
[harvest]
plates = ["KSLS76"]
plates_file = "plates.csv"

[source]
api_key = "k"

[load]
output_path = "./output"

[monitoring]
enabled = true
"#;
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let mut config = TomlConfig::from_file(temp_file.path()).unwrap();
        config.resolve_plates(dir.path()).unwrap();

        assert_eq!(config.plates(), ["KSLS76", "SHVK45"]);
        assert!(config.monitoring_enabled());
    }
}
