use crate::domain::chart::ColorMode;
use crate::domain::model::ChartKind;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ChartError, Result};
use crate::utils::validation::{validate_file_extension, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub chart: ChartSection,
    pub output: Option<OutputConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: Option<String>,
    pub folder: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSection {
    #[serde(default)]
    pub kind: ChartKind,
    #[serde(default)]
    pub monochrome: bool,
    #[serde(default = "default_animation")]
    pub animation: bool,
}

fn default_animation() -> bool {
    true
}

impl Default for ChartSection {
    fn default() -> Self {
        Self {
            kind: ChartKind::default(),
            monochrome: false,
            animation: default_animation(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub json: bool,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ChartError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ChartError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(path) = &self.input.path {
            validate_path("input.path", path)?;
        }
        if let Some(folder) = &self.input.folder {
            validate_path("input.folder", folder)?;
        }
        if let Some(output) = self.output_path() {
            validate_path("output.path", output)?;
            validate_file_extension("output.path", output, &["json"])?;
        }
        Ok(())
    }

    pub fn verbose(&self) -> bool {
        self.logging.as_ref().map(|l| l.verbose).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().map(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> Option<&str> {
        self.input.path.as_deref()
    }

    fn chart_kind(&self) -> ChartKind {
        self.chart.kind
    }

    fn color_mode(&self) -> ColorMode {
        if self.chart.monochrome {
            ColorMode::Monochrome
        } else {
            ColorMode::Color
        }
    }

    fn animation(&self) -> bool {
        self.chart.animation
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.path.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[input]
path = "data/weather.sqlite"

[chart]
kind = "horizontal-bar"
monochrome = true
animation = false

[output]
path = "out/chart.json"

[logging]
verbose = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.input_path(), Some("data/weather.sqlite"));
        assert_eq!(config.chart_kind(), ChartKind::HorizontalBar);
        assert_eq!(config.color_mode(), ColorMode::Monochrome);
        assert!(!config.animation());
        assert_eq!(config.output_path(), Some("out/chart.json"));
        assert!(config.verbose());
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sections_default_when_missing() {
        let config = TomlConfig::from_toml_str("[input]\npath = \"a.csv\"\n").unwrap();

        assert_eq!(config.chart_kind(), ChartKind::Bar);
        assert_eq!(config.color_mode(), ColorMode::Color);
        assert!(config.animation());
        assert_eq!(config.output_path(), None);
    }

    #[test]
    fn test_unknown_chart_kind_fails_to_parse() {
        let result = TomlConfig::from_toml_str("[chart]\nkind = \"radar\"\n");
        assert!(matches!(result, Err(ChartError::ConfigValidationError { .. })));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SMALL_CHARTS_TEST_INPUT", "/data/readings.json");

        let config = TomlConfig::from_toml_str(
            "[input]\npath = \"${SMALL_CHARTS_TEST_INPUT}\"\n",
        )
        .unwrap();
        assert_eq!(config.input_path(), Some("/data/readings.json"));

        std::env::remove_var("SMALL_CHARTS_TEST_INPUT");
    }

    #[test]
    fn test_output_must_be_json() {
        let config = TomlConfig::from_toml_str("[output]\npath = \"chart.pdf\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[input]\nfolder = \"./data\"\n\n[chart]\nkind = \"pie\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.input.folder.as_deref(), Some("./data"));
        assert_eq!(config.chart_kind(), ChartKind::Pie);
    }
}
