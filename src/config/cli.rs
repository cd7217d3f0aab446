use crate::config::toml_config::TomlConfig;
use crate::domain::chart::ColorMode;
use crate::domain::model::ChartKind;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_extension, validate_path, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "small-charts")]
#[command(about = "Turn a sqlite, json or csv data file into a chart")]
pub struct CliConfig {
    /// Data file to chart (.sqlite, .json or .csv)
    #[arg(short, long)]
    pub file: Option<String>,

    /// Chart kind
    #[arg(short, long, value_enum)]
    pub chart: Option<ChartKind>,

    /// Render in black and white
    #[arg(long)]
    pub monochrome: bool,

    /// Disable the series entry animation
    #[arg(long)]
    pub no_animation: bool,

    /// Export the rendered chart as JSON to this path
    #[arg(short, long)]
    pub output: Option<String>,

    /// List the files of a folder instead of charting one
    #[arg(long)]
    pub list: Option<String>,

    /// Path to a TOML configuration file; flags override its values
    #[arg(long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log per-phase timing and memory")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Applies the flags that were given on top of a file configuration.
    pub fn apply_to(&self, config: &mut TomlConfig) {
        if let Some(file) = &self.file {
            config.input.path = Some(file.clone());
        }
        if let Some(chart) = self.chart {
            config.chart.kind = chart;
        }
        if self.monochrome {
            config.chart.monochrome = true;
        }
        if self.no_animation {
            config.chart.animation = false;
        }
        if let Some(output) = &self.output {
            config.output.get_or_insert_with(Default::default).path = Some(output.clone());
        }
    }
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> Option<&str> {
        self.file.as_deref()
    }

    fn chart_kind(&self) -> ChartKind {
        self.chart.unwrap_or_default()
    }

    fn color_mode(&self) -> ColorMode {
        if self.monochrome {
            ColorMode::Monochrome
        } else {
            ColorMode::Color
        }
    }

    fn animation(&self) -> bool {
        !self.no_animation
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_deref()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(file) = &self.file {
            validate_path("--file", file)?;
        }
        if let Some(output) = &self.output {
            validate_path("--output", output)?;
            validate_file_extension("--output", output, &["json"])?;
        }
        if let Some(folder) = &self.list {
            validate_path("--list", folder)?;
        }
        if let Some(config) = &self.config {
            validate_file_extension("--config", config, &["toml"])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let config = CliConfig::parse_from([
            "small-charts",
            "--file",
            "sales.csv",
            "--chart",
            "horizontal-bar",
            "--monochrome",
            "--output",
            "out/chart.json",
        ]);

        assert_eq!(config.input_path(), Some("sales.csv"));
        assert_eq!(config.chart_kind(), ChartKind::HorizontalBar);
        assert_eq!(config.color_mode(), ColorMode::Monochrome);
        assert!(config.animation());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["small-charts"]);
        assert_eq!(config.chart_kind(), ChartKind::Bar);
        assert_eq!(config.color_mode(), ColorMode::Color);
        assert_eq!(config.output_path(), None);
    }

    #[test]
    fn test_validation_rejects_non_json_output() {
        let config = CliConfig::parse_from(["small-charts", "--file", "a.csv", "--output", "chart.pdf"]);
        assert!(config.validate().is_err());
    }
}
