use crate::utils::error::{ChartError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// One normalized (label, value) pair produced by an extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
}

impl DataPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Order is significant: chronological for tabular sources, file order otherwise.
pub type ExtractedSeries = Vec<DataPoint>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtractorKind {
    Sql,
    Json,
    Csv,
}

impl ExtractorKind {
    pub fn from_extension(extension: &str) -> Result<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "sqlite" => Ok(ExtractorKind::Sql),
            "json" => Ok(ExtractorKind::Json),
            "csv" => Ok(ExtractorKind::Csv),
            _ => Err(ChartError::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");
        Self::from_extension(extension)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExtractorKind::Sql => "sqlite",
            ExtractorKind::Json => "json",
            ExtractorKind::Csv => "csv",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    #[default]
    Bar,
    Pie,
    HorizontalBar,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::HorizontalBar => "horizontal-bar",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extractor_kind_from_path() {
        assert_eq!(
            ExtractorKind::from_path(Path::new("/tmp/metrics.sqlite")).unwrap(),
            ExtractorKind::Sql
        );
        assert_eq!(
            ExtractorKind::from_path(Path::new("report.JSON")).unwrap(),
            ExtractorKind::Json
        );
        assert_eq!(
            ExtractorKind::from_path(Path::new("sales.csv")).unwrap(),
            ExtractorKind::Csv
        );
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        let err = ExtractorKind::from_path(Path::new("notes.txt")).unwrap_err();
        assert!(matches!(
            err,
            ChartError::UnsupportedFormat { ref extension } if extension == "txt"
        ));

        assert!(ExtractorKind::from_path(Path::new("Makefile")).is_err());
    }

    #[test]
    fn test_chart_kind_serde_names() {
        let kind: ChartKind = serde_json::from_str("\"horizontal-bar\"").unwrap();
        assert_eq!(kind, ChartKind::HorizontalBar);
        assert_eq!(ChartKind::default(), ChartKind::Bar);
        assert_eq!(ChartKind::Pie.to_string(), "pie");
    }
}
