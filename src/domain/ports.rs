use crate::domain::chart::{ChartConfig, ChartSurface, ColorMode, RenderOptions, VisualSeries};
use crate::domain::model::{ChartKind, DataPoint, ExtractedSeries, ExtractorKind};
use crate::utils::error::Result;
use std::path::Path;

/// Reads one file format into a normalized series.
pub trait DataExtractor {
    fn kind(&self) -> ExtractorKind;

    /// Cheap structural check. Never errors: a missing or unreadable file is `false`.
    fn check_file(&self, path: &Path) -> bool;

    /// Only meaningful after `check_file` returned `true` for the same path.
    fn extract_data(&self, path: &Path) -> Result<ExtractedSeries>;
}

/// Maps a series onto one chart kind.
pub trait ChartRenderer {
    fn kind(&self) -> ChartKind;

    fn title(&self) -> &str;

    fn options(&self) -> RenderOptions;

    fn build_series(&self, series: &[DataPoint]) -> VisualSeries;

    fn configure(&self, series: &[DataPoint]) -> ChartConfig {
        ChartConfig {
            kind: self.kind(),
            title: self.title().to_string(),
            series: self.build_series(series),
        }
    }

    fn render(&self, series: &[DataPoint], surface: &mut ChartSurface) {
        let config = self.configure(series);
        surface.clear();
        surface.set_title(config.title);
        surface.add_series(config.kind, config.series);
        surface.apply_options(self.options());
        surface.request_redraw();
    }
}

pub trait Storage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> Option<&str>;
    fn chart_kind(&self) -> ChartKind;
    fn color_mode(&self) -> ColorMode;
    fn animation(&self) -> bool;
    fn output_path(&self) -> Option<&str>;
}
