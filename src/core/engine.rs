use crate::adapters::extractors::extractor_for;
use crate::adapters::renderers::renderer_for;
use crate::core::registry::Registry;
use crate::domain::chart::{ChartSurface, ColorMode, RenderOptions};
use crate::domain::model::{ChartKind, DataPoint, ExtractedSeries, ExtractorKind};
use crate::domain::ports::{ChartRenderer, ConfigProvider, DataExtractor, Storage};
use crate::utils::error::{ChartError, Result};
use crate::utils::monitor::PhaseMonitor;
use std::path::{Path, PathBuf};

/// Owns the current selection: series, chart kind, registry and surface.
pub struct ChartEngine {
    registry: Registry,
    series: ExtractedSeries,
    selected_file: Option<PathBuf>,
    chart_kind: ChartKind,
    surface: ChartSurface,
    rendered: bool,
    monitor: PhaseMonitor,
}

impl ChartEngine {
    pub fn new() -> Self {
        let mut registry = Registry::new();
        registry.register_instance(RenderOptions::default());
        Self::with_registry(registry)
    }

    pub fn with_registry(registry: Registry) -> Self {
        Self {
            registry,
            series: Vec::new(),
            selected_file: None,
            chart_kind: ChartKind::default(),
            surface: ChartSurface::new(),
            rendered: false,
            monitor: PhaseMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(monitor_enabled: bool) -> Self {
        let mut engine = Self::new();
        engine.monitor = PhaseMonitor::new(monitor_enabled);
        engine
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        let mut engine = Self::new();
        engine.registry.register_instance(RenderOptions {
            animation: config.animation(),
            ..RenderOptions::default()
        });
        engine.chart_kind = config.chart_kind();
        engine.surface.set_color_mode(config.color_mode());
        engine
    }

    pub fn with_monitoring(mut self, enabled: bool) -> Self {
        self.monitor = PhaseMonitor::new(enabled);
        self
    }

    /// Validates and extracts `path`, then renders it with the current chart kind.
    ///
    /// The extension picks the extractor. If validation or extraction fails the
    /// previous selection and series stay in place.
    pub fn select_file(&mut self, path: impl AsRef<Path>) -> Result<&[DataPoint]> {
        let path = path.as_ref();
        let kind = ExtractorKind::from_path(path)?;

        self.registry
            .register::<Box<dyn DataExtractor>>(move || extractor_for(kind));
        let extractor = self.registry.resolve::<Box<dyn DataExtractor>>()?;

        let valid = extractor.check_file(path);
        self.monitor.mark("validate");
        if !valid {
            tracing::warn!("{} failed the {:?} structural check", path.display(), kind);
            return Err(if path.exists() {
                ChartError::malformed(
                    path.display().to_string(),
                    format!("not a valid .{} data file", kind.extension()),
                )
            } else {
                ChartError::FileNotFound {
                    path: path.display().to_string(),
                }
            });
        }

        let series = extractor.extract_data(path)?;
        self.monitor.mark("extract");
        tracing::info!("Extracted {} points from {}", series.len(), path.display());

        self.series = series;
        self.selected_file = Some(path.to_path_buf());
        self.render_current()?;
        Ok(&self.series)
    }

    /// Re-registers the renderer for `kind` and redraws. A no-op render-wise
    /// until a file has been selected.
    pub fn set_chart_kind(&mut self, kind: ChartKind) -> Result<()> {
        self.chart_kind = kind;
        if self.selected_file.is_none() {
            tracing::debug!("Chart kind set to {} before any file was selected", kind);
            return Ok(());
        }
        self.render_current()
    }

    pub fn set_color_mode(&mut self, mode: ColorMode) {
        self.surface.set_color_mode(mode);
    }

    fn render_current(&mut self) -> Result<()> {
        let kind = self.chart_kind;
        self.registry
            .register_with(move |(options,): (RenderOptions,)| renderer_for(kind, options));

        let renderer = match self.registry.resolve::<Box<dyn ChartRenderer>>() {
            Ok(renderer) => renderer,
            Err(e) => {
                tracing::error!("Unable to build a {} renderer: {}", kind, e);
                self.rendered = false;
                return Err(e);
            }
        };

        renderer.render(&self.series, &mut self.surface);
        self.rendered = true;
        self.monitor.mark("render");
        tracing::debug!(
            "Rendered {} chart with {} categories",
            kind,
            self.surface.category_count()
        );
        Ok(())
    }

    /// Writes the rendered surface as pretty JSON through `storage`.
    pub fn export<S: Storage>(&self, storage: &S, name: &str) -> Result<()> {
        if !self.rendered {
            return Err(ChartError::NothingRendered);
        }
        let json = serde_json::to_vec_pretty(&self.surface)?;
        storage.write_file(name, &json)?;
        tracing::info!("Exported {} chart to {}", self.chart_kind, name);
        Ok(())
    }

    pub fn log_summary(&self) {
        self.monitor.log_summary();
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn series(&self) -> &[DataPoint] {
        &self.series
    }

    pub fn selected_file(&self) -> Option<&Path> {
        self.selected_file.as_deref()
    }

    pub fn chart_kind(&self) -> ChartKind {
        self.chart_kind
    }

    pub fn color_mode(&self) -> ColorMode {
        self.surface.color_mode()
    }

    pub fn surface(&self) -> &ChartSurface {
        &self.surface
    }

    pub fn is_rendered(&self) -> bool {
        self.rendered
    }
}

impl Default for ChartEngine {
    fn default() -> Self {
        Self::new()
    }
}
