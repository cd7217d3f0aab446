use crate::domain::model::ChartKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSet {
    pub label: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum VisualSeries {
    Pie { slices: Vec<PieSlice> },
    Bar { orientation: Orientation, sets: Vec<BarSet> },
}

impl VisualSeries {
    /// Number of visual categories (slices or bar sets).
    pub fn category_count(&self) -> usize {
        match self {
            VisualSeries::Pie { slices } => slices.len(),
            VisualSeries::Bar { sets, .. } => sets.len(),
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        match self {
            VisualSeries::Pie { slices } => slices.iter().map(|s| s.label.as_str()).collect(),
            VisualSeries::Bar { sets, .. } => sets.iter().map(|s| s.label.as_str()).collect(),
        }
    }
}

/// What a single render call produces for one chart kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub title: String,
    pub series: VisualSeries,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub animation: bool,
    pub antialiasing: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            animation: true,
            antialiasing: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Color,
    Monochrome,
}

/// In-memory render target. A UI paints it; the CLI exports it as JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSurface {
    title: Option<String>,
    kind: Option<ChartKind>,
    series: Vec<VisualSeries>,
    options: Option<RenderOptions>,
    color_mode: ColorMode,
    #[serde(skip)]
    needs_redraw: bool,
    #[serde(skip)]
    render_count: u64,
}

impl ChartSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops title, series and options. The colour overlay is kept.
    pub fn clear(&mut self) {
        self.title = None;
        self.kind = None;
        self.series.clear();
        self.options = None;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn add_series(&mut self, kind: ChartKind, series: VisualSeries) {
        self.kind = Some(kind);
        self.series.push(series);
    }

    pub fn apply_options(&mut self, options: RenderOptions) {
        self.options = Some(options);
    }

    pub fn set_color_mode(&mut self, mode: ColorMode) {
        if self.color_mode != mode {
            self.color_mode = mode;
            self.needs_redraw = true;
        }
    }

    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
        self.render_count += 1;
    }

    /// Called by the painter once the pending frame is drawn.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn kind(&self) -> Option<ChartKind> {
        self.kind
    }

    pub fn series(&self) -> &[VisualSeries] {
        &self.series
    }

    pub fn options(&self) -> Option<RenderOptions> {
        self.options
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    pub fn category_count(&self) -> usize {
        self.series.iter().map(VisualSeries::category_count).sum()
    }
}
