use crate::domain::chart::{BarSet, Orientation, PieSlice, RenderOptions, VisualSeries};
use crate::domain::model::{ChartKind, DataPoint};
use crate::domain::ports::ChartRenderer;

pub const PIE_TITLE: &str = "Pie chart";
pub const BAR_TITLE: &str = "Bar chart";
pub const HORIZONTAL_BAR_TITLE: &str = "Horizontal bar chart";

fn bar_sets(series: &[DataPoint]) -> Vec<BarSet> {
    series
        .iter()
        .map(|point| BarSet {
            label: point.label.clone(),
            values: vec![point.value],
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PieChartRenderer {
    options: RenderOptions,
}

impl PieChartRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl ChartRenderer for PieChartRenderer {
    fn kind(&self) -> ChartKind {
        ChartKind::Pie
    }

    fn title(&self) -> &str {
        PIE_TITLE
    }

    fn options(&self) -> RenderOptions {
        self.options
    }

    fn build_series(&self, series: &[DataPoint]) -> VisualSeries {
        VisualSeries::Pie {
            slices: series
                .iter()
                .map(|point| PieSlice {
                    label: point.label.clone(),
                    value: point.value,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BarChartRenderer {
    options: RenderOptions,
}

impl BarChartRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl ChartRenderer for BarChartRenderer {
    fn kind(&self) -> ChartKind {
        ChartKind::Bar
    }

    fn title(&self) -> &str {
        BAR_TITLE
    }

    fn options(&self) -> RenderOptions {
        self.options
    }

    fn build_series(&self, series: &[DataPoint]) -> VisualSeries {
        VisualSeries::Bar {
            orientation: Orientation::Vertical,
            sets: bar_sets(series),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HorizontalBarChartRenderer {
    options: RenderOptions,
}

impl HorizontalBarChartRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl ChartRenderer for HorizontalBarChartRenderer {
    fn kind(&self) -> ChartKind {
        ChartKind::HorizontalBar
    }

    fn title(&self) -> &str {
        HORIZONTAL_BAR_TITLE
    }

    fn options(&self) -> RenderOptions {
        self.options
    }

    fn build_series(&self, series: &[DataPoint]) -> VisualSeries {
        VisualSeries::Bar {
            orientation: Orientation::Horizontal,
            sets: bar_sets(series),
        }
    }
}

pub fn renderer_for(kind: ChartKind, options: RenderOptions) -> Box<dyn ChartRenderer> {
    match kind {
        ChartKind::Bar => Box::new(BarChartRenderer::new(options)),
        ChartKind::Pie => Box::new(PieChartRenderer::new(options)),
        ChartKind::HorizontalBar => Box::new(HorizontalBarChartRenderer::new(options)),
    }
}
