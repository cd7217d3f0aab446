pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::storage::LocalStorage;
pub use crate::core::{engine::ChartEngine, registry::Registry};
pub use domain::chart::{ChartConfig, ChartSurface, ColorMode, RenderOptions, VisualSeries};
pub use domain::model::{ChartKind, DataPoint, ExtractedSeries, ExtractorKind};
pub use utils::error::{ChartError, Result};
