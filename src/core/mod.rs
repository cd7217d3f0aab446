pub mod engine;
pub mod registry;

pub use crate::domain::model::{ChartKind, DataPoint, ExtractedSeries, ExtractorKind};
pub use crate::domain::ports::{ChartRenderer, ConfigProvider, DataExtractor, Storage};
pub use crate::utils::error::Result;
