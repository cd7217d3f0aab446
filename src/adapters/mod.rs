// Adapters layer: concrete extractors, renderers and the local file system.

pub mod extractors;
pub mod renderers;
pub mod storage;
