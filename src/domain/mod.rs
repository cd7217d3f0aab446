// Domain layer: data model, chart model and ports. No I/O here.

pub mod chart;
pub mod model;
pub mod ports;
