// Data structures for the chart engine

pub mod annotations;
pub mod config;
pub mod matrix;

pub use annotations::{
    Baseline, ConfidenceInterval, DecorativeBar, Group, ShapeKind, ShapeMarker, TextLabel,
};
pub use config::ChartConfig;
pub use matrix::DataMatrix;
