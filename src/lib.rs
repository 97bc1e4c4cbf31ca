//! eps_chart crate for bar chart layout with EPS output

pub mod chart;
pub mod data_types;
pub mod directive;
pub mod eps;
pub mod overflow;
pub mod primitives;
pub mod rendering;
pub mod scales;
pub mod theme;
pub mod transform;
pub mod utils;

pub use chart::Chart;
pub use data_types::{ChartConfig, DataMatrix};
pub use eps::EpsWriter;
pub use primitives::{DrawingSink, Page, Primitive};
