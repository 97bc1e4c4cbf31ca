use serde::{Deserialize, Serialize};

use super::annotations::{
    Baseline, ConfidenceInterval, DecorativeBar, Group, ShapeMarker, TextLabel,
};

/// Resolved directive set for one chart.
///
/// Built once by the directive parser (or by hand) and treated as immutable
/// by the engine; [`crate::Chart`] normalizes a private copy when flag
/// combinations need auto-resolving.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChartConfig {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// One entry per block when non-empty.
    pub x_tics: Vec<String>,
    /// Legend entries, one per bar series.
    pub key: Vec<String>,
    /// Explicit swatch indices; `None` selects the mode default.
    pub key_colors: Option<Vec<u32>>,
    /// Full explicit Y range; wins over the single-bound overrides.
    pub y_range: Option<(f64, f64)>,
    pub y_range_low: Option<f64>,
    pub y_range_high: Option<f64>,
    pub key_columns: u32,
    /// Device units reserved below the plot for tic strings and the key.
    pub key_distance: f64,
    /// Device units reserved left of the plot for the Y label.
    pub y_label_distance: f64,
    pub plot_width: f64,
    pub plot_height: f64,
    pub color: bool,
    pub pattern_fill: bool,
    pub groups: Vec<Group>,
    pub shapes: Vec<ShapeMarker>,
    pub bars: Vec<DecorativeBar>,
    /// Shape glyph width as a ratio of the bar width.
    pub shape_width: f64,
    pub group_separator: bool,
    pub confidence: Vec<ConfidenceInterval>,
    pub baselines: Vec<Baseline>,
    pub labels: Vec<TextLabel>,
    /// X tic rotation in degrees, 0..=90.
    pub rotate: i32,
    pub break_bars: bool,
    pub copyright: bool,
    pub accumulative: bool,
    pub overlap: bool,
    pub averages: bool,
    pub average_label: String,
    pub hmeans: bool,
    pub hmean_label: String,
    /// Per-block normalization target; 0 disables.
    pub normalize: f64,
    pub ignore_zeros: bool,
    pub break_width_ratio: f64,
    pub blockspc_width_ratio: f64,
    pub barspc_width_ratio: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            x_tics: Vec::new(),
            key: Vec::new(),
            key_colors: None,
            y_range: None,
            y_range_low: None,
            y_range_high: None,
            key_columns: 2,
            key_distance: 70.0,
            y_label_distance: 50.0,
            plot_width: 300.0,
            plot_height: 150.0,
            color: true,
            pattern_fill: false,
            groups: Vec::new(),
            shapes: Vec::new(),
            bars: Vec::new(),
            shape_width: 0.8,
            group_separator: true,
            confidence: Vec::new(),
            baselines: Vec::new(),
            labels: Vec::new(),
            rotate: 45,
            break_bars: true,
            copyright: true,
            accumulative: false,
            overlap: false,
            averages: false,
            average_label: "Average".to_string(),
            hmeans: false,
            hmean_label: "H. Mean".to_string(),
            normalize: 0.0,
            ignore_zeros: false,
            break_width_ratio: 0.5,
            blockspc_width_ratio: 0.5,
            barspc_width_ratio: 0.1,
        }
    }
}
