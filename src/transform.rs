//! Coordinate projection from data space to the plot region.

use crate::data_types::ChartConfig;
use crate::scales::ResolvedRange;
use crate::utils::clamp;

/// Lower-left corner of the plot region on the page.
pub const PLOT_ORIG_X: f64 = 100.0;
pub const PLOT_ORIG_Y: f64 = 300.0;

/// Solved layout widths, all in device units.
///
/// The widths satisfy
/// `blockspc*(blocks+1) + block*blocks + break*breaks == plot_width`
/// exactly; each secondary width is a configured ratio of the block (or
/// bar) width, so a single division solves the system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotGeometry {
    pub plot_width: f64,
    pub plot_height: f64,
    pub block_width: f64,
    pub blockspc_width: f64,
    pub break_width: f64,
    pub bar_width: f64,
    pub barspc_width: f64,
}

impl PlotGeometry {
    pub fn solve(
        config: &ChartConfig,
        block_count: usize,
        bar_count: usize,
        break_count: usize,
    ) -> Self {
        let blocks = block_count as f64;
        let bars = bar_count as f64;
        let breaks = break_count as f64;

        let block_width = config.plot_width
            / (config.blockspc_width_ratio * (blocks + 1.0)
                + blocks
                + config.break_width_ratio * breaks);
        let blockspc_width = block_width * config.blockspc_width_ratio;
        let break_width = block_width * config.break_width_ratio;

        let (bar_width, barspc_width) = if config.overlap {
            (block_width, 0.0)
        } else {
            let bar_width = block_width / (config.barspc_width_ratio * (bars - 1.0) + bars);
            (bar_width, bar_width * config.barspc_width_ratio)
        };

        Self {
            plot_width: config.plot_width,
            plot_height: config.plot_height,
            block_width,
            blockspc_width,
            break_width,
            bar_width,
            barspc_width,
        }
    }
}

/// Pure mapping functions from data values and (block, bar) indices to
/// plot-local coordinates. Re-derived once per render after the range and
/// geometry are fixed.
#[derive(Clone, Debug)]
pub struct PlotTransform {
    pub geometry: PlotGeometry,
    pub range: ResolvedRange,
    breaks: Vec<usize>,
    overlap: bool,
}

impl PlotTransform {
    pub fn new(
        geometry: PlotGeometry,
        range: ResolvedRange,
        breaks: Vec<usize>,
        overlap: bool,
    ) -> Self {
        Self {
            geometry,
            range,
            breaks,
            overlap,
        }
    }

    /// Linear value projection. May land outside `[0, plot_height]`;
    /// callers clamp when drawing inside the plot clipping region.
    pub fn value_to_y(&self, value: f64) -> f64 {
        self.geometry.plot_height * (value - self.range.low) / self.range.span()
    }

    /// `value_to_y` clamped to the plot region.
    pub fn clamped_y(&self, value: f64) -> f64 {
        clamp(self.value_to_y(value), 0.0, self.geometry.plot_height)
    }

    /// X interval `[start, end)` of a block, walking every block up to the
    /// index and adding one break width per break position at or before it.
    /// O(block index) per call; total render cost stays linear because each
    /// block is queried a bounded number of times.
    pub fn block_x_interval(&self, block: usize) -> (f64, f64) {
        let mut x = self.geometry.blockspc_width;
        for _ in 0..block {
            x += self.geometry.block_width + self.geometry.blockspc_width;
        }
        for &position in &self.breaks {
            if position <= block {
                x += self.geometry.break_width;
            }
        }
        (x, x + self.geometry.block_width)
    }

    /// X interval of one bar slot. Overlap mode shares the full block
    /// interval between all bars of the block.
    pub fn bar_x_interval(&self, block: usize, bar: usize) -> (f64, f64) {
        let (block_start, block_end) = self.block_x_interval(block);
        if self.overlap {
            (block_start, block_end)
        } else {
            let start =
                block_start + bar as f64 * (self.geometry.bar_width + self.geometry.barspc_width);
            (start, start + self.geometry.bar_width)
        }
    }
}
