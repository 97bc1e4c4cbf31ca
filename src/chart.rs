//! Chart model: owns the normalized directive set and the final data
//! matrix, and drives one render from range resolution to the primitive
//! list.
//!
//! Construction applies the whole flag-compatibility matrix and every
//! matrix transform exactly once, so a built `Chart` renders without
//! further mutation; rendering is a pure function of its state.

use eyre::{bail, Result};
use tracing::{info, warn};

use crate::data_types::{ChartConfig, DataMatrix};
use crate::eps::EpsWriter;
use crate::primitives::{DrawingSink, Page};
use crate::rendering::render_page;
use crate::scales::resolve_range;
use crate::theme::{default_key_colors, PALETTE_SIZE};
use crate::transform::{PlotGeometry, PlotTransform};

#[derive(Debug)]
pub struct Chart {
    config: ChartConfig,
    data: DataMatrix,
    key_colors: Vec<u32>,
    breaks: Vec<usize>,
}

impl Chart {
    /// Validate the directive set against the data, auto-resolve the
    /// advisory flag conflicts, append derived rows and apply the matrix
    /// transforms.
    pub fn new(config: ChartConfig, data: DataMatrix) -> Result<Self> {
        let mut config = config;
        let mut data = data;

        if config.hmeans && config.averages {
            bail!("HMeans and Averages are incompatible");
        }
        if config.hmeans && config.accumulative {
            warn!("HMeans = Accumulative = True; harmonic means will be computed over non-accumulative values");
        }
        if config.averages && config.accumulative {
            warn!("Averages = Accumulative = True; averages will be computed over non-accumulative values");
        }
        if config.overlap && config.break_bars {
            config.break_bars = false;
            warn!("Overlap = True, BreakBars set to False");
        }
        if config.normalize != 0.0 && !config.accumulative {
            // Accumulative is already off here; only the warning is kept.
            warn!("Normalize != 0, Accumulative set to False");
        }
        if config.pattern_fill && config.color {
            config.color = false;
            warn!("PatternFill = True, Color set to False");
        }
        if config.pattern_fill && data.bar_count() > 10 {
            bail!("Only 10 bars per block allowed with PatternFill = True");
        }
        if !config.color && data.bar_count() > 10 {
            bail!("Only 10 bars per block allowed with Color = False");
        }

        // XTics are checked against the raw block count; derived-row labels
        // are appended afterwards.
        if !config.x_tics.is_empty() && config.x_tics.len() != data.block_count() {
            bail!("# of entries in XTics does not match # of blocks");
        }

        let key_colors = match config.key_colors.clone() {
            Some(colors) => colors,
            None => default_key_colors(config.color, config.pattern_fill),
        };
        if key_colors.iter().any(|&color| color >= PALETTE_SIZE) {
            bail!("KeyColors integers must be between 0 and 29");
        }
        if key_colors.len() < data.bar_count().max(config.key.len()) {
            bail!("not enough elements in KeyColors");
        }

        // Derived rows are computed from raw values and appended before the
        // whole-matrix transforms run.
        if config.averages {
            let row = data.average_row(config.ignore_zeros);
            info!(values = ?row, "average block values");
            data.push_row(row)?;
            if !config.x_tics.is_empty() {
                config.x_tics.push(config.average_label.clone());
            }
        }
        if config.hmeans {
            let row = data.harmonic_mean_row();
            info!(values = ?row, "harmonic mean block values");
            data.push_row(row)?;
            if !config.x_tics.is_empty() {
                config.x_tics.push(config.hmean_label.clone());
            }
        }
        if config.normalize != 0.0 {
            data.normalize(config.normalize);
        }
        if config.accumulative {
            data.accumulate();
        }
        if config.overlap {
            for block in data.descending_blocks() {
                warn!("record {block} contains some descendent data - some bar will be hidden");
            }
        }

        // Overlay references are validated against the final matrix shape.
        for interval in &config.confidence {
            interval.check_bounds(data.block_count(), data.bar_count())?;
            if !interval.contains(data.value(interval.block, interval.bar)) {
                warn!(
                    "confidence interval does not include data at {}/{}",
                    interval.block, interval.bar
                );
            }
        }
        for group in &config.groups {
            group.check_bounds(data.block_count())?;
        }
        for shape in &config.shapes {
            shape.check_bounds(data.block_count(), data.bar_count())?;
        }
        for bar in &config.bars {
            bar.check_bounds(data.block_count(), data.bar_count())?;
        }
        for label in &config.labels {
            label.check_bounds(data.block_count(), data.bar_count())?;
        }

        // Breaks from the union of group boundaries, sorted and
        // deduplicated; the plot's outer edges never get a separator.
        let mut breaks: Vec<usize> = Vec::new();
        for group in &config.groups {
            if !breaks.contains(&group.start) {
                breaks.push(group.start);
            }
            if !breaks.contains(&(group.end + 1)) {
                breaks.push(group.end + 1);
            }
        }
        breaks.sort_unstable();
        breaks.retain(|&position| position != 0 && position != data.block_count());

        Ok(Self {
            config,
            data,
            key_colors,
            breaks,
        })
    }

    /// Lay the chart out into an ordered primitive list.
    pub fn render(&self) -> Result<Page> {
        let range = resolve_range(&self.data, &self.config)?;
        let geometry = PlotGeometry::solve(
            &self.config,
            self.data.block_count(),
            self.data.bar_count(),
            self.breaks.len(),
        );
        let transform = PlotTransform::new(
            geometry,
            range,
            self.breaks.clone(),
            self.config.overlap,
        );
        Ok(render_page(
            &self.config,
            &self.data,
            &transform,
            &self.key_colors,
            &self.breaks,
        ))
    }

    /// Render and emit a finished EPS page in one call.
    pub fn write_eps<W: std::io::Write>(&self, writer: W) -> Result<()> {
        let page = self.render()?;
        EpsWriter::new(writer).emit(&page)
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn data(&self) -> &DataMatrix {
        &self.data
    }

    pub fn key_colors(&self) -> &[u32] {
        &self.key_colors
    }

    pub fn breaks(&self) -> &[usize] {
        &self.breaks
    }
}
