//! Y-axis range resolution and tick selection.

use eyre::{bail, Result};
use tracing::warn;

use crate::data_types::{ChartConfig, DataMatrix};

const NUM_TICS: f64 = 3.0;

/// Resolved Y axis: validated range plus tick parameters.
///
/// Computed once per render; every later coordinate transform derives from
/// these values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedRange {
    pub low: f64,
    pub high: f64,
    pub tick_spacing: f64,
    pub first_tick: f64,
}

impl ResolvedRange {
    pub fn span(&self) -> f64 {
        self.high - self.low
    }

    /// Tick values from the first tick up to and including the high bound.
    pub fn ticks(&self) -> TickIter {
        TickIter {
            next: self.first_tick,
            spacing: self.tick_spacing,
            high: self.high,
        }
    }
}

pub struct TickIter {
    next: f64,
    spacing: f64,
    high: f64,
}

impl Iterator for TickIter {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.next > self.high {
            return None;
        }
        let value = self.next;
        self.next += self.spacing;
        Some(value)
    }
}

/// Resolve the Y range from the final data matrix, overlay values and user
/// overrides, then derive the tick spacing and snap unfixed bounds outward
/// to tick multiples.
pub fn resolve_range(data: &DataMatrix, config: &ChartConfig) -> Result<ResolvedRange> {
    let full_specified = config.y_range.is_some();
    if full_specified && (config.y_range_low.is_some() || config.y_range_high.is_some()) {
        warn!("YRange is incompatible with YRangeLow/YRangeHigh");
    }

    let (mut low, mut high) = match config.y_range {
        Some((user_low, user_high)) => {
            if user_high - user_low <= 0.0 {
                bail!("YRange length is 0");
            }
            (user_low, user_high)
        }
        None => {
            let (mut low, mut high) = data.min_max();
            for interval in &config.confidence {
                low = low.min(interval.low);
                high = high.max(interval.high);
            }
            for bar in &config.bars {
                low = low.min(bar.value);
                high = high.max(bar.value);
            }
            for shape in &config.shapes {
                low = low.min(shape.value);
                high = high.max(shape.value);
            }
            if let Some(user_low) = config.y_range_low {
                low = user_low;
            }
            if let Some(user_high) = config.y_range_high {
                high = user_high;
            }
            // Overlapping bars need a visible baseline to grow from.
            if config.overlap && low >= 0.0 {
                low = 0.0;
            }
            if high - low <= 0.0 {
                bail!("YRange difference <= 0");
            }
            (low, high)
        }
    };

    let tick_spacing = tick_spacing_for(high - low);
    let mut first_tick = (low / tick_spacing).ceil() * tick_spacing;
    if !full_specified && config.y_range_low.is_none() {
        first_tick = (low / tick_spacing).floor() * tick_spacing;
        low = first_tick;
    }
    if !full_specified && config.y_range_high.is_none() {
        high = (high / tick_spacing).ceil() * tick_spacing;
    }

    Ok(ResolvedRange {
        low,
        high,
        tick_spacing,
        first_tick,
    })
}

/// Round-number tick spacing: 1, 2 or 5 times a power of ten, derived from
/// one third of the span.
fn tick_spacing_for(span: f64) -> f64 {
    let (mantissa, exponent) = mantissa_exponent(span / NUM_TICS);
    let mantissa = if mantissa > 5.0 {
        5.0
    } else if mantissa > 2.0 {
        2.0
    } else {
        1.0
    };
    mantissa * 10f64.powi(exponent)
}

/// Decompose `x` into `m * 10^e` with `1 <= m < 10`; zero maps to `(0, 0)`.
fn mantissa_exponent(x: f64) -> (f64, i32) {
    if x == 0.0 {
        return (0.0, 0);
    }
    let mut mantissa = x;
    let mut exponent = 0;
    while mantissa >= 10.0 {
        mantissa /= 10.0;
        exponent += 1;
    }
    while mantissa < 1.0 {
        mantissa *= 10.0;
        exponent -= 1;
    }
    (mantissa, exponent)
}
