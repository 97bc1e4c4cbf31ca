use eyre::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::theme::PALETTE_SIZE;

/// Marker glyph kinds, in directive code order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle,
    Triangle,
    Square,
}

impl ShapeKind {
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(ShapeKind::Circle),
            1 => Ok(ShapeKind::Triangle),
            2 => Ok(ShapeKind::Square),
            _ => bail!("wrong range for shape"),
        }
    }
}

/// A glyph overlaid at a bar slot, at an arbitrary data value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeMarker {
    pub block: usize,
    pub bar: usize,
    pub kind: ShapeKind,
    pub value: f64,
}

impl ShapeMarker {
    pub fn check_bounds(&self, block_count: usize, bar_count: usize) -> Result<()> {
        if self.block >= block_count || self.bar >= bar_count {
            bail!("wrong range for shape");
        }
        Ok(())
    }
}

/// A bar drawn behind the data bars, with its own swatch.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecorativeBar {
    pub block: usize,
    pub bar: usize,
    pub color: u32,
    pub value: f64,
}

impl DecorativeBar {
    pub fn check_bounds(&self, block_count: usize, bar_count: usize) -> Result<()> {
        if self.block >= block_count || self.bar >= bar_count || self.color >= PALETTE_SIZE {
            bail!("wrong range for bar");
        }
        Ok(())
    }
}

/// Confidence interval attached to one data cell. `low <= high` is enforced
/// at construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub block: usize,
    pub bar: usize,
    pub low: f64,
    pub high: f64,
}

impl ConfidenceInterval {
    pub fn new(block: usize, bar: usize, low: f64, high: f64) -> Result<Self> {
        if low > high {
            bail!("<y1> and <y2> unordered in confidence interval");
        }
        Ok(Self {
            block,
            bar,
            low,
            high,
        })
    }

    pub fn check_bounds(&self, block_count: usize, bar_count: usize) -> Result<()> {
        if self.block >= block_count {
            bail!("<x> out of range in confidence interval");
        }
        if self.bar >= bar_count {
            bail!("<y> out of range in confidence interval");
        }
        Ok(())
    }

    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }
}

/// A labeled span of blocks. `start` and `end` are inclusive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub start: usize,
    pub end: usize,
    pub label: String,
}

impl Group {
    pub fn check_bounds(&self, block_count: usize) -> Result<()> {
        if self.start > self.end || self.end >= block_count {
            bail!("wrong range for group '{}'", self.label);
        }
        Ok(())
    }
}

/// A labeled horizontal reference line. `x` offsets the label from the
/// plot-region center in device units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

/// Free text anchored to a bar top: shifted `dx`/`dy` device units after a
/// logical value shift of `ldy`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    pub block: usize,
    pub bar: usize,
    pub dx: i32,
    pub dy: i32,
    pub ldy: f64,
    pub text: String,
}

impl TextLabel {
    pub fn check_bounds(&self, block_count: usize, bar_count: usize) -> Result<()> {
        if self.block >= block_count || self.bar >= bar_count {
            bail!("wrong range for label '{}'", self.text);
        }
        Ok(())
    }
}
