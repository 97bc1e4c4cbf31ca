//! Detection of bars exceeding the plotted range.
//!
//! Runs are recomputed fresh on every render from the final data and the
//! resolved range, consumed immediately to draw break indicators, and never
//! persisted.

use crate::data_types::DataMatrix;

/// A contiguous run of bars in one block whose values exceed the range high
/// bound. `start_bar..=end_bar` inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverflowRun {
    pub block: usize,
    pub start_bar: usize,
    pub end_bar: usize,
}

/// Scan every block for runs of values strictly above `high`. Output is
/// ordered by block index, then by start bar within the block.
pub fn find_overflow_runs(data: &DataMatrix, high: f64) -> Vec<OverflowRun> {
    let mut runs = Vec::new();
    for (block, values) in data.blocks().iter().enumerate() {
        let mut start = None;
        for (bar, &value) in values.iter().enumerate() {
            if value > high && start.is_none() {
                start = Some(bar);
            }
            if value <= high {
                if let Some(start_bar) = start.take() {
                    runs.push(OverflowRun {
                        block,
                        start_bar,
                        end_bar: bar - 1,
                    });
                }
            }
        }
        if let Some(start_bar) = start {
            runs.push(OverflowRun {
                block,
                start_bar,
                end_bar: values.len() - 1,
            });
        }
    }
    runs
}

/// Tracks which worms have been drawn so numeric labels never overlap.
///
/// The first worm of a block labels its left side; every later worm for the
/// same block labels only its right side. A run spanning several bars
/// labels both sides.
#[derive(Debug, Default)]
pub struct WormTracker {
    drawn: Vec<OverflowRun>,
}

impl WormTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a worm and return which sides `(left, right)` to label.
    pub fn note(&mut self, run: OverflowRun) -> (bool, bool) {
        let sides = if run.start_bar != run.end_bar {
            (true, true)
        } else {
            let first = !self.drawn.iter().any(|worm| worm.block == run.block);
            (first, !first)
        };
        self.drawn.push(run);
        sides
    }
}
