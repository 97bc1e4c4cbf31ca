use eyre::{bail, Result};

/// Rectangular matrix of chart values: one block per row, one bar per column.
///
/// Immutable after load except for the derived-row appends and the two
/// whole-matrix transforms, each applied at most once by [`crate::Chart`].
#[derive(Clone, Debug, PartialEq)]
pub struct DataMatrix {
    rows: Vec<Vec<f64>>,
}

impl DataMatrix {
    /// Build a matrix from parsed rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let Some(first) = rows.first() else {
            bail!("no data found in input");
        };
        if first.is_empty() {
            bail!("no data found in input");
        }
        let bar_count = first.len();
        if rows.iter().any(|row| row.len() != bar_count) {
            bail!("not all records have the same number of elements");
        }
        Ok(Self { rows })
    }

    /// Zero-filled matrix, used when only shapes or decorative bars imply
    /// the chart dimensions.
    pub fn zeros(block_count: usize, bar_count: usize) -> Self {
        Self {
            rows: vec![vec![0.0; bar_count]; block_count],
        }
    }

    pub fn block_count(&self) -> usize {
        self.rows.len()
    }

    pub fn bar_count(&self) -> usize {
        self.rows[0].len()
    }

    pub fn value(&self, block: usize, bar: usize) -> f64 {
        self.rows[block][bar]
    }

    pub fn blocks(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Per-column arithmetic mean. With `ignore_zeros` the denominator only
    /// counts non-zero cells; the sum is unaffected.
    pub fn average_row(&self, ignore_zeros: bool) -> Vec<f64> {
        let mut row = Vec::with_capacity(self.bar_count());
        for bar in 0..self.bar_count() {
            let mut sum = 0.0;
            let mut count = 0usize;
            for block in &self.rows {
                sum += block[bar];
                if block[bar] != 0.0 || !ignore_zeros {
                    count += 1;
                }
            }
            if count > 0 {
                sum /= count as f64;
            }
            row.push(sum);
        }
        row
    }

    /// Per-column harmonic mean over non-zero cells; 0 when every cell in
    /// the column is zero.
    pub fn harmonic_mean_row(&self) -> Vec<f64> {
        let mut row = Vec::with_capacity(self.bar_count());
        for bar in 0..self.bar_count() {
            let mut reciprocal_sum = 0.0;
            let mut count = 0usize;
            for block in &self.rows {
                if block[bar] != 0.0 {
                    count += 1;
                    reciprocal_sum += 1.0 / block[bar];
                }
            }
            if reciprocal_sum != 0.0 {
                row.push(count as f64 / reciprocal_sum);
            } else {
                row.push(0.0);
            }
        }
        row
    }

    /// Append a derived row.
    pub fn push_row(&mut self, row: Vec<f64>) -> Result<()> {
        if row.len() != self.bar_count() {
            bail!("derived row length does not match bar count");
        }
        self.rows.push(row);
        Ok(())
    }

    /// Scale every block so its total equals `target`. Zero-total blocks
    /// are left untouched.
    pub fn normalize(&mut self, target: f64) {
        for block in &mut self.rows {
            let total: f64 = block.iter().sum();
            if total == 0.0 {
                continue;
            }
            for value in block.iter_mut() {
                *value = *value * target / total;
            }
        }
    }

    /// Replace each block with its running prefix sums.
    pub fn accumulate(&mut self) {
        for block in &mut self.rows {
            for bar in 1..block.len() {
                block[bar] += block[bar - 1];
            }
        }
    }

    /// Extrema over every cell.
    pub fn min_max(&self) -> (f64, f64) {
        let mut min = self.rows[0][0];
        let mut max = self.rows[0][0];
        for block in &self.rows {
            for &value in block {
                min = min.min(value);
                max = max.max(value);
            }
        }
        (min, max)
    }

    /// Indices of blocks containing a descending adjacent pair; an overlap
    /// chart hides part of every bar in such a block.
    pub fn descending_blocks(&self) -> Vec<usize> {
        let mut result = Vec::new();
        for (index, block) in self.rows.iter().enumerate() {
            if block.windows(2).any(|pair| pair[1] < pair[0]) {
                result.push(index);
            }
        }
        result
    }
}
