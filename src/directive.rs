//! Directive-file parsing.
//!
//! Input is a sequence of `Key = Value` lines followed by whitespace
//! separated float rows, one block per line. `#` starts a comment; blank
//! lines are skipped. Unknown keys are fatal.

use std::path::Path;

use eyre::{bail, eyre, Result, WrapErr};

use crate::data_types::{
    Baseline, ChartConfig, ConfidenceInterval, DataMatrix, DecorativeBar, Group, ShapeKind,
    ShapeMarker, TextLabel,
};

/// Parse a whole directive file into a config plus data matrix.
pub fn parse_file(path: impl AsRef<Path>) -> Result<(ChartConfig, DataMatrix)> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("{}: cannot find input file", path.display()))?;
    parse_str(&text)
}

/// Parse directive text into a config plus data matrix.
pub fn parse_str(input: &str) -> Result<(ChartConfig, DataMatrix)> {
    let mut parser = Parser::default();
    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.find('=') {
            Some(eq) => parser.process_key(&line[..eq], &line[eq + 1..])?,
            None => parser.push_data_row(line)?,
        }
    }
    parser.finish()
}

#[derive(Default)]
struct Parser {
    config: ChartConfig,
    rows: Vec<Vec<f64>>,
    // Block/bar counts implied by Shape and Bar directives; only used to
    // synthesize a zero matrix when no data rows are present.
    implied_blocks: usize,
    implied_bars: usize,
}

impl Parser {
    fn process_key(&mut self, key: &str, value: &str) -> Result<()> {
        let key = key.trim().to_lowercase();
        match key.as_str() {
            "title" => self.config.title = first_item("Title", value)?,
            "xlabel" => self.config.x_label = first_item("XLabel", value)?,
            "ylabel" => self.config.y_label = first_item("YLabel", value)?,
            "averagelabel" => self.config.average_label = first_item("AverageLabel", value)?,
            "hmeanlabel" => self.config.hmean_label = first_item("HMeanLabel", value)?,
            "xtics" => self.config.x_tics = split_items(value)?,
            "key" => self.config.key = split_items(value)?,
            "keycolors" => {
                let mut colors = Vec::new();
                for item in split_items(value)? {
                    let color: i64 = item
                        .parse()
                        .map_err(|_| eyre!("KeyColors must be a list of integer values"))?;
                    if !(0..30).contains(&color) {
                        bail!("KeyColors integers must be between 0 and 29");
                    }
                    colors.push(color as u32);
                }
                self.config.key_colors = Some(colors);
            }
            "yrange" => {
                let parts: Vec<&str> = value.split_whitespace().collect();
                if parts.len() != 2 {
                    bail!("YRange must contain 2 elements");
                }
                let low = parse_f64("YRange[0]", parts[0])?;
                let high = parse_f64("YRange[1]", parts[1])?;
                if high - low <= 0.0 {
                    bail!("YRange length is 0");
                }
                self.config.y_range = Some((low, high));
            }
            "yrangelow" => self.config.y_range_low = Some(parse_f64("YRangeLow", value)?),
            "yrangehigh" => self.config.y_range_high = Some(parse_f64("YRangeHigh", value)?),
            "keycolumns" => {
                let columns: i64 = value
                    .trim()
                    .parse()
                    .map_err(|_| eyre!("wrong value for KeyColumns"))?;
                if !(1..=4).contains(&columns) {
                    bail!("KeyColumns must be in range [1..4]");
                }
                self.config.key_columns = columns as u32;
            }
            "keydistance" => self.config.key_distance = parse_f64("KeyDistance", value)?,
            "ylabeldistance" => {
                self.config.y_label_distance = parse_f64("YLabelDistance", value)?;
            }
            "plotwidth" => {
                let width: i64 = value
                    .trim()
                    .parse()
                    .map_err(|_| eyre!("wrong value for PlotWidth"))?;
                if !(100..=1000).contains(&width) {
                    bail!("PlotWidth must be in range [100..1000]");
                }
                self.config.plot_width = width as f64;
            }
            "plotheight" => {
                let height: i64 = value
                    .trim()
                    .parse()
                    .map_err(|_| eyre!("wrong value for PlotHeight"))?;
                if !(100..=1000).contains(&height) {
                    bail!("PlotHeight must be in range [100..1000]");
                }
                self.config.plot_height = height as f64;
            }
            "color" => self.config.color = parse_bool("Color", value)?,
            "patternfill" => self.config.pattern_fill = parse_bool("PatternFill", value)?,
            "groupseparator" => {
                self.config.group_separator = parse_bool("GroupSeparator", value)?;
            }
            "breakbars" => self.config.break_bars = parse_bool("BreakBars", value)?,
            "copyright" => self.config.copyright = parse_bool("Copyright", value)?,
            "accumulative" => self.config.accumulative = parse_bool("Accumulative", value)?,
            "averages" => self.config.averages = parse_bool("Averages", value)?,
            "hmeans" => self.config.hmeans = parse_bool("HMeans", value)?,
            "overlap" => self.config.overlap = parse_bool("Overlap", value)?,
            "ignorezeros" => self.config.ignore_zeros = parse_bool("IgnoreZeros", value)?,
            "group" => {
                let items = split_items(value)?;
                if items.len() != 3 {
                    bail!("Group key requires 3 arguments");
                }
                let start = parse_index(&items[0], "wrong values for group")?;
                let end = parse_index(&items[1], "wrong values for group")?;
                self.config.groups.push(Group {
                    start,
                    end,
                    label: items[2].clone(),
                });
            }
            "shape" => {
                let items = split_items(value)?;
                if items.len() != 4 {
                    bail!("Shape key requires 4 arguments");
                }
                let block = parse_index(&items[0], "wrong values for Shape")?;
                let bar = parse_index(&items[1], "wrong values for Shape")?;
                let code: i64 = items[2]
                    .parse()
                    .map_err(|_| eyre!("wrong values for Shape"))?;
                let value = parse_f64("Shape", &items[3])?;
                self.implied_blocks = self.implied_blocks.max(block + 1);
                self.implied_bars = self.implied_bars.max(bar + 1);
                self.config.shapes.push(ShapeMarker {
                    block,
                    bar,
                    kind: ShapeKind::from_code(code)?,
                    value,
                });
            }
            "bar" => {
                let items = split_items(value)?;
                if items.len() != 4 {
                    bail!("'Bar' requires 4 arguments");
                }
                let block = parse_index(&items[0], "wrong values for 'Bar'")?;
                let bar = parse_index(&items[1], "wrong values for 'Bar'")?;
                let color: i64 = items[2]
                    .parse()
                    .map_err(|_| eyre!("wrong values for 'Bar'"))?;
                if color < 0 {
                    bail!("wrong range for bar");
                }
                let value = parse_f64("Bar", &items[3])?;
                self.implied_blocks = self.implied_blocks.max(block + 1);
                self.implied_bars = self.implied_bars.max(bar + 1);
                self.config.bars.push(DecorativeBar {
                    block,
                    bar,
                    color: color as u32,
                    value,
                });
            }
            "shapewidth" => {
                let width = value
                    .trim()
                    .parse()
                    .map_err(|_| eyre!("ShapeWidth must be a floating point value"))?;
                if !(0.0..=1.0).contains(&width) {
                    bail!("ShapeWidth must lie between 0 and 1");
                }
                self.config.shape_width = width;
            }
            "confidence" => {
                let items = split_items(value)?;
                if items.len() != 4 {
                    bail!("'Confidence' key requires 4 arguments");
                }
                let block = parse_index(
                    &items[0],
                    "'Confidence' key: arguments 1 and 2 must be integers",
                )?;
                let bar = parse_index(
                    &items[1],
                    "'Confidence' key: arguments 1 and 2 must be integers",
                )?;
                let low: f64 = items[2]
                    .parse()
                    .map_err(|_| eyre!("'Confidence' key: arguments 3 and 4 must be real numbers"))?;
                let high: f64 = items[3]
                    .parse()
                    .map_err(|_| eyre!("'Confidence' key: arguments 3 and 4 must be real numbers"))?;
                self.config
                    .confidence
                    .push(ConfidenceInterval::new(block, bar, low, high)?);
            }
            "baseline" => {
                let items = split_items(value)?;
                if items.len() != 3 {
                    bail!("'Baseline' key requires 3 arguments");
                }
                self.config.baselines.push(Baseline {
                    x: parse_f64("Baseline[0]", &items[0])?,
                    y: parse_f64("Baseline[1]", &items[1])?,
                    label: items[2].clone(),
                });
            }
            "label" => {
                let items = split_items(value)?;
                if items.len() != 6 {
                    bail!("Label must contain 6 elements");
                }
                let block = parse_index(&items[0], "wrong values for label")?;
                let bar = parse_index(&items[1], "wrong values for label")?;
                let dx: i32 = items[2]
                    .parse()
                    .map_err(|_| eyre!("wrong values for label"))?;
                let dy: i32 = items[3]
                    .parse()
                    .map_err(|_| eyre!("wrong values for label"))?;
                let ldy: f64 = items[4]
                    .parse()
                    .map_err(|_| eyre!("wrong values for label"))?;
                self.config.labels.push(TextLabel {
                    block,
                    bar,
                    dx,
                    dy,
                    ldy,
                    text: items[5].clone(),
                });
            }
            "rotate" => {
                let angle: i32 = value
                    .trim()
                    .parse()
                    .map_err(|_| eyre!("wrong value for Rotate"))?;
                if !(0..=90).contains(&angle) {
                    bail!("Rotate must have a value between 0 and 90");
                }
                self.config.rotate = angle;
            }
            "breakwidthratio" => {
                let ratio = parse_f64("BreakWidthRatio", value)?;
                if !(0.0..=10.0).contains(&ratio) {
                    bail!("'BreakWidthRatio' must lie between 0 and 10");
                }
                self.config.break_width_ratio = ratio;
            }
            "blockspcwidthratio" => {
                let ratio = parse_f64("BlockspcWidthRatio", value)?;
                if !(0.1..=10.0).contains(&ratio) {
                    bail!("'BlockspcWidthRatio' must lie between 0.1 and 10");
                }
                self.config.blockspc_width_ratio = ratio;
            }
            "barspcwidthratio" => {
                let ratio = parse_f64("BarspcWidthRatio", value)?;
                if !(0.0..=10.0).contains(&ratio) {
                    bail!("'BarspcWidthRatio' must lie between 0 and 10");
                }
                self.config.barspc_width_ratio = ratio;
            }
            "normalize" => self.config.normalize = parse_f64("Normalize", value)?,
            _ => bail!("'{key}': key not recognized"),
        }
        Ok(())
    }

    fn push_data_row(&mut self, line: &str) -> Result<()> {
        let mut row = Vec::new();
        for token in line.split_whitespace() {
            row.push(parse_f64(token, token)?);
        }
        self.rows.push(row);
        Ok(())
    }

    fn finish(self) -> Result<(ChartConfig, DataMatrix)> {
        let data = if !self.rows.is_empty() {
            DataMatrix::from_rows(self.rows)?
        } else if self.implied_blocks > 0 && self.implied_bars > 0 {
            DataMatrix::zeros(self.implied_blocks, self.implied_bars)
        } else {
            bail!("no data found in input");
        };
        Ok((self.config, data))
    }
}

/// Split a directive value into items, honoring single and double quotes.
fn split_items(value: &str) -> Result<Vec<String>> {
    let mut items = Vec::new();
    let mut rest = value;
    loop {
        rest = rest.trim();
        if rest.is_empty() {
            break;
        }
        let first = rest.chars().next().unwrap_or_default();
        if first == '"' || first == '\'' {
            let inner = &rest[1..];
            match inner.find(first) {
                Some(end) => {
                    items.push(inner[..end].to_string());
                    rest = &inner[end + 1..];
                }
                None => bail!("'{inner}': wrong string format"),
            }
        } else {
            match rest.find(' ') {
                Some(end) => {
                    items.push(rest[..end].to_string());
                    rest = &rest[end + 1..];
                }
                None => {
                    items.push(rest.to_string());
                    break;
                }
            }
        }
    }
    Ok(items)
}

fn first_item(key: &str, value: &str) -> Result<String> {
    split_items(value)?
        .into_iter()
        .next()
        .ok_or_else(|| eyre!("key '{key}' requires a value"))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => bail!("key '{key}' must be 'True' or 'False'"),
    }
}

fn parse_f64(key: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| eyre!("'{key}' is not a valid floating point number"))
}

fn parse_index(value: &str, message: &str) -> Result<usize> {
    let index: i64 = value.parse().map_err(|_| eyre!("{message}"))?;
    usize::try_from(index).map_err(|_| eyre!("{message}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_items() {
        let items = split_items("'a b' c \"d e\"").unwrap();
        assert_eq!(items, vec!["a b", "c", "d e"]);
    }

    #[test]
    fn unterminated_quote() {
        assert!(split_items("'oops").is_err());
    }
}
