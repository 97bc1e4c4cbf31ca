//! Layout passes producing the ordered primitive list.
//!
//! Draw order is fixed: tic marks and grid first, then decorative bars,
//! data bars (back to front), shape markers, break worms, the plot frame,
//! the zero line, axis labels and the key, group separators and labels,
//! title, version mark, baselines and finally confidence intervals and free
//! text labels. Later primitives occlude earlier ones.

use glam::DVec2;

use crate::data_types::{ChartConfig, DataMatrix, ShapeKind};
use crate::overflow::{find_overflow_runs, OverflowRun, WormTracker};
use crate::primitives::{
    Anchor, Font, LineWeight, Page, PageMetrics, PathSeg, Primitive, Rect,
};
use crate::theme::resolve_swatch;
use crate::transform::{PlotTransform, PLOT_ORIG_X, PLOT_ORIG_Y};
use crate::utils::{clamp, compact};

const KEY_ROW_HEIGHT: f64 = 15.0;
const KEY_SWATCH: f64 = 10.0;
const WORM_HEIGHT: f64 = 3.0;
const GRID_DASH: [f64; 2] = [3.0, 5.0];
const GRID_DASH_OFFSET: f64 = 6.0;

/// Heights of the page regions that grow with content, used for the
/// bounding box.
#[derive(Clone, Copy, Debug, Default)]
pub struct LayoutMetrics {
    pub key_height: f64,
    pub x_label_height: f64,
    pub groups_height: f64,
    pub title_height: f64,
}

impl LayoutMetrics {
    fn from_config(config: &ChartConfig, bar_count: usize) -> Self {
        let key_height = if config.key.is_empty() {
            0.0
        } else {
            key_rows(bar_count, config.key_columns) as f64 * KEY_ROW_HEIGHT + 10.0
        };
        Self {
            key_height,
            x_label_height: if config.x_label.is_empty() { 0.0 } else { 20.0 },
            groups_height: if config.groups.is_empty() { 0.0 } else { 20.0 },
            title_height: if config.title.is_empty() { 0.0 } else { 13.0 },
        }
    }
}

fn key_rows(bar_count: usize, key_columns: u32) -> usize {
    (bar_count as f64 / key_columns as f64).ceil() as usize
}

/// Lay out the whole chart into a page. All validation has happened by the
/// time this runs; the pass order here is the only ordering guarantee the
/// backend gets.
pub fn render_page(
    config: &ChartConfig,
    data: &DataMatrix,
    transform: &PlotTransform,
    key_colors: &[u32],
    breaks: &[usize],
) -> Page {
    let metrics = LayoutMetrics::from_config(config, data.bar_count());
    let mut builder = PageBuilder {
        config,
        data,
        transform,
        key_colors,
        breaks,
        metrics,
        worms: WormTracker::new(),
        primitives: Vec::new(),
    };

    builder.paint_x_tics();
    builder.paint_y_tics();
    builder.paint_decorative_bars();
    builder.paint_data_bars();
    builder.paint_shapes();
    if config.break_bars {
        builder.paint_worms();
    }
    builder.paint_frame();
    builder.paint_zero_line();
    builder.paint_axis_labels();
    builder.paint_key();
    builder.paint_groups();
    builder.paint_title();
    builder.paint_version_mark();
    builder.paint_baselines();
    builder.paint_confidence();
    builder.paint_text_labels();

    let page_metrics = builder.page_metrics();
    Page {
        primitives: builder.primitives,
        metrics: page_metrics,
    }
}

struct PageBuilder<'a> {
    config: &'a ChartConfig,
    data: &'a DataMatrix,
    transform: &'a PlotTransform,
    key_colors: &'a [u32],
    breaks: &'a [usize],
    metrics: LayoutMetrics,
    worms: WormTracker,
    primitives: Vec<Primitive>,
}

impl PageBuilder<'_> {
    fn plot_width(&self) -> f64 {
        self.transform.geometry.plot_width
    }

    fn plot_height(&self) -> f64 {
        self.transform.geometry.plot_height
    }

    fn plot_region(&self) -> Rect {
        Rect::new(
            PLOT_ORIG_X,
            PLOT_ORIG_Y,
            self.plot_width(),
            self.plot_height(),
        )
    }

    /// Device rectangle of one bar, clamped to the plot region vertically.
    fn bar_box(&self, block: usize, bar: usize, value: f64) -> Rect {
        let (x1, _) = self.transform.bar_x_interval(block, bar);
        let y1 = self.transform.clamped_y(0.0);
        let y2 = self.transform.clamped_y(value);
        Rect::new(
            PLOT_ORIG_X + x1,
            PLOT_ORIG_Y + y1,
            self.transform.geometry.bar_width,
            y2 - y1,
        )
    }

    fn paint_x_tics(&mut self) {
        for block in 0..self.data.block_count() {
            let Some(tic) = self.config.x_tics.get(block) else {
                continue;
            };
            if tic.is_empty() {
                continue;
            }
            let (x1, x2) = self.transform.block_x_interval(block);
            let center = x1 + (x2 - x1) / 2.0;
            let (pos, anchor) = if self.config.rotate == 0 {
                // Horizontal tics center under the block and drop below the
                // axis by the fixed descent.
                (
                    DVec2::new(PLOT_ORIG_X + center, PLOT_ORIG_Y - 13.0),
                    Anchor::Middle,
                )
            } else {
                (
                    DVec2::new(PLOT_ORIG_X + center, PLOT_ORIG_Y - 10.0),
                    Anchor::End,
                )
            };
            self.primitives.push(Primitive::Text {
                pos,
                content: tic.clone(),
                font: Font::Normal,
                anchor,
                angle: self.config.rotate,
            });
        }
    }

    fn paint_y_tics(&mut self) {
        let range = self.transform.range;
        let spacing = range.tick_spacing;

        // Tic marks, skipping a first tick that sits on the axis.
        let mut start = range.first_tick;
        if self.transform.value_to_y(start) < 1.0 {
            start += spacing;
        }
        let mut value = start;
        while value < range.high {
            let y = PLOT_ORIG_Y + self.transform.value_to_y(value);
            self.primitives.push(Primitive::Stroke {
                from: DVec2::new(PLOT_ORIG_X - 2.0, y),
                to: DVec2::new(PLOT_ORIG_X + 5.0, y),
                weight: LineWeight::Light,
                gray: 0.0,
            });
            value += spacing;
        }

        // Dashed grid, skipping lines that would sit on the zero line.
        let zero_y = self.transform.value_to_y(0.0);
        let mut value = start;
        while value < range.high {
            let phys = self.transform.value_to_y(value);
            if (phys - zero_y).abs() > 1.0 {
                self.primitives.push(Primitive::DashedStroke {
                    from: DVec2::new(PLOT_ORIG_X, PLOT_ORIG_Y + phys),
                    to: DVec2::new(PLOT_ORIG_X + self.plot_width(), PLOT_ORIG_Y + phys),
                    dash: GRID_DASH,
                    offset: GRID_DASH_OFFSET,
                });
            }
            value += spacing;
        }

        // Tick numbers, right-aligned against the axis.
        for value in range.ticks() {
            let y = PLOT_ORIG_Y + self.transform.value_to_y(value) - 4.0;
            self.primitives.push(Primitive::Text {
                pos: DVec2::new(PLOT_ORIG_X - 5.0, y),
                content: compact(value),
                font: Font::Normal,
                anchor: Anchor::End,
                angle: 0,
            });
        }
    }

    fn paint_decorative_bars(&mut self) {
        for bar in &self.config.bars {
            let rect = self.bar_box(bar.block, bar.bar, bar.value);
            self.primitives.push(Primitive::Box {
                rect,
                paint: resolve_swatch(bar.color),
            });
            if self.config.break_bars && bar.value > self.transform.range.high {
                let run = OverflowRun {
                    block: bar.block,
                    start_bar: bar.bar,
                    end_bar: bar.bar,
                };
                self.paint_worm(run, bar.value, bar.value);
            }
        }
    }

    fn paint_data_bars(&mut self) {
        // Descending bar index: index 0 is drawn last and ends up topmost,
        // which is what a stacked chart needs.
        for block in 0..self.data.block_count() {
            for bar in (0..self.data.bar_count()).rev() {
                let rect = self.bar_box(block, bar, self.data.value(block, bar));
                self.primitives.push(Primitive::Box {
                    rect,
                    paint: resolve_swatch(self.key_colors[bar]),
                });
            }
        }
    }

    fn paint_shapes(&mut self) {
        if self.config.shapes.is_empty() {
            return;
        }
        self.primitives.push(Primitive::ClipPush(self.plot_region()));

        // White sticks behind every glyph first, so glyphs never cover a
        // neighbor's stick.
        for shape in &self.config.shapes {
            let (x1, x2) = self.transform.bar_x_interval(shape.block, shape.bar);
            let y1 = self.transform.clamped_y(0.0);
            let y2 = self.transform.value_to_y(shape.value);
            let center = PLOT_ORIG_X + x1 + (x2 - x1) / 2.0;
            self.primitives.push(Primitive::Stroke {
                from: DVec2::new(center, PLOT_ORIG_Y + y1),
                to: DVec2::new(center, PLOT_ORIG_Y + y2),
                weight: LineWeight::ExtraThick,
                gray: 1.0,
            });
        }

        for shape in &self.config.shapes {
            let (x1, x2) = self.transform.bar_x_interval(shape.block, shape.bar);
            let y1 = self.transform.clamped_y(0.0);
            let y2 = self.transform.value_to_y(shape.value);
            let width = (x2 - x1) * self.config.shape_width;
            let center = PLOT_ORIG_X + x1 + (x2 - x1) / 2.0;
            let glyph_center = DVec2::new(center, PLOT_ORIG_Y + y2);

            match shape.kind {
                ShapeKind::Circle => {
                    self.primitives.push(Primitive::Disc {
                        center: glyph_center,
                        radius: width / 2.0 + 0.5,
                        gray: 1.0,
                    });
                    self.primitives.push(Primitive::Disc {
                        center: glyph_center,
                        radius: width / 2.0,
                        gray: 0.0,
                    });
                }
                ShapeKind::Triangle => {
                    self.push_triangle(glyph_center, width + 1.0, 1.0);
                    self.push_triangle(glyph_center, width, 0.0);
                }
                ShapeKind::Square => {
                    self.push_square(glyph_center, width + 1.0, 1.0);
                    self.push_square(glyph_center, width, 0.0);
                }
            }

            self.primitives.push(Primitive::Stroke {
                from: DVec2::new(center, PLOT_ORIG_Y + y1),
                to: DVec2::new(center, PLOT_ORIG_Y + y2),
                weight: LineWeight::Heavy,
                gray: 0.0,
            });
        }

        self.primitives.push(Primitive::ClipPop);
    }

    fn push_triangle(&mut self, center: DVec2, width: f64, gray: f64) {
        self.primitives.push(Primitive::Path {
            start: center + DVec2::new(-width / 2.0, -width / 2.0),
            segments: vec![
                PathSeg::Line(DVec2::new(width, 0.0)),
                PathSeg::Line(DVec2::new(-width / 2.0, width)),
            ],
            weight: LineWeight::Hairline,
            gray,
            closed: true,
            filled: true,
        });
    }

    fn push_square(&mut self, center: DVec2, width: f64, gray: f64) {
        self.primitives.push(Primitive::Path {
            start: center + DVec2::new(-width / 2.0, -width / 2.0),
            segments: vec![
                PathSeg::Line(DVec2::new(width, 0.0)),
                PathSeg::Line(DVec2::new(0.0, width)),
                PathSeg::Line(DVec2::new(-width, 0.0)),
            ],
            weight: LineWeight::Hairline,
            gray,
            closed: true,
            filled: true,
        });
    }

    fn paint_worms(&mut self) {
        let runs = find_overflow_runs(self.data, self.transform.range.high);
        for run in runs {
            let left = self.data.value(run.block, run.start_bar);
            let right = self.data.value(run.block, run.end_bar);
            self.paint_worm(run, left, right);
        }
    }

    /// Break indicator: a clipped white band bounded by two wavy curves,
    /// plus the out-of-range values as labels at the plot top.
    fn paint_worm(&mut self, run: OverflowRun, left_value: f64, right_value: f64) {
        let (x1, _) = self.transform.bar_x_interval(run.block, run.start_bar);
        let (_, x2) = self.transform.bar_x_interval(run.block, run.end_bar);
        let y1 = self.transform.clamped_y(0.0);
        let y2 = self.transform.clamped_y(left_value);

        let break_y1 = (y2 - y1) * 0.8;
        let break_y2 = (y2 - y1) * 0.85;
        let width = x2 - x1 + 4.0;
        let start_x = PLOT_ORIG_X + x1 - 2.0;

        let wave = |down: f64| PathSeg::Cubic {
            c1: DVec2::new(width * 0.33, -down),
            c2: DVec2::new(width * 0.66, down),
            to: DVec2::new(width, 0.0),
        };
        let wave_back = |down: f64| PathSeg::Cubic {
            c1: DVec2::new(-width * 0.33, down),
            c2: DVec2::new(-width * 0.66, -down),
            to: DVec2::new(-width, 0.0),
        };

        let barspc = self.transform.geometry.barspc_width;
        self.primitives.push(Primitive::ClipPush(Rect::new(
            PLOT_ORIG_X + x1 - barspc / 2.0,
            PLOT_ORIG_Y + y1,
            x2 - x1 + barspc,
            y2 - y1,
        )));
        self.primitives.push(Primitive::Path {
            start: DVec2::new(start_x, PLOT_ORIG_Y + y1 + break_y1),
            segments: vec![
                wave(WORM_HEIGHT),
                PathSeg::Line(DVec2::new(0.0, break_y2 - break_y1)),
                wave_back(WORM_HEIGHT),
            ],
            weight: LineWeight::Hairline,
            gray: 1.0,
            closed: true,
            filled: true,
        });
        self.primitives.push(Primitive::ClipPop);

        for break_y in [break_y1, break_y2] {
            self.primitives.push(Primitive::Path {
                start: DVec2::new(start_x, PLOT_ORIG_Y + y1 + break_y),
                segments: vec![wave(WORM_HEIGHT)],
                weight: LineWeight::Thick,
                gray: 0.0,
                closed: false,
                filled: false,
            });
        }

        let (label_left, label_right) = self.worms.note(run);
        let label_y = PLOT_ORIG_Y + self.plot_height() - 8.0;
        if label_left {
            self.primitives.push(Primitive::Text {
                pos: DVec2::new(PLOT_ORIG_X + x1 - 2.0, label_y),
                content: compact(left_value),
                font: Font::Small,
                anchor: Anchor::End,
                angle: 0,
            });
        }
        if label_right {
            self.primitives.push(Primitive::Text {
                pos: DVec2::new(PLOT_ORIG_X + x2 + 1.0, label_y),
                content: compact(right_value),
                font: Font::Small,
                anchor: Anchor::Start,
                angle: 0,
            });
        }
    }

    fn paint_frame(&mut self) {
        self.primitives.push(Primitive::Path {
            start: DVec2::new(PLOT_ORIG_X, PLOT_ORIG_Y),
            segments: vec![
                PathSeg::Line(DVec2::new(self.plot_width(), 0.0)),
                PathSeg::Line(DVec2::new(0.0, self.plot_height())),
                PathSeg::Line(DVec2::new(-self.plot_width(), 0.0)),
                PathSeg::Line(DVec2::new(0.0, -self.plot_height())),
            ],
            weight: LineWeight::Hairline,
            gray: 0.0,
            closed: false,
            filled: false,
        });
    }

    fn paint_zero_line(&mut self) {
        let y = self.transform.value_to_y(0.0);
        if y == clamp(y, 0.0, self.plot_height() - 1.0) {
            self.primitives.push(Primitive::Stroke {
                from: DVec2::new(PLOT_ORIG_X, PLOT_ORIG_Y + y),
                to: DVec2::new(PLOT_ORIG_X + self.plot_width(), PLOT_ORIG_Y + y),
                weight: LineWeight::Hairline,
                gray: 0.0,
            });
        }
    }

    fn paint_axis_labels(&mut self) {
        if !self.config.y_label.is_empty() {
            self.primitives.push(Primitive::Text {
                pos: DVec2::new(
                    PLOT_ORIG_X - self.config.y_label_distance,
                    PLOT_ORIG_Y + self.plot_height() / 2.0,
                ),
                content: self.config.y_label.clone(),
                font: Font::Normal,
                anchor: Anchor::Middle,
                angle: 90,
            });
        }
        if !self.config.x_label.is_empty() {
            self.primitives.push(Primitive::Text {
                pos: DVec2::new(
                    PLOT_ORIG_X + self.plot_width() / 2.0,
                    PLOT_ORIG_Y - self.config.key_distance - self.metrics.x_label_height + 8.0,
                ),
                content: self.config.x_label.clone(),
                font: Font::Normal,
                anchor: Anchor::Middle,
                angle: 0,
            });
        }
    }

    fn paint_key(&mut self) {
        if self.config.key.is_empty() {
            return;
        }
        let rows = key_rows(self.data.bar_count(), self.config.key_columns);
        let key_orig = DVec2::new(
            PLOT_ORIG_X + 10.0,
            PLOT_ORIG_Y - self.config.key_distance - self.metrics.x_label_height - 15.0,
        );
        let key_width = self.plot_width() - 20.0;

        for (index, entry) in self.config.key.iter().enumerate() {
            let row = index % rows;
            let col = index / rows;
            let x = key_width * col as f64 / self.config.key_columns as f64;
            let y = -KEY_ROW_HEIGHT * row as f64;

            self.primitives.push(Primitive::Text {
                pos: key_orig + DVec2::new(x + KEY_SWATCH * 1.5, y + 1.0),
                content: entry.clone(),
                font: Font::Normal,
                anchor: Anchor::Start,
                angle: 0,
            });
            self.primitives.push(Primitive::Box {
                rect: Rect::new(
                    key_orig.x + x - KEY_SWATCH,
                    key_orig.y + y,
                    KEY_SWATCH * 2.0,
                    KEY_SWATCH,
                ),
                paint: resolve_swatch(self.key_colors[index]),
            });
        }
    }

    fn paint_groups(&mut self) {
        if self.config.group_separator {
            for &position in self.breaks {
                let x1 = self.transform.block_x_interval(position - 1).1;
                let x2 = self.transform.block_x_interval(position).0;
                let x = PLOT_ORIG_X + x1 + (x2 - x1) / 2.0;
                self.primitives.push(Primitive::Stroke {
                    from: DVec2::new(x, PLOT_ORIG_Y),
                    to: DVec2::new(x, PLOT_ORIG_Y + self.plot_height()),
                    weight: LineWeight::Hairline,
                    gray: 0.0,
                });
            }
        }

        let blockspc = self.transform.geometry.blockspc_width;
        for group in &self.config.groups {
            let x1 = self.transform.block_x_interval(group.start).0 - blockspc / 2.0;
            let x2 = self.transform.block_x_interval(group.end).1 + blockspc / 2.0;
            let width = x2 - x1 + 1.0;
            self.primitives.push(Primitive::Text {
                pos: DVec2::new(
                    PLOT_ORIG_X + x1 + width / 2.0,
                    PLOT_ORIG_Y + self.plot_height() + 5.0,
                ),
                content: group.label.clone(),
                font: Font::Normal,
                anchor: Anchor::Middle,
                angle: 0,
            });
        }
    }

    fn paint_title(&mut self) {
        if self.config.title.is_empty() {
            return;
        }
        self.primitives.push(Primitive::Text {
            pos: DVec2::new(
                PLOT_ORIG_X + self.plot_width() / 2.0,
                PLOT_ORIG_Y + self.plot_height() + self.metrics.groups_height + 8.0,
            ),
            content: self.config.title.clone(),
            font: Font::Bold,
            anchor: Anchor::Middle,
            angle: 0,
        });
    }

    fn paint_version_mark(&mut self) {
        if !self.config.copyright {
            return;
        }
        self.primitives.push(Primitive::Text {
            pos: DVec2::new(
                PLOT_ORIG_X + self.plot_width() + 5.0,
                PLOT_ORIG_Y + self.plot_height() / 2.0,
            ),
            content: format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            font: Font::Tiny,
            anchor: Anchor::Middle,
            angle: 90,
        });
    }

    fn paint_baselines(&mut self) {
        for baseline in &self.config.baselines {
            let x = clamp(
                baseline.x,
                -self.plot_width() / 2.0,
                self.plot_width() / 2.0,
            );
            let y = self.transform.value_to_y(baseline.y);
            if y != clamp(y, 0.0, self.plot_height()) {
                continue;
            }
            self.primitives.push(Primitive::Stroke {
                from: DVec2::new(PLOT_ORIG_X, PLOT_ORIG_Y + y),
                to: DVec2::new(PLOT_ORIG_X + self.plot_width(), PLOT_ORIG_Y + y),
                weight: LineWeight::Thick,
                gray: 0.0,
            });
            self.primitives.push(Primitive::BoxedText {
                pos: DVec2::new(
                    PLOT_ORIG_X + self.plot_width() / 2.0 + x,
                    PLOT_ORIG_Y + y - 3.0,
                ),
                content: baseline.label.clone(),
            });
        }
    }

    fn paint_confidence(&mut self) {
        if self.config.confidence.is_empty() {
            return;
        }
        self.primitives.push(Primitive::ClipPush(self.plot_region()));

        for interval in &self.config.confidence {
            let (x1, x2) = self.transform.bar_x_interval(interval.block, interval.bar);
            let center = x1 + (x2 - x1) / 2.0;
            let y1 = PLOT_ORIG_Y + self.transform.value_to_y(interval.low);
            let y2 = PLOT_ORIG_Y + self.transform.value_to_y(interval.high);
            let stem_x = PLOT_ORIG_X + center;
            let cap_x = PLOT_ORIG_X + (center + x1) / 2.0;
            let cap_width = self.transform.geometry.bar_width / 2.0;

            // White underlay so the interval stays readable over any bar.
            self.primitives.push(Primitive::Stroke {
                from: DVec2::new(stem_x, y1),
                to: DVec2::new(stem_x, y2),
                weight: LineWeight::Thick,
                gray: 1.0,
            });
            for y in [y1, y2] {
                self.primitives.push(Primitive::Stroke {
                    from: DVec2::new(cap_x, y),
                    to: DVec2::new(cap_x + cap_width, y),
                    weight: LineWeight::Heavy,
                    gray: 1.0,
                });
            }
            self.primitives.push(Primitive::Stroke {
                from: DVec2::new(stem_x, y1),
                to: DVec2::new(stem_x, y2),
                weight: LineWeight::Light,
                gray: 0.0,
            });
            for y in [y1, y2] {
                self.primitives.push(Primitive::Stroke {
                    from: DVec2::new(cap_x, y),
                    to: DVec2::new(cap_x + cap_width, y),
                    weight: LineWeight::Light,
                    gray: 0.0,
                });
            }
        }

        self.primitives.push(Primitive::ClipPop);
    }

    fn paint_text_labels(&mut self) {
        for label in &self.config.labels {
            let shifted = self.data.value(label.block, label.bar) + label.ldy;
            let (x1, x2) = self.transform.bar_x_interval(label.block, label.bar);
            let y = self.transform.clamped_y(shifted);
            self.primitives.push(Primitive::Text {
                pos: DVec2::new(
                    PLOT_ORIG_X + (x1 + x2) / 2.0 + label.dx as f64,
                    PLOT_ORIG_Y + y + label.dy as f64,
                ),
                content: label.text.clone(),
                font: Font::Normal,
                anchor: Anchor::Middle,
                angle: 0,
            });
        }
    }

    fn page_metrics(&self) -> PageMetrics {
        let mut x1 = PLOT_ORIG_X - self.config.y_label_distance;
        if !self.config.y_label.is_empty() {
            x1 -= 20.0;
        }
        let y1 = PLOT_ORIG_Y
            - self.config.key_distance
            - self.metrics.x_label_height
            - self.metrics.key_height;
        let x2 = PLOT_ORIG_X + self.plot_width() + 20.0;
        let mut y2 = PLOT_ORIG_Y
            + self.plot_height()
            + self.metrics.groups_height
            + self.metrics.title_height
            + 5.0;
        if !self.config.title.is_empty() {
            y2 += 15.0;
        }
        PageMetrics { x1, y1, x2, y2 }
    }
}
