//! Drawing vocabulary produced by the layout engine.
//!
//! A render pass flattens the whole chart into an ordered `Vec<Primitive>`;
//! later entries occlude earlier ones. Backends implement [`DrawingSink`]
//! and translate each primitive into their own opcodes.

use eyre::Result;
use glam::DVec2;

use crate::theme::Paint;

/// Fonts available to text primitives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Font {
    /// 5pt serif, used for the margin version mark.
    Tiny,
    /// 8pt sans, used for worm and baseline labels.
    Small,
    /// 11pt sans, the workhorse label font.
    Normal,
    /// 14pt serif, titles.
    Bold,
}

/// Stroke weights, from hairline outlines to the worm curves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineWeight {
    Hairline,
    Light,
    Medium,
    Heavy,
    Thick,
    ExtraThick,
}

impl LineWeight {
    pub fn points(self) -> f64 {
        match self {
            LineWeight::Hairline => 0.25,
            LineWeight::Light => 0.5,
            LineWeight::Medium => 0.75,
            LineWeight::Heavy => 1.0,
            LineWeight::Thick => 1.25,
            LineWeight::ExtraThick => 1.5,
        }
    }
}

/// Horizontal anchoring of a text primitive relative to its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// Axis-aligned rectangle with its origin at the lower-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub origin: DVec2,
    pub size: DVec2,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: DVec2::new(x, y),
            size: DVec2::new(width, height),
        }
    }

    pub fn max_corner(&self) -> DVec2 {
        self.origin + self.size
    }
}

/// One segment of a path, relative to the current point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSeg {
    /// Relative line.
    Line(DVec2),
    /// Relative cubic curve: two control points and the end point.
    Cubic { c1: DVec2, c2: DVec2, to: DVec2 },
}

/// A single drawable shape.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// Filled rectangle with a hairline black outline.
    Box { rect: Rect, paint: Paint },
    /// Filled circle.
    Disc { center: DVec2, radius: f64, gray: f64 },
    /// Free-form path built from relative segments.
    Path {
        start: DVec2,
        segments: Vec<PathSeg>,
        weight: LineWeight,
        gray: f64,
        closed: bool,
        filled: bool,
    },
    /// Straight stroked line.
    Stroke {
        from: DVec2,
        to: DVec2,
        weight: LineWeight,
        gray: f64,
    },
    /// Dashed stroked line (grid lines).
    DashedStroke {
        from: DVec2,
        to: DVec2,
        dash: [f64; 2],
        offset: f64,
    },
    /// Anchored, optionally rotated text. Rotation is counter-clockwise
    /// degrees about the anchor position.
    Text {
        pos: DVec2,
        content: String,
        font: Font,
        anchor: Anchor,
        angle: i32,
    },
    /// Centered text over a white backing box sized to the string
    /// (baseline annotations).
    BoxedText { pos: DVec2, content: String },
    /// Restrict subsequent drawing to a rectangle until the matching
    /// [`Primitive::ClipPop`].
    ClipPush(Rect),
    ClipPop,
}

/// Bounding box of the finished page, in device units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageMetrics {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl PageMetrics {
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }
}

/// A fully laid-out chart: the ordered primitive list plus page metrics.
#[derive(Clone, Debug)]
pub struct Page {
    pub primitives: Vec<Primitive>,
    pub metrics: PageMetrics,
}

/// Backend seam: consumes a finished page and emits device opcodes.
pub trait DrawingSink {
    fn emit(&mut self, page: &Page) -> Result<()>;
}
