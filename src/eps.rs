//! EPS backend: turns a finished page into a self-contained EPSF-2.0
//! document.
//!
//! The prolog defines short aliases for path construction, line-weight and
//! font procedures, the outlined `FillBox`, and the ten `PatBox` fill
//! patterns used by the pattern palette partition.

use std::io::Write;

use eyre::Result;

use crate::primitives::{Anchor, DrawingSink, Font, LineWeight, Page, PathSeg, Primitive};
use crate::theme::Paint;

const PROLOG: &str = r#"
/M {moveto} bind def
/L {lineto} bind def
/R {rmoveto} bind def
/V {rlineto} bind def
/N {newpath M} bind def
/C {setrgbcolor} bind def

/LTdef {0.25 setlinewidth 0 setgray} bind def
/LTdef2 {0.5 setlinewidth 0 setgray} bind def
/LTdef3 {0.75 setlinewidth 0 setgray} bind def
/LTdef4 {1.0 setlinewidth 0 setgray} bind def
/LTthick {1.25 setlinewidth 0 setgray} bind def
/LTthick2 {1.5 setlinewidth 0 setgray} bind def
LTdef

/FillBox {/h exch def /w exch def /y exch def /x exch def
  gsave x y N w 0 V 0 h V w neg 0 V 0 h neg V fill stroke
  x y N 0 setgray w 0 V 0 h V w neg 0 V 0 h neg V LTdef stroke grestore} def

/Rshow {dup stringwidth pop neg 0 R show} def
/Cshow {dup stringwidth pop -2 div 0 R show} def
/Tt {/Times-Roman findfont 5 scalefont setfont} def
/Ts {/Helvetica findfont 8 scalefont setfont} def
/Tn {/Helvetica findfont 11 scalefont setfont} def
/Tb {/Times-Roman findfont 14 scalefont setfont} def

/Point {gsave newpath 0.3 0 360 arc fill stroke grestore} def

/PatBox0 {/h exch def /w exch def /y exch def /x exch def
  gsave x y N w 0 V 0 h V w neg 0 V 0 h neg V clip
  /dist 2.5 def
  0 dist w {/i exch def /shift 0 def 0 dist sqrt h {/j exch def
    x i add shift add y j add Point
    /shift dist 2 div shift sub def
  } for } for
  stroke grestore} def

/PatBox1 {/h exch def /w exch def /y exch def /x exch def
  gsave x y N w 0 V 0 h V w neg 0 V 0 h neg V clip
  /dist 5 def
  0 dist w {/i exch def /shift 0 def 0 dist sqrt h {/j exch def
    x i add shift add y j add Point
    /shift dist 2 div shift sub def
  } for } for
  stroke grestore} def

/PatBox2 {/h exch def /w exch def /y exch def /x exch def
  gsave x y N w 0 V 0 h V w neg 0 V 0 h neg V clip
  h neg 4 w {/now exch def x now add y M h h V} for
  stroke grestore} def

/PatBox3 {/h exch def /w exch def /y exch def /x exch def
  gsave x y N w 0 V 0 h V w neg 0 V 0 h neg V clip
  0 5 w h add {/now exch def x y now add M w w neg V} for
  h neg 5 w {/now exch def x now add y M h h V} for
  stroke grestore} def

/PatBox4 {/h exch def /w exch def /y exch def /x exch def
  gsave x y N w 0 V 0 h V w neg 0 V 0 h neg V clip
  0 4 w h add {/now exch def x y now add M w w neg V} for
  stroke grestore} def

/PatBox5 {/h exch def /w exch def /y exch def /x exch def
  gsave x y N w 0 V 0 h V w neg 0 V 0 h neg V clip
  0 2 h {/now exch def x y now add M w 0 V} for
  stroke grestore} def

/PatBox6 {/h exch def /w exch def /y exch def /x exch def
  gsave 0.9 setgray
  x y N w 0 V 0 h V w neg 0 V 0 h neg V fill stroke grestore} def

/PatBox7 {/h exch def /w exch def /y exch def /x exch def
  gsave 0.6 setgray
  x y N w 0 V 0 h V w neg 0 V 0 h neg V fill stroke grestore} def

/PatBox8 {/h exch def /w exch def /y exch def /x exch def
  gsave 0.3 setgray
  x y N w 0 V 0 h V w neg 0 V 0 h neg V fill stroke grestore} def

/PatBox9 {/h exch def /w exch def /y exch def /x exch def
  x y N w 0 V 0 h V w neg 0 V 0 h neg V fill stroke} def

"#;

pub struct EpsWriter<W: Write> {
    out: W,
}

impl<W: Write> EpsWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn weight_proc(weight: LineWeight) -> &'static str {
        match weight {
            LineWeight::Hairline => "LTdef",
            LineWeight::Light => "LTdef2",
            LineWeight::Medium => "LTdef3",
            LineWeight::Heavy => "LTdef4",
            LineWeight::Thick => "LTthick",
            LineWeight::ExtraThick => "LTthick2",
        }
    }

    fn font_proc(font: Font) -> &'static str {
        match font {
            Font::Tiny => "Tt",
            Font::Small => "Ts",
            Font::Normal => "Tn",
            Font::Bold => "Tb",
        }
    }

    fn write_primitive(&mut self, primitive: &Primitive) -> Result<()> {
        match primitive {
            Primitive::Box { rect, paint } => {
                let (x, y) = (rect.origin.x, rect.origin.y);
                let (w, h) = (rect.size.x, rect.size.y);
                match paint {
                    Paint::Rgb([r, g, b]) => {
                        writeln!(
                            self.out,
                            "{r:.6} {g:.6} {b:.6} C {x:.6} {y:.6} {w:.6} {h:.6} FillBox stroke"
                        )?;
                    }
                    Paint::Pattern(pattern) => {
                        writeln!(
                            self.out,
                            "1 setgray {x:.6} {y:.6} {w:.6} {h:.6} FillBox 0 setgray"
                        )?;
                        writeln!(
                            self.out,
                            "{x:.6} {y:.6} {w:.6} {h:.6} PatBox{pattern} stroke"
                        )?;
                    }
                }
            }
            Primitive::Disc {
                center,
                radius,
                gray,
            } => {
                writeln!(
                    self.out,
                    "{gray:.6} setgray {:.6} {:.6} {radius:.6} 0 360 arc closepath fill stroke",
                    center.x, center.y
                )?;
            }
            Primitive::Path {
                start,
                segments,
                weight,
                gray,
                closed,
                filled,
            } => {
                write!(
                    self.out,
                    "{} {gray:.6} setgray {:.6} {:.6} N",
                    Self::weight_proc(*weight),
                    start.x,
                    start.y
                )?;
                for segment in segments {
                    match segment {
                        PathSeg::Line(delta) => {
                            write!(self.out, " {:.6} {:.6} V", delta.x, delta.y)?;
                        }
                        PathSeg::Cubic { c1, c2, to } => {
                            write!(
                                self.out,
                                " {:.6} {:.6} {:.6} {:.6} {:.6} {:.6} rcurveto",
                                c1.x, c1.y, c2.x, c2.y, to.x, to.y
                            )?;
                        }
                    }
                }
                if *closed {
                    write!(self.out, " closepath")?;
                }
                if *filled {
                    write!(self.out, " fill")?;
                }
                writeln!(self.out, " stroke LTdef")?;
            }
            Primitive::Stroke {
                from,
                to,
                weight,
                gray,
            } => {
                writeln!(
                    self.out,
                    "newpath {} {gray:.6} setgray {:.6} {:.6} M {:.6} {:.6} V stroke LTdef",
                    Self::weight_proc(*weight),
                    from.x,
                    from.y,
                    to.x - from.x,
                    to.y - from.y
                )?;
            }
            Primitive::DashedStroke {
                from,
                to,
                dash,
                offset,
            } => {
                writeln!(
                    self.out,
                    "gsave [{:.6} {:.6}] {offset:.6} setdash newpath 0 setgray {:.6} {:.6} M {:.6} {:.6} V stroke grestore",
                    dash[0],
                    dash[1],
                    from.x,
                    from.y,
                    to.x - from.x,
                    to.y - from.y
                )?;
            }
            Primitive::Text {
                pos,
                content,
                font,
                anchor,
                angle,
            } => {
                let escaped = escape(content);
                let font = Self::font_proc(*font);
                if *angle == 0 {
                    let show = match anchor {
                        Anchor::Start => "show",
                        Anchor::Middle => "Cshow",
                        Anchor::End => "Rshow",
                    };
                    writeln!(
                        self.out,
                        "{font} 0 setgray {:.6} {:.6} M ({escaped}) {show} stroke",
                        pos.x, pos.y
                    )?;
                } else if *anchor == Anchor::End {
                    // Rotated tic labels right-align against the rotation
                    // origin using the device-measured string width.
                    writeln!(
                        self.out,
                        "gsave {font} 0 setgray {:.6} {:.6} N {angle} rotate",
                        pos.x, pos.y
                    )?;
                    writeln!(self.out, "({escaped}) stringwidth /y exch def /x exch def")?;
                    writeln!(self.out, "x neg y neg R")?;
                    writeln!(self.out, "({escaped}) show stroke grestore")?;
                } else {
                    let show = match anchor {
                        Anchor::Start => "show",
                        Anchor::Middle => "Cshow",
                        Anchor::End => "Rshow",
                    };
                    writeln!(
                        self.out,
                        "{font} 0 setgray {:.6} {:.6} N gsave {angle} rotate ({escaped}) {show} grestore stroke",
                        pos.x, pos.y
                    )?;
                }
            }
            Primitive::BoxedText { pos, content } => {
                let escaped = escape(content);
                writeln!(
                    self.out,
                    "newpath 1 1 1 C Ts ({escaped}) stringwidth pop 6 add /ww exch def {:.6} ww 2 div sub {:.6} ww 10 FillBox",
                    pos.x,
                    pos.y - 2.0
                )?;
                writeln!(
                    self.out,
                    "0 0 0 C {:.6} {:.6} M Ts ({escaped}) Cshow stroke",
                    pos.x, pos.y
                )?;
            }
            Primitive::ClipPush(rect) => {
                writeln!(
                    self.out,
                    "gsave {:.6} {:.6} N {:.6} 0 V 0 {:.6} V {:.6} 0 V closepath clip",
                    rect.origin.x,
                    rect.origin.y,
                    rect.size.x,
                    rect.size.y,
                    -rect.size.x
                )?;
            }
            Primitive::ClipPop => {
                writeln!(self.out, "grestore")?;
            }
        }
        Ok(())
    }
}

impl<W: Write> DrawingSink for EpsWriter<W> {
    fn emit(&mut self, page: &Page) -> Result<()> {
        let metrics = &page.metrics;
        writeln!(self.out, "%!PS-Adobe-2.0 EPSF-2.0")?;
        writeln!(
            self.out,
            "%%BoundingBox: {} {} {} {}",
            metrics.x1 as i64, metrics.y1 as i64, metrics.x2 as i64, metrics.y2 as i64
        )?;
        if metrics.width() > metrics.height() {
            writeln!(self.out, "%%Orientation: Portrait")?;
        }
        self.out.write_all(PROLOG.as_bytes())?;
        for primitive in &page.primitives {
            self.write_primitive(primitive)?;
        }
        Ok(())
    }
}

/// Escape the characters PostScript strings treat specially.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '(' | ')' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_parentheses() {
        assert_eq!(escape("a(b)c\\"), "a\\(b\\)c\\\\");
    }
}
