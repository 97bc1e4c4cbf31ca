use serde::{Deserialize, Serialize};

/// Total number of swatch indices across all partitions.
pub const PALETTE_SIZE: u32 = 30;
/// Swatches per partition.
pub const PARTITION_SIZE: u32 = 10;

/// Chromatic partition, indices 0..10.
pub const CHART_COLORS: [[f64; 3]; 10] = [
    [0.000, 0.270, 0.523],
    [0.996, 0.258, 0.055],
    [0.996, 0.824, 0.125],
    [0.340, 0.613, 0.109],
    [0.492, 0.000, 0.129],
    [0.512, 0.789, 0.996],
    [0.191, 0.250, 0.016],
    [0.680, 0.809, 0.000],
    [0.293, 0.121, 0.434],
    [0.996, 0.582, 0.055],
];

/// Grayscale partition, indices 10..20.
pub const GRAY_COLORS: [[f64; 3]; 10] = [
    [0.000, 0.000, 0.000],
    [0.111, 0.111, 0.111],
    [0.222, 0.222, 0.222],
    [0.333, 0.333, 0.333],
    [0.444, 0.444, 0.444],
    [0.556, 0.556, 0.556],
    [0.667, 0.667, 0.667],
    [0.778, 0.778, 0.778],
    [0.889, 0.889, 0.889],
    [1.000, 1.000, 1.000],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Partition {
    Chromatic,
    Grayscale,
    Pattern,
}

/// A swatch index resolved against its partition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    Rgb([f64; 3]),
    /// Pattern number 0..10 within the pattern partition.
    Pattern(u8),
}

/// Partition a raw swatch index belongs to, or `None` when out of palette.
pub fn partition_of(index: u32) -> Option<Partition> {
    match index {
        0..=9 => Some(Partition::Chromatic),
        10..=19 => Some(Partition::Grayscale),
        20..=29 => Some(Partition::Pattern),
        _ => None,
    }
}

/// Resolve a swatch index into a concrete paint.
///
/// Callers are expected to have validated the index range already; an
/// out-of-palette index falls back to black rather than panicking.
pub fn resolve_swatch(index: u32) -> Paint {
    match partition_of(index) {
        Some(Partition::Chromatic) => Paint::Rgb(CHART_COLORS[index as usize]),
        Some(Partition::Grayscale) => Paint::Rgb(GRAY_COLORS[index as usize - 10]),
        Some(Partition::Pattern) => Paint::Pattern((index - 20) as u8),
        None => Paint::Rgb([0.0, 0.0, 0.0]),
    }
}

/// Default swatch order when no `KeyColors` directive is given.
///
/// The chromatic order interleaves grayscale entries past index 9 so charts
/// with more than ten series stay distinguishable. Grayscale mode reorders
/// the gray ramp for contrast between neighboring series; pattern mode walks
/// the pattern partition in order.
pub fn default_key_colors(color: bool, pattern_fill: bool) -> Vec<u32> {
    if pattern_fill {
        (20..30).collect()
    } else if !color {
        vec![10, 13, 16, 19, 11, 14, 17, 12, 15, 18]
    } else {
        let mut colors: Vec<u32> = (0..10).collect();
        colors.extend([10, 13, 16, 19, 11, 14, 17, 12, 15, 18]);
        colors.extend(20..30);
        colors
    }
}
