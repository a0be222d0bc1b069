//! Color palettes for SVG strokes.

use std::fmt;

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Rgb {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl Rgb {
    const fn hex(value: u32) -> Self {
        Self { r: (value >> 16) as u8, g: (value >> 8) as u8, b: value as u8 }
    }
}

impl fmt::Display for Rgb {
    /// Format as CSS: #rrggbb
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The 20-color categorical palette (paired dark/light hues).
const CATEGORY20: [Rgb; 20] = [
    Rgb::hex(0x1f77b4), Rgb::hex(0xaec7e8),
    Rgb::hex(0xff7f0e), Rgb::hex(0xffbb78),
    Rgb::hex(0x2ca02c), Rgb::hex(0x98df8a),
    Rgb::hex(0xd62728), Rgb::hex(0xff9896),
    Rgb::hex(0x9467bd), Rgb::hex(0xc5b0d5),
    Rgb::hex(0x8c564b), Rgb::hex(0xc49c94),
    Rgb::hex(0xe377c2), Rgb::hex(0xf7b6d2),
    Rgb::hex(0x7f7f7f), Rgb::hex(0xc7c7c7),
    Rgb::hex(0xbcbd22), Rgb::hex(0xdbdb8d),
    Rgb::hex(0x17becf), Rgb::hex(0x9edae5),
];

/// Rotate through the categorical palette by index.
pub(crate) fn category20(index: usize) -> Rgb {
    CATEGORY20[index % CATEGORY20.len()]
}
