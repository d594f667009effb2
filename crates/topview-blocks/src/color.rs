use serde::Deserialize;

/// 8-bit RGB triple.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "ColorDef")]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// Fallback for absent chunks, empty columns and unknown blocks.
    pub const SENTINEL: Rgb = Rgb([0, 0, 0]);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Adds `delta` to every channel, clamping each to `[0, 255]`.
    #[inline]
    pub fn offset(self, delta: i32) -> Self {
        let ch = |c: u8| (i32::from(c) + delta).clamp(0, 255) as u8;
        Rgb([ch(self.0[0]), ch(self.0[1]), ch(self.0[2])])
    }
}

// Palette files accept either `[r, g, b]` or `{ r = .., g = .., b = .. }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorDef {
    Array([u8; 3]),
    Table { r: u8, g: u8, b: u8 },
}

impl From<ColorDef> for Rgb {
    fn from(value: ColorDef) -> Self {
        match value {
            ColorDef::Array(c) => Rgb(c),
            ColorDef::Table { r, g, b } => Rgb([r, g, b]),
        }
    }
}
