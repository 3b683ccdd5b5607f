//! Fixed-size palette feeding the `color0..color4` shader uniforms.
//!
//! Channels are stored as `f64` in `[0, 1]` and compared exactly: the
//! render loop relies on `==` to decide whether a redraw is needed, so no
//! tolerance is applied anywhere in this module.

use crate::error::{Result, ViewerError};

/// Number of palette slots exposed to the shader.
pub const SCHEME_SIZE: usize = 5;

/// One RGB color with channels in `[0, 1]`.
pub type Rgb = [f64; 3];

/// Ordered palette; each index is a semantic slot, not a sort position.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    colors: [Rgb; SCHEME_SIZE],
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            colors: [
                [0.0, 0.0, 0.0],
                [1.0, 0.5, 0.0],
                [0.0, 0.5, 1.0],
                [0.5, 0.0, 1.0],
                [0.5, 0.1, 0.0],
            ],
        }
    }
}

impl ColorScheme {
    pub fn new(colors: [Rgb; SCHEME_SIZE]) -> Self {
        Self { colors }
    }

    /// Build a scheme from hex strings, starting from the default palette.
    pub fn from_hexes<S: AsRef<str>>(hexes: &[S]) -> Result<Self> {
        let mut scheme = Self::default();
        scheme.set_color_hexes(hexes)?;
        Ok(scheme)
    }

    pub fn colors(&self) -> &[Rgb; SCHEME_SIZE] {
        &self.colors
    }

    pub fn color(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    /// Replace slot `index` with the color encoded in `hex`.
    ///
    /// On any error the scheme is left untouched.
    pub fn set_color_hex(&mut self, index: usize, hex: &str) -> Result<()> {
        let slot = self
            .colors
            .get_mut(index)
            .ok_or(ViewerError::SlotOutOfRange {
                index,
                len: SCHEME_SIZE,
            })?;
        *slot = parse_hex(hex)?;
        Ok(())
    }

    /// Apply `hexes` positionally to slots `0..hexes.len()`.
    ///
    /// Every entry is validated before any slot is written.
    pub fn set_color_hexes<S: AsRef<str>>(&mut self, hexes: &[S]) -> Result<()> {
        if hexes.len() > SCHEME_SIZE {
            return Err(ViewerError::SlotOutOfRange {
                index: hexes.len() - 1,
                len: SCHEME_SIZE,
            });
        }
        let parsed = hexes
            .iter()
            .map(|hex| parse_hex(hex.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        for (slot, color) in self.colors.iter_mut().zip(parsed) {
            *slot = color;
        }
        Ok(())
    }

    /// Lowercase `#rrggbb` for slot `index`.
    pub fn color_hex(&self, index: usize) -> Option<String> {
        self.colors.get(index).map(format_hex)
    }

    /// Channels narrowed for upload as `vec3` uniforms.
    pub fn to_uniform_colors(&self) -> [[f32; 3]; SCHEME_SIZE] {
        self.colors
            .map(|[r, g, b]| [r as f32, g as f32, b as f32])
    }
}

fn parse_hex(hex: &str) -> Result<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    // from_str_radix tolerates a sign prefix, so check the digits up front.
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ViewerError::InvalidHex(hex.to_owned()));
    }
    let mut color = [0.0; 3];
    for (channel, value) in color.iter_mut().enumerate() {
        let pair = &digits[channel * 2..channel * 2 + 2];
        let byte =
            u8::from_str_radix(pair, 16).map_err(|_| ViewerError::InvalidHex(hex.to_owned()))?;
        *value = f64::from(byte) / 255.0;
    }
    Ok(color)
}

fn format_hex(color: &Rgb) -> String {
    let mut s = String::with_capacity(7);
    s.push('#');
    for channel in color {
        let byte = (255.0 * channel).floor().clamp(0.0, 255.0) as u8;
        s.push_str(&format!("{byte:02x}"));
    }
    s
}
