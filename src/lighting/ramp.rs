/// Luminance ramp — glyphs ordered from least to most ink.

use crate::math::utils;

/// Ramp of the light-vector profile; index 0 is blank.
pub const DEFAULT_RAMP: &str = " .,-~:;=!*#$@";

/// Ramp of the analytic profile.
pub const CLASSIC_RAMP: &str = ".,-+~:;=!*#$@";

#[derive(Clone, Debug, PartialEq)]
pub struct LuminanceRamp {
    glyphs: Vec<char>,
}

impl Default for LuminanceRamp {
    fn default() -> Self {
        Self::new(DEFAULT_RAMP)
    }
}

impl LuminanceRamp {
    /// Build a ramp from a string, darkest glyph first. An empty string
    /// yields the default ramp.
    pub fn new(glyphs: &str) -> Self {
        let glyphs: Vec<char> = glyphs.chars().collect();
        if glyphs.is_empty() {
            return Self::new(DEFAULT_RAMP);
        }
        Self { glyphs }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph at `index`, saturating at the dense end.
    pub fn glyph_at(&self, index: usize) -> char {
        self.glyphs[index.min(self.glyphs.len() - 1)]
    }

    /// Truncate a scaled lighting value to a ramp index in [0, len - 1].
    /// Out-of-range and non-finite inputs saturate instead of failing.
    #[inline]
    pub fn index_for(&self, position: f64) -> usize {
        let last = self.glyphs.len() as i64 - 1;
        utils::clampi(utils::trunc_to_i64(position), 0, last) as usize
    }

    #[inline]
    pub fn glyph_for(&self, position: f64) -> char {
        self.glyphs[self.index_for(position)]
    }
}
