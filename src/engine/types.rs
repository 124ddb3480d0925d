/// Core types shared by the sampler, projector and rasterizer.

use crate::config::RenderProfile;

/// Glyph every cell is reset to at the start of a frame.
pub const BLANK_GLYPH: char = ' ';

/// Depth sentinel every cell is reset to; any visible sample beats it.
pub const EMPTY_DEPTH: f64 = 0.0;

/// 3D vector with f64 precision.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct Vec3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Screen geometry in character cells, fixed for the process lifetime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
    /// Horizontal projection scale
    pub scale_x: f64,
    /// Vertical projection scale
    pub scale_y: f64,
}

impl Viewport {
    pub fn new(width: usize, height: usize, profile: &RenderProfile) -> Self {
        Self {
            width,
            height,
            scale_x: width as f64 / profile.scale_x_divisor,
            scale_y: height as f64 / profile.scale_y_divisor,
        }
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}

/// Character buffer plus its parallel inverse-depth buffer, indexed `y * width + x`.
///
/// Both vectors are allocated once and always have `width * height` entries.
#[derive(Clone, Debug)]
pub struct FrameBuffers {
    width: usize,
    height: usize,
    output: Vec<char>,
    zbuffer: Vec<f64>,
}

impl FrameBuffers {
    pub fn new(viewport: &Viewport) -> Self {
        let cells = viewport.cell_count();
        Self {
            width: viewport.width,
            height: viewport.height,
            output: vec![BLANK_GLYPH; cells],
            zbuffer: vec![EMPTY_DEPTH; cells],
        }
    }

    /// Reset every cell to the blank glyph and empty depth.
    pub fn clear(&mut self) {
        self.output.fill(BLANK_GLYPH);
        self.zbuffer.fill(EMPTY_DEPTH);
    }

    /// Depth-tested write. Only a strictly nearer sample (larger `ooz`)
    /// replaces the cell, so ties keep the earlier write.
    #[inline]
    pub fn plot(&mut self, idx: usize, ooz: f64, glyph: char) -> bool {
        match self.zbuffer.get_mut(idx) {
            Some(depth) if ooz > *depth => {
                *depth = ooz;
                self.output[idx] = glyph;
                true
            }
            _ => false,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    pub fn glyphs(&self) -> &[char] {
        &self.output
    }

    pub fn depths(&self) -> &[f64] {
        &self.zbuffer
    }

    pub fn glyph(&self, x: usize, y: usize) -> Option<char> {
        if x >= self.width {
            return None;
        }
        self.output.get(y * self.width + x).copied()
    }

    pub fn depth(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width {
            return None;
        }
        self.zbuffer.get(y * self.width + x).copied()
    }

    /// Rows of the character buffer joined with '\n'.
    pub fn to_text(&self) -> String {
        if self.width == 0 {
            return String::new();
        }
        let mut text = String::with_capacity(self.len() + self.height);
        for (i, row) in self.output.chunks(self.width).enumerate() {
            if i > 0 {
                text.push('\n');
            }
            text.extend(row.iter());
        }
        text
    }
}

/// Rotation angles and their per-frame speeds.
///
/// Angles grow without bound; the trig functions absorb it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotationState {
    pub a: f64,
    pub b: f64,
    pub speed_a: f64,
    pub speed_b: f64,
}

impl RotationState {
    pub fn new(speed_a: f64, speed_b: f64) -> Self {
        Self { a: 0.0, b: 0.0, speed_a, speed_b }
    }

    /// Step both angles by their current speeds.
    pub fn advance(&mut self) {
        self.a += self.speed_a;
        self.b += self.speed_b;
    }

    pub fn trig(&self) -> RotationTrig {
        RotationTrig::new(self.a, self.b)
    }
}

/// Sines and cosines of the two rotation angles, computed once per frame.
#[derive(Clone, Copy, Debug)]
pub struct RotationTrig {
    pub sin_a: f64,
    pub cos_a: f64,
    pub sin_b: f64,
    pub cos_b: f64,
}

impl RotationTrig {
    pub fn new(a: f64, b: f64) -> Self {
        let (sin_a, cos_a) = a.sin_cos();
        let (sin_b, cos_b) = b.sin_cos();
        Self { sin_a, cos_a, sin_b, cos_b }
    }
}
