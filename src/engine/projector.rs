/// Projector — two-axis rotation followed by perspective projection.
///
/// The rotated point uses the combined torus rotation (A about the X axis,
/// then B about the Z axis):
///
///   x = cx·(cosB·cosθ + sinA·sinB·sinθ) − cy·cosA·sinB
///   y = cx·(sinB·cosθ − sinA·cosB·sinθ) + cy·cosA·cosB
///   z = K + cosA·cx·sinθ + cy·sinA
///
/// where (cx, cy) is the tube circle point and K the camera distance.

use crate::engine::sampler::SurfaceSample;
use crate::engine::types::{RotationTrig, Vec3D, Viewport};
use crate::math::utils;

/// A sample that landed inside the viewport.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    /// Rotated point; `z` includes the camera distance
    pub point: Vec3D,
    /// 1 / z — perspective scale and occlusion key
    pub ooz: f64,
    pub xp: usize,
    pub yp: usize,
    /// yp * width + xp
    pub idx: usize,
}

#[derive(Clone, Copy, Debug)]
pub struct Projector {
    trig: RotationTrig,
    viewport: Viewport,
    camera_distance: f64,
    near_clip: f64,
}

impl Projector {
    pub fn new(trig: RotationTrig, viewport: Viewport, camera_distance: f64, near_clip: f64) -> Self {
        Self { trig, viewport, camera_distance, near_clip }
    }

    pub fn trig(&self) -> &RotationTrig {
        &self.trig
    }

    /// Rotate a sample into camera space.
    #[inline]
    pub fn rotate(&self, s: &SurfaceSample) -> Vec3D {
        let RotationTrig { sin_a, cos_a, sin_b, cos_b } = self.trig;
        Vec3D {
            x: s.circle_x * (cos_b * s.cos_theta + sin_a * sin_b * s.sin_theta)
                - s.circle_y * cos_a * sin_b,
            y: s.circle_x * (sin_b * s.cos_theta - sin_a * cos_b * s.sin_theta)
                + s.circle_y * cos_a * cos_b,
            z: self.camera_distance + cos_a * s.circle_x * s.sin_theta + s.circle_y * sin_a,
        }
    }

    /// Project a sample to a cell. Returns `None` when the point sits at or
    /// behind the near clip distance or falls outside the viewport.
    #[inline]
    pub fn project(&self, s: &SurfaceSample) -> Option<Projection> {
        let point = self.rotate(s);
        if !(point.z > self.near_clip) {
            return None;
        }
        let ooz = 1.0 / point.z;

        let w = self.viewport.width;
        let h = self.viewport.height;
        // Halves truncate like integer division of the cell counts.
        let half_w = (w / 2) as f64;
        let half_h = (h / 2) as f64;

        let xp = utils::trunc_to_i64(half_w + self.viewport.scale_x * ooz * point.x);
        let yp = utils::trunc_to_i64(half_h - self.viewport.scale_y * ooz * point.y);

        // Check each axis separately: a negative x would otherwise fold into
        // a valid-looking linear index on the previous row.
        if xp < 0 || yp < 0 || xp >= w as i64 || yp >= h as i64 {
            return None;
        }
        let (xp, yp) = (xp as usize, yp as usize);

        Some(Projection { point, ooz, xp, yp, idx: yp * w + xp })
    }
}
