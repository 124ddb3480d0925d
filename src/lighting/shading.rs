/// Shading formulas. Both produce a ramp position that the ramp clamps.
///
/// `Analytic` evaluates a closed-form luminance from the rotation and
/// parametric angles; `DirectionalLight` dots a fixed unit light vector with a
/// normal approximated from the parametric angles.

use crate::engine::sampler::SurfaceSample;
use crate::engine::types::{RotationTrig, Vec3D};
use crate::lighting::ramp::LuminanceRamp;
use crate::math::math3d;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShadingModel {
    /// Ramp position = luminance × gain
    Analytic { gain: f64 },
    /// Ramp position = (n·l + 1) / 2 × ramp length; `light` is unit length
    DirectionalLight { light: Vec3D },
}

impl ShadingModel {
    /// Light-vector model; the direction is normalized here.
    pub fn directional(light: Vec3D) -> Self {
        ShadingModel::DirectionalLight { light: math3d::vec3d_normalized(&light) }
    }

    /// Closed-form luminance in [-√2, √2].
    #[inline]
    pub fn analytic_luminance(s: &SurfaceSample, t: &RotationTrig) -> f64 {
        s.cos_phi * s.cos_theta * t.sin_b
            - t.cos_a * s.cos_theta * s.sin_phi
            - t.sin_a * s.sin_theta
            + t.cos_b * (t.cos_a * s.sin_theta - s.cos_theta * s.sin_phi * t.sin_a)
    }

    /// Unit normal approximation taken straight from the parametric angles.
    #[inline]
    pub fn parametric_normal(s: &SurfaceSample) -> Vec3D {
        Vec3D {
            x: s.cos_theta * s.cos_phi,
            y: s.cos_theta * s.sin_phi,
            z: s.sin_theta,
        }
    }

    /// Unclamped position on a ramp of `ramp_len` glyphs.
    #[inline]
    pub fn ramp_position(&self, s: &SurfaceSample, t: &RotationTrig, ramp_len: usize) -> f64 {
        match self {
            ShadingModel::Analytic { gain } => Self::analytic_luminance(s, t) * gain,
            ShadingModel::DirectionalLight { light } => {
                let dot = math3d::vec3d_dot(&Self::parametric_normal(s), light);
                (dot + 1.0) * 0.5 * ramp_len as f64
            }
        }
    }

    #[inline]
    pub fn shade(&self, s: &SurfaceSample, t: &RotationTrig, ramp: &LuminanceRamp) -> char {
        ramp.glyph_for(self.ramp_position(s, t, ramp.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderProfile;
    use crate::engine::sampler::SurfaceSampler;

    #[test]
    fn test_directional_is_normalized() {
        match ShadingModel::directional(Vec3D { x: 0.0, y: 1.0, z: -1.0 }) {
            ShadingModel::DirectionalLight { light } => {
                assert!((math3d::vec3d_length(&light) - 1.0).abs() < 1e-12);
                assert!((light.y - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
            }
            other => panic!("unexpected model {other:?}"),
        }
    }

    #[test]
    fn test_analytic_luminance_bounds() {
        let sampler = SurfaceSampler::new(&RenderProfile::classic());
        for (a, b) in [(0.0, 0.0), (1.0, 2.0), (std::f64::consts::PI, -std::f64::consts::PI), (1e6, 3e5)] {
            let t = RotationTrig::new(a, b);
            for s in sampler.samples().step_by(97) {
                let l = ShadingModel::analytic_luminance(&s, &t);
                assert!(l.abs() <= std::f64::consts::SQRT_2 + 1e-9);
            }
        }
    }

    #[test]
    fn test_shade_stays_on_ramp() {
        let ramp = LuminanceRamp::default();
        let models = [
            ShadingModel::Analytic { gain: 8.0 },
            ShadingModel::Analytic { gain: 1e9 },
            ShadingModel::Analytic { gain: -1e9 },
            ShadingModel::directional(Vec3D { x: 0.0, y: 1.0, z: -1.0 }),
        ];
        let sampler = SurfaceSampler::new(&RenderProfile::default());
        let t = RotationTrig::new(0.3, 0.9);
        for model in models {
            for s in sampler.samples().step_by(131) {
                let pos = model.ramp_position(&s, &t, ramp.len());
                assert!(ramp.index_for(pos) < ramp.len());
                let _ = model.shade(&s, &t, &ramp);
            }
        }
    }

    #[test]
    fn test_directional_extremes() {
        let ramp = LuminanceRamp::default();
        let model = ShadingModel::directional(Vec3D { x: 0.0, y: 0.0, z: 1.0 });
        let t = RotationTrig::new(0.0, 0.0);
        let lit = |theta: f64| {
            let (sin_theta, cos_theta) = theta.sin_cos();
            SurfaceSample {
                theta,
                phi: 0.0,
                sin_theta,
                cos_theta,
                sin_phi: 0.0,
                cos_phi: 1.0,
                circle_x: 3.1,
                circle_y: 0.0,
            }
        };
        // dot = +1 saturates at the dense end, dot = -1 at the sparse end.
        assert_eq!(model.shade(&lit(std::f64::consts::FRAC_PI_2), &t, &ramp), '@');
        assert_eq!(model.shade(&lit(-std::f64::consts::FRAC_PI_2), &t, &ramp), ' ');
    }
}
