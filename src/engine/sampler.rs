/// Surface sampler — enumerates the (theta, phi) parameter grid of the torus.
///
/// theta sweeps the ring (outer loop), phi sweeps the tube (inner loop); both
/// ascend from 0 and stay below 2π. Sample values depend only on the step
/// indices, so every call yields the same sequence.

use std::f64::consts::TAU;

use crate::config::RenderProfile;

/// One point of the parameter grid with its tube-circle coordinates.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceSample {
    pub theta: f64,
    pub phi: f64,
    pub sin_theta: f64,
    pub cos_theta: f64,
    pub sin_phi: f64,
    pub cos_phi: f64,
    /// cos(phi) + tube offset
    pub circle_x: f64,
    /// sin(phi)
    pub circle_y: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct SurfaceSampler {
    theta_step: f64,
    phi_step: f64,
    tube_offset: f64,
}

impl SurfaceSampler {
    pub fn new(profile: &RenderProfile) -> Self {
        Self {
            theta_step: profile.theta_step,
            phi_step: profile.phi_step,
            tube_offset: profile.tube_offset,
        }
    }

    pub fn theta_count(&self) -> usize {
        steps_below_tau(self.theta_step)
    }

    pub fn phi_count(&self) -> usize {
        steps_below_tau(self.phi_step)
    }

    /// Theta-major, phi-minor walk over the whole grid.
    pub fn samples(&self) -> impl Iterator<Item = SurfaceSample> + '_ {
        let phi_count = self.phi_count();
        (0..self.theta_count()).flat_map(move |i| {
            let theta = i as f64 * self.theta_step;
            let (sin_theta, cos_theta) = theta.sin_cos();
            (0..phi_count).map(move |j| {
                let phi = j as f64 * self.phi_step;
                let (sin_phi, cos_phi) = phi.sin_cos();
                SurfaceSample {
                    theta,
                    phi,
                    sin_theta,
                    cos_theta,
                    sin_phi,
                    cos_phi,
                    circle_x: cos_phi + self.tube_offset,
                    circle_y: sin_phi,
                }
            })
        })
    }
}

/// Number of multiples of `step` in [0, 2π).
fn steps_below_tau(step: f64) -> usize {
    if !(step.is_finite() && step > 0.0) {
        return 0;
    }
    let mut n = (TAU / step).ceil() as usize;
    while n > 0 && (n - 1) as f64 * step >= TAU {
        n -= 1;
    }
    n
}
