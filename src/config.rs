/// Render profiles — every tunable constant of the renderer in one place.
///
/// Two presets ship with the crate: the light-vector profile used by default
/// and the `classic` analytic-luminance profile. JavaScript callers pass a
/// flat `Float64Array` which is decoded by [`profile_from_buffer`].

use std::time::Duration;

use crate::engine::types::Vec3D;
use crate::lighting::ramp::{LuminanceRamp, CLASSIC_RAMP, DEFAULT_RAMP};
use crate::lighting::shading::ShadingModel;
use crate::math::utils;

/// Smallest accepted angle step; keeps a frame under ~4e7 samples.
pub const MIN_STEP: f64 = 1e-3;

/// Number of f64 slots read by [`profile_from_buffer`].
pub const PROFILE_BUFFER_LEN: usize = 17;

/// Complete set of renderer and animation constants.
#[derive(Clone, Debug)]
pub struct RenderProfile {
    /// Ring angle step (outer loop)
    pub theta_step: f64,
    /// Tube angle step (inner loop), finer than `theta_step`
    pub phi_step: f64,
    /// Distance of the tube circle centre from the ring axis
    pub tube_offset: f64,
    /// Camera distance along the viewing axis
    pub camera_distance: f64,
    /// Samples with camera-space z at or below this are skipped
    pub near_clip: f64,
    /// scale_x = width / scale_x_divisor
    pub scale_x_divisor: f64,
    /// scale_y = height / scale_y_divisor
    pub scale_y_divisor: f64,
    pub ramp: LuminanceRamp,
    pub shading: ShadingModel,
    /// Initial rotation speeds (radians per frame)
    pub speed_a: f64,
    pub speed_b: f64,
    /// Speed change per key press
    pub speed_increment: f64,
    pub frame_delay: Duration,
    pub intro_poll_interval: Duration,
}

impl Default for RenderProfile {
    fn default() -> Self {
        Self {
            theta_step: 0.045,
            phi_step: 0.01,
            tube_offset: 2.1,
            camera_distance: 5.0,
            near_clip: 1e-3,
            scale_x_divisor: 2.0,
            scale_y_divisor: 2.2,
            ramp: LuminanceRamp::new(DEFAULT_RAMP),
            shading: ShadingModel::directional(Vec3D { x: 0.0, y: 1.0, z: -1.0 }),
            speed_a: 0.045,
            speed_b: 0.02,
            speed_increment: 0.01,
            frame_delay: Duration::from_millis(30),
            intro_poll_interval: Duration::from_millis(100),
        }
    }
}

impl RenderProfile {
    /// Analytic-luminance preset: coarser grid, wider margins, no explicit light.
    pub fn classic() -> Self {
        Self {
            theta_step: 0.05,
            phi_step: 0.015,
            tube_offset: 2.0,
            scale_x_divisor: 2.3,
            scale_y_divisor: 2.5,
            ramp: LuminanceRamp::new(CLASSIC_RAMP),
            shading: ShadingModel::Analytic { gain: 8.0 },
            speed_a: 0.04,
            speed_b: 0.02,
            ..Self::default()
        }
    }
}

/// Build a RenderProfile from a flat parameter buffer.
///
/// Layout: [theta_step, phi_step, tube_offset, camera_distance, near_clip,
///          scale_x_div, scale_y_div, shading (0 = light, 1 = analytic),
///          analytic_gain, light xyz, speed_a, speed_b, speed_increment,
///          frame_delay_ms, ramp (0 = default, 1 = classic)]
///
/// Buffers shorter than the layout yield the default profile. Step sizes,
/// divisors and the camera distance fall back to their defaults unless
/// finite and positive, and steps are raised to at least [`MIN_STEP`].
pub fn profile_from_buffer(data: &[f64]) -> RenderProfile {
    let defaults = RenderProfile::default();
    if data.len() < PROFILE_BUFFER_LEN {
        return defaults;
    }

    let shading = if data[7] == 1.0 {
        ShadingModel::Analytic { gain: if data[8].is_finite() { data[8] } else { 8.0 } }
    } else {
        ShadingModel::directional(Vec3D { x: data[9], y: data[10], z: data[11] })
    };
    let ramp = if data[16] == 1.0 { CLASSIC_RAMP } else { DEFAULT_RAMP };
    let delay_ms = if data[15].is_finite() && data[15] >= 0.0 { data[15] as u64 } else { 30 };

    RenderProfile {
        theta_step: utils::positive_or(data[0], defaults.theta_step).max(MIN_STEP),
        phi_step: utils::positive_or(data[1], defaults.phi_step).max(MIN_STEP),
        tube_offset: if data[2].is_finite() { data[2] } else { defaults.tube_offset },
        camera_distance: utils::positive_or(data[3], defaults.camera_distance),
        near_clip: utils::positive_or(data[4], defaults.near_clip),
        scale_x_divisor: utils::positive_or(data[5], defaults.scale_x_divisor),
        scale_y_divisor: utils::positive_or(data[6], defaults.scale_y_divisor),
        ramp: LuminanceRamp::new(ramp),
        shading,
        speed_a: if data[12].is_finite() { data[12] } else { defaults.speed_a },
        speed_b: if data[13].is_finite() { data[13] } else { defaults.speed_b },
        speed_increment: utils::positive_or(data[14], defaults.speed_increment),
        frame_delay: Duration::from_millis(delay_ms),
        intro_poll_interval: defaults.intro_poll_interval,
    }
}
