/// Rasterizer — depth-buffered painter over the sampled torus surface.
///
/// For every grid sample: project, shade, then write the glyph only when the
/// sample is strictly nearer than what the cell already holds. Iteration order
/// is theta-major, phi-minor, so equal-depth ties resolve to the first sample
/// in that order.

use crate::config::RenderProfile;
use crate::engine::projector::Projector;
use crate::engine::sampler::SurfaceSampler;
use crate::engine::types::{FrameBuffers, RotationTrig, Viewport};
use crate::lighting::ramp::LuminanceRamp;
use crate::lighting::shading::ShadingModel;

/// Sample counters for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Grid samples visited
    pub samples: usize,
    /// Samples that landed inside the viewport
    pub projected: usize,
    /// Samples that won the depth test
    pub plotted: usize,
}

/// Clear `buffers` and rasterize one full pass of the parameter grid.
pub fn render_frame(
    buffers: &mut FrameBuffers,
    sampler: &SurfaceSampler,
    projector: &Projector,
    shading: &ShadingModel,
    ramp: &LuminanceRamp,
) -> FrameStats {
    buffers.clear();
    let mut stats = FrameStats::default();
    let trig = *projector.trig();

    for sample in sampler.samples() {
        stats.samples += 1;
        let Some(p) = projector.project(&sample) else {
            continue;
        };
        stats.projected += 1;

        let glyph = shading.shade(&sample, &trig, ramp);
        if buffers.plot(p.idx, p.ooz, glyph) {
            stats.plotted += 1;
        }
    }

    stats
}

/// Owns a profile, its viewport and the reusable frame buffers.
#[derive(Clone, Debug)]
pub struct TorusRenderer {
    profile: RenderProfile,
    viewport: Viewport,
    sampler: SurfaceSampler,
    buffers: FrameBuffers,
}

impl TorusRenderer {
    pub fn new(profile: RenderProfile, width: usize, height: usize) -> Self {
        let viewport = Viewport::new(width, height, &profile);
        let sampler = SurfaceSampler::new(&profile);
        let buffers = FrameBuffers::new(&viewport);
        Self { profile, viewport, sampler, buffers }
    }

    /// Render the torus at rotation angles (a, b) into the internal buffers.
    pub fn render(&mut self, a: f64, b: f64) -> FrameStats {
        let projector = Projector::new(
            RotationTrig::new(a, b),
            self.viewport,
            self.profile.camera_distance,
            self.profile.near_clip,
        );
        render_frame(
            &mut self.buffers,
            &self.sampler,
            &projector,
            &self.profile.shading,
            &self.profile.ramp,
        )
    }

    pub fn buffers(&self) -> &FrameBuffers {
        &self.buffers
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn profile(&self) -> &RenderProfile {
        &self.profile
    }
}
