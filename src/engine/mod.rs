/// Rendering engine — sampler, projector and depth-buffered rasterizer.

pub mod projector;
pub mod rasterizer;
pub mod sampler;
pub mod types;
