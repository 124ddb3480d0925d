pub mod math3d;
pub mod utils;
