/// Lighting — maps a per-sample lighting term onto a ramp of ASCII glyphs.
///
/// - `ramp`: ordered glyph ramp and the saturating index mapping
/// - `shading`: analytic-angle and light-vector shading formulas

pub mod ramp;
pub mod shading;
