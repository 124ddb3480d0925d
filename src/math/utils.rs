/// Numeric helpers shared by the projector, ramp and profile decoding.

/// Clamp i64 to [min, max].
#[inline(always)]
pub fn clampi(v: i64, min: i64, max: i64) -> i64 {
    if v < min { min } else if v > max { max } else { v }
}

/// Truncate toward zero into an i64, mapping NaN to 0.
///
/// `as` already saturates on overflow, so infinities land on the i64 bounds.
#[inline(always)]
pub fn trunc_to_i64(v: f64) -> i64 {
    if v.is_nan() { 0 } else { v as i64 }
}

/// Return `v` when it is finite and strictly positive, otherwise `fallback`.
#[inline]
pub fn positive_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { fallback }
}
