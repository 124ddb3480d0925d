/// 3D vector helpers used by the projector and the light-vector shader.
///
/// Plain f64 operations on `Vec3D`; nothing here allocates.

use crate::engine::types::Vec3D;

#[inline(always)]
pub fn vec3d_scale(v: &Vec3D, s: f64) -> Vec3D {
    Vec3D {
        x: v.x * s,
        y: v.y * s,
        z: v.z * s,
    }
}

#[inline(always)]
pub fn vec3d_dot(a: &Vec3D, b: &Vec3D) -> f64 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

#[inline(always)]
pub fn vec3d_length(v: &Vec3D) -> f64 {
    vec3d_dot(v, v).sqrt()
}

/// Normalize in place. Degenerate (near-zero) vectors are left untouched.
#[inline(always)]
pub fn vec3d_normalize(v: &mut Vec3D) {
    let len = vec3d_length(v);
    if len > 1e-30 {
        *v = vec3d_scale(v, 1.0 / len);
    }
}

#[inline(always)]
pub fn vec3d_normalized(v: &Vec3D) -> Vec3D {
    let mut result = *v;
    vec3d_normalize(&mut result);
    result
}
