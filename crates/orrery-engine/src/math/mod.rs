//! Transform building blocks on top of glam.
//!
//! Angles cross this API in degrees and are converted to radians internally.
//! All matrices are glam's column-major `Mat4`, so `multiply(a, b)` is `a * b`:
//! the result applies `b` first, then `a`.

use glam::{Mat4, Vec3};

/// The 4x4 identity matrix.
#[inline]
pub fn identity() -> Mat4 {
    Mat4::IDENTITY
}

/// Translation by `v`.
#[inline]
pub fn translation(v: Vec3) -> Mat4 {
    Mat4::from_translation(v)
}

/// Uniform scale by `s` on all three axes.
#[inline]
pub fn scale_uniform(s: f32) -> Mat4 {
    Mat4::from_scale(Vec3::splat(s))
}

/// Rotation of `degrees` around `axis` (normalized here, any length works).
pub fn rotation_around_axis(axis: Vec3, degrees: f32) -> Mat4 {
    Mat4::from_axis_angle(axis.normalize(), degrees.to_radians())
}

/// Rotation of `degrees` around +Y. Used for every spin and revolution step.
#[inline]
pub fn rotation_y(degrees: f32) -> Mat4 {
    Mat4::from_rotation_y(degrees.to_radians())
}

/// Rotation of `degrees` around +X.
#[inline]
pub fn rotation_x(degrees: f32) -> Mat4 {
    Mat4::from_rotation_x(degrees.to_radians())
}

/// Compose two transforms: the result applies `b`, then `a`.
#[inline]
pub fn multiply(a: Mat4, b: Mat4) -> Mat4 {
    a * b
}

/// OpenGL-style perspective projection (clip z in [-1, 1]) with a vertical
/// field of view in degrees.
pub fn perspective(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective_rh_gl(fov_deg.to_radians(), aspect, near, far)
}

/// Right-handed view matrix looking from `eye` toward `target`.
#[inline]
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    Mat4::look_at_rh(eye, target, up)
}

/// Translation column of an affine matrix (the body's world position).
#[inline]
pub fn translation_of(m: &Mat4) -> Vec3 {
    m.w_axis.truncate()
}

/// Element-wise comparison with an absolute tolerance.
#[inline]
pub fn approx_eq(a: &Mat4, b: &Mat4, eps: f32) -> bool {
    a.abs_diff_eq(*b, eps)
}

/// Wrap an angle in degrees into `[0, 360)`.
#[inline]
pub fn wrap_degrees(deg: f32) -> f32 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
