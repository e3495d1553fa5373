//! Scalar and vector helpers matching their GLSL built-in counterparts.

use glam::{Vec2, Vec3, Vec4};

/// GLSL `fract` for `vec2`: `v - floor(v)`, each component in `[0, 1)`.
#[inline]
pub fn fract2(v: Vec2) -> Vec2 {
    v - v.floor()
}

/// GLSL `step(edge, x)`: `0.0` when `x < edge`, `1.0` otherwise.
#[inline]
pub fn step(edge: f32, x: f32) -> f32 {
    if x < edge {
        0.0
    } else {
        1.0
    }
}

/// Component-wise GLSL `step` for `vec4`.
#[inline]
pub fn step4(edge: Vec4, x: Vec4) -> Vec4 {
    Vec4::select(x.cmplt(edge), Vec4::ZERO, Vec4::ONE)
}

/// GLSL `mix(a, b, t)` for `vec3`. Exact at `t = 0` and `t = 1`.
#[inline]
pub fn mix3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a * (1.0 - t) + b * t
}
