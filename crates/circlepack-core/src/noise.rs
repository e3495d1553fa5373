//! 3-D simplex noise ported from GLSL (`glsl-noise/simplex/3d`).
//!
//! The port keeps the original operation order so that CPU results track the
//! values a fragment program computes for the same input. Any other noise
//! source can be plugged in through [`NoiseField`].

use glam::{Vec3, Vec3Swizzles, Vec4};

use crate::math::step4;

const C_X: f32 = 1.0 / 6.0;
const C_Y: f32 = 1.0 / 3.0;

/// A deterministic, band-limited scalar field over 3-D space.
///
/// Outputs are expected in roughly `[-1, 1]`.
pub trait NoiseField: Send + Sync {
    fn sample(&self, p: Vec3) -> f32;
}

/// Reference simplex noise, see [`simplex3`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Simplex3;

impl NoiseField for Simplex3 {
    #[inline]
    fn sample(&self, p: Vec3) -> f32 {
        simplex3(p)
    }
}

/// Adapts a plain function or closure into a [`NoiseField`].
#[derive(Clone, Copy, Debug)]
pub struct FnNoise<F>(pub F);

impl<F> NoiseField for FnNoise<F>
where
    F: Fn(Vec3) -> f32 + Send + Sync,
{
    #[inline]
    fn sample(&self, p: Vec3) -> f32 {
        (self.0)(p)
    }
}

/// OpenSimplex noise from the `noise` crate.
#[cfg(feature = "opensimplex")]
pub struct OpenSimplexField {
    inner: ::noise::OpenSimplex,
}

#[cfg(feature = "opensimplex")]
impl OpenSimplexField {
    pub fn new(seed: u32) -> Self {
        Self {
            inner: ::noise::OpenSimplex::new(seed),
        }
    }
}

#[cfg(feature = "opensimplex")]
impl NoiseField for OpenSimplexField {
    fn sample(&self, p: Vec3) -> f32 {
        use ::noise::NoiseFn;
        self.inner.get([p.x as f64, p.y as f64, p.z as f64]) as f32
    }
}

#[inline]
fn mod289_3(x: Vec3) -> Vec3 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

#[inline]
fn mod289_4(x: Vec4) -> Vec4 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

#[inline]
fn permute(x: Vec4) -> Vec4 {
    mod289_4(((x * 34.0) + 1.0) * x)
}

#[inline]
#[allow(clippy::excessive_precision)]
fn taylor_inv_sqrt(r: Vec4) -> Vec4 {
    Vec4::splat(1.79284291400159) - r * 0.85373472095314
}

/// 3-D simplex noise, roughly in `[-1, 1]`.
///
/// Port of the Ashima Arts / Ian McEwan GLSL implementation.
#[allow(clippy::excessive_precision)]
pub fn simplex3(v: Vec3) -> f32 {
    // First corner
    let i = (v + v.dot(Vec3::splat(C_Y))).floor();
    let x0 = v - i + i.dot(Vec3::splat(C_X));

    // Other corners
    let g = Vec3::select(x0.cmplt(x0.yzx()), Vec3::ZERO, Vec3::ONE);
    let l = Vec3::ONE - g;
    let i1 = g.min(l.zxy());
    let i2 = g.max(l.zxy());

    let x1 = x0 - i1 + C_X;
    let x2 = x0 - i2 + C_Y;
    let x3 = x0 - 0.5;

    // Permutations
    let i = mod289_3(i);
    let p = permute(
        permute(
            permute(i.z + Vec4::new(0.0, i1.z, i2.z, 1.0)) + i.y + Vec4::new(0.0, i1.y, i2.y, 1.0),
        ) + i.x
            + Vec4::new(0.0, i1.x, i2.x, 1.0),
    );

    // Gradients: 7x7 points over a square, mapped onto an octahedron.
    let n_ = 0.142857142857_f32; // 1/7
    let ns = Vec3::new(n_ * 2.0 - 0.0, n_ * 0.5 - 1.0, n_ * 1.0 - 0.0);

    let j = p - (p * ns.z * ns.z).floor() * 49.0;

    let x_ = (j * ns.z).floor();
    let y_ = (j - x_ * 7.0).floor();

    let x = x_ * ns.x + ns.y;
    let y = y_ * ns.x + ns.y;
    let h = Vec4::ONE - x.abs() - y.abs();

    let b0 = Vec4::new(x.x, x.y, y.x, y.y);
    let b1 = Vec4::new(x.z, x.w, y.z, y.w);

    let s0 = b0.floor() * 2.0 + 1.0;
    let s1 = b1.floor() * 2.0 + 1.0;
    let sh = -step4(h, Vec4::ZERO);

    let a0 = Vec4::new(b0.x, b0.z, b0.y, b0.w)
        + Vec4::new(s0.x, s0.z, s0.y, s0.w) * Vec4::new(sh.x, sh.x, sh.y, sh.y);
    let a1 = Vec4::new(b1.x, b1.z, b1.y, b1.w)
        + Vec4::new(s1.x, s1.z, s1.y, s1.w) * Vec4::new(sh.z, sh.z, sh.w, sh.w);

    let p0 = Vec3::new(a0.x, a0.y, h.x);
    let p1 = Vec3::new(a0.z, a0.w, h.y);
    let p2 = Vec3::new(a1.x, a1.y, h.z);
    let p3 = Vec3::new(a1.z, a1.w, h.w);

    // Normalise gradients
    let norm = taylor_inv_sqrt(Vec4::new(p0.dot(p0), p1.dot(p1), p2.dot(p2), p3.dot(p3)));
    let p0 = p0 * norm.x;
    let p1 = p1 * norm.y;
    let p2 = p2 * norm.z;
    let p3 = p3 * norm.w;

    // Mix final noise value
    let m = (Vec4::splat(0.6) - Vec4::new(x0.dot(x0), x1.dot(x1), x2.dot(x2), x3.dot(x3)))
        .max(Vec4::ZERO);
    let m = m * m;
    42.0 * (m * m).dot(Vec4::new(p0.dot(x0), p1.dot(x1), p2.dot(x2), p3.dot(x3)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permute_stays_in_range() {
        let p = permute(Vec4::new(0.0, 1.0, 150.0, 288.0));
        for c in p.to_array() {
            assert!((0.0..289.0).contains(&c), "permute out of range: {}", c);
            assert_eq!(c, c.floor(), "permute of integers must stay integral");
        }
    }

    #[test]
    fn test_fn_noise_adapter() {
        let field = FnNoise(|p: Vec3| p.x * 0.5);
        assert_eq!(field.sample(Vec3::new(1.0, 9.0, 9.0)), 0.5);
    }
}
