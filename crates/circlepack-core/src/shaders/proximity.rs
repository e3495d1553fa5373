//! Noise-jittered nearest-anchor mask.
//!
//! For a fragment at `p` the shader measures the distance to the closest
//! anchor, samples the noise field, and paints the instance color wherever
//! the scaled noise value reaches that distance:
//!
//! ```text
//! dist  = min |p - a|           over the instance's anchors
//! n     = noise(p) * amplitude  (noise(p.x, p.y, time) in temporal mode)
//! mask  = n < dist ? 0 : 1
//! color = mix(background, base_color, mask)
//! ```
//!
//! Near an anchor `dist` is small, so a positive noise value fills in a disk
//! whose edge wobbles with the noise.
//!
//! The GLSL sketches this was developed from use the opposite polarity:
//! `dist < noise` there gives white disks on an instance-colored surface.
//! A WebGL host reusing those programs must swap the `mix` arguments to
//! match this shader.

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::anchor::CoordinateSpace;
use crate::error::Mismatch;
use crate::instance::InstanceParameters;
use crate::math::mix3;
use crate::noise::{NoiseField, Simplex3};
use crate::shaders::{FragmentInput, FragmentShader};
use crate::Result;

/// Whether elapsed time participates in the noise sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseMode {
    /// `noise(p)`: the pattern is frozen on the surface.
    #[default]
    Spatial,
    /// `noise(p.x, p.y, time)`: the pattern boils over time.
    Temporal,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderConfig {
    /// Scale applied to the raw noise before the distance comparison.
    pub noise_amplitude: f32,
    pub noise_mode: NoiseMode,
    /// Output alpha, constant per sketch.
    pub alpha: f32,
    /// Color of unpainted fragments.
    pub background: [f32; 3],
    /// Space fragment positions are delivered in.
    pub fragment_space: CoordinateSpace,
}

impl ShaderConfig {
    /// Several spheres, position-only noise, opaque.
    pub const MULTI_SPHERE: Self = Self {
        noise_amplitude: 0.5,
        noise_mode: NoiseMode::Spatial,
        alpha: 1.0,
        background: [1.0, 1.0, 1.0],
        fragment_space: CoordinateSpace::Object,
    };

    /// One sphere, time-varying noise, slightly translucent.
    pub const SINGLE_SPHERE: Self = Self {
        noise_amplitude: 0.5,
        noise_mode: NoiseMode::Temporal,
        alpha: 0.8,
        background: [1.0, 1.0, 1.0],
        fragment_space: CoordinateSpace::Object,
    };

    pub fn background(&self) -> Vec3 {
        Vec3::from_array(self.background)
    }
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self::MULTI_SPHERE
    }
}

/// Binary mask from a nearest-anchor distance and a scaled noise value.
///
/// Returns exactly `1.0` (painted) or `0.0` (background).
#[inline]
pub fn proximity_mask(dist: f32, noise: f32) -> f32 {
    if noise < dist {
        0.0
    } else {
        1.0
    }
}

/// The circle-packing fragment program.
///
/// Holds no per-instance state: anchors, color and time all come from the
/// [`InstanceParameters`] passed to each call.
#[derive(Clone, Debug)]
pub struct ProximityMaskShader<N = Simplex3> {
    noise: N,
    config: ShaderConfig,
}

impl ProximityMaskShader<Simplex3> {
    pub fn new(config: ShaderConfig) -> Self {
        Self::with_noise(Simplex3, config)
    }
}

impl Default for ProximityMaskShader<Simplex3> {
    fn default() -> Self {
        Self::new(ShaderConfig::default())
    }
}

impl<N: NoiseField> ProximityMaskShader<N> {
    pub fn with_noise(noise: N, config: ShaderConfig) -> Self {
        Self { noise, config }
    }

    pub fn config(&self) -> &ShaderConfig {
        &self.config
    }

    pub fn noise(&self) -> &N {
        &self.noise
    }

    /// Reject an instance whose anchors live in a different space than the
    /// fragments this shader will receive.
    pub fn validate(&self, params: &InstanceParameters) -> Result<()> {
        let anchors = params.anchors().space();
        if anchors != self.config.fragment_space {
            return Err(Mismatch::CoordinateSpace {
                anchors,
                fragments: self.config.fragment_space,
            }
            .into());
        }
        Ok(())
    }

    /// Scaled noise value for `position` at `time`.
    #[inline]
    pub fn noise_offset(&self, position: Vec3, time: f32) -> f32 {
        let sample_at = match self.config.noise_mode {
            NoiseMode::Spatial => position,
            NoiseMode::Temporal => Vec3::new(position.x, position.y, time),
        };
        self.noise.sample(sample_at) * self.config.noise_amplitude
    }

    /// Mask value (`0.0` or `1.0`) of the fragment at `position`.
    #[inline]
    pub fn mask(&self, position: Vec3, params: &InstanceParameters) -> f32 {
        let dist = params.anchors().nearest_distance(position);
        proximity_mask(dist, self.noise_offset(position, params.time()))
    }

    /// Final RGBA color of the fragment at `position`.
    pub fn shade(&self, position: Vec3, params: &InstanceParameters) -> Vec4 {
        let m = self.mask(position, params);
        mix3(self.config.background(), params.base_color(), m).extend(self.config.alpha)
    }
}

impl<N: NoiseField> FragmentShader for ProximityMaskShader<N> {
    #[inline]
    fn fragment(&self, fragment: &FragmentInput, params: &InstanceParameters) -> Vec4 {
        self.shade(fragment.position, params)
    }
}
