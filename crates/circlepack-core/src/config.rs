use serde::{Deserialize, Serialize};

use crate::error::SketchError;
use crate::shaders::proximity::ShaderConfig;
use crate::Result;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Smallest instance count, inclusive.
    pub min_instances: u32,
    /// Largest instance count, exclusive.
    pub max_instances: u32,
    /// Distance between neighbouring instances along X.
    pub instance_spacing: f32,
    /// Radius of the icosahedron anchors are sampled from.
    pub base_radius: f32,
    /// Subdivision level of the icosahedron.
    pub base_detail: u32,
    pub surface_radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub shader: ShaderConfig,
    /// Hex colors to draw from; empty means the Riso palette.
    pub palette: Vec<String>,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            min_instances: 3,
            max_instances: 10,
            instance_spacing: 2.0,
            base_radius: 1.0,
            base_detail: 1,
            surface_radius: 1.0,
            width_segments: 32,
            height_segments: 16,
            shader: ShaderConfig::MULTI_SPHERE,
            palette: Vec::new(),
        }
    }
}

impl SketchConfig {
    /// One translucent sphere with time-varying noise.
    pub fn single_sphere() -> Self {
        Self {
            min_instances: 1,
            max_instances: 2,
            shader: ShaderConfig::SINGLE_SPHERE,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_instances == 0 || self.min_instances >= self.max_instances {
            return Err(SketchError::InvalidConfig(format!(
                "instance range [{}, {}) is empty or starts at zero",
                self.min_instances, self.max_instances
            )));
        }
        for (name, value) in [
            ("base_radius", self.base_radius),
            ("surface_radius", self.surface_radius),
        ] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(SketchError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !self.instance_spacing.is_finite() {
            return Err(SketchError::InvalidConfig(
                "instance_spacing must be finite".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.shader.alpha) {
            return Err(SketchError::InvalidConfig(format!(
                "alpha must be in [0, 1], got {}",
                self.shader.alpha
            )));
        }
        Ok(())
    }
}
