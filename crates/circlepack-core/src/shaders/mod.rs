//! Per-fragment shading procedures.
//!
//! Every shader is a stateless function of one fragment and one instance's
//! parameters, so fragments may be evaluated in any order or in parallel.

pub mod grid;
pub mod proximity;

use glam::{Vec2, Vec3, Vec4};

use crate::instance::InstanceParameters;

/// Transient inputs of a single fragment evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FragmentInput {
    /// Surface position, in the same space as the instance's anchors.
    pub position: Vec3,
    /// Surface texture coordinates.
    pub uv: Vec2,
}

impl FragmentInput {
    pub fn new(position: Vec3, uv: Vec2) -> Self {
        Self { position, uv }
    }
}

/// A fragment program run once per rasterized sample.
pub trait FragmentShader: Sync {
    /// Final RGBA color of `fragment` for the instance described by `params`.
    fn fragment(&self, fragment: &FragmentInput, params: &InstanceParameters) -> Vec4;
}
