//! Procedural "circle packing" shading core.
//!
//! Anchor points are sampled from a base shape, and every fragment of a
//! shaded surface is painted either with its instance color or with the
//! background depending on a noise-perturbed nearest-anchor distance test.

pub mod anchor;
pub mod config;
pub mod error;
pub mod geometry;
pub mod host;
pub mod instance;
pub mod math;
pub mod noise;
pub mod palette;
pub mod raster;
pub mod shaders;
pub mod sketch;
pub mod uniforms;

pub use anchor::{AnchorSampler, AnchorSet, CoordinateSpace};
pub use error::{Mismatch, SketchError};
pub use instance::InstanceParameters;
pub use shaders::grid::CellGridShader;
pub use shaders::proximity::{NoiseMode, ProximityMaskShader, ShaderConfig};
pub use shaders::{FragmentInput, FragmentShader};
pub use sketch::Sketch;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, SketchError>;
