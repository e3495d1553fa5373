//! Base-shape generators.
//!
//! Both follow the three.js vertex layouts the sketches were authored
//! against, so vertex counts and ordering line up with a WebGL host that
//! builds the same geometries.

pub mod icosahedron;
pub mod sphere;

pub use icosahedron::icosahedron;
pub use sphere::{sphere_point, SurfaceMesh};
