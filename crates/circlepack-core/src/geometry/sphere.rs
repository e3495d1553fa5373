//! UV sphere: the surface the circle pattern is shaded onto.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::error::SketchError;
use crate::Result;

/// Point on a sphere of `radius` for surface coordinates `(u, v)` in `[0, 1]`.
///
/// `u` runs around the equator starting at -X, `v` runs from the north pole
/// (+Y) at 0 to the south pole at 1.
#[inline]
pub fn sphere_point(radius: f32, u: f32, v: f32) -> Vec3 {
    let phi = u * TAU;
    let theta = v * PI;
    Vec3::new(
        -radius * phi.cos() * theta.sin(),
        radius * theta.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// Indexed triangle mesh with per-vertex UVs.
#[derive(Clone, Debug, Default)]
pub struct SurfaceMesh {
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl SurfaceMesh {
    /// Build a UV sphere with `width_segments x height_segments` quads.
    ///
    /// The seam column and both pole rows are duplicated so every vertex
    /// owns a unique UV; degenerate pole triangles are skipped.
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Result<Self> {
        if !(radius > 0.0) || !radius.is_finite() {
            return Err(SketchError::InvalidGeometry(format!(
                "sphere radius must be positive, got {radius}"
            )));
        }
        let ws = width_segments.max(3);
        let hs = height_segments.max(2);

        let mut mesh = SurfaceMesh::default();
        let mut grid: Vec<Vec<u32>> = Vec::with_capacity(hs as usize + 1);
        let mut index = 0u32;

        for iy in 0..=hs {
            let v = iy as f32 / hs as f32;
            // Nudge pole UVs to the middle of their wedge
            let u_offset = if iy == 0 {
                0.5 / ws as f32
            } else if iy == hs {
                -0.5 / ws as f32
            } else {
                0.0
            };

            let mut row = Vec::with_capacity(ws as usize + 1);
            for ix in 0..=ws {
                let u = ix as f32 / ws as f32;
                mesh.positions.push(sphere_point(radius, u, v));
                mesh.uvs.push(Vec2::new(u + u_offset, 1.0 - v));
                row.push(index);
                index += 1;
            }
            grid.push(row);
        }

        for iy in 0..hs as usize {
            for ix in 0..ws as usize {
                let a = grid[iy][ix + 1];
                let b = grid[iy][ix];
                let c = grid[iy + 1][ix];
                let d = grid[iy + 1][ix + 1];
                if iy != 0 {
                    mesh.indices.extend_from_slice(&[a, b, d]);
                }
                if iy != hs as usize - 1 {
                    mesh.indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Ok(mesh)
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
