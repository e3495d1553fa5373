//! Anchor sets: the fixed proximity targets of the circle pattern.

use std::sync::Arc;

use glam::{Affine3A, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::SketchError;
use crate::Result;

/// Coordinate space a set of points is expressed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateSpace {
    /// Local space of the shaded mesh, before instance placement.
    #[default]
    Object,
    /// Scene space, after instance placement.
    World,
}

/// Ordered, non-empty, immutable set of anchor points.
///
/// Cloning shares the underlying storage; the points are never mutated after
/// sampling.
#[derive(Clone, Debug, PartialEq)]
pub struct AnchorSet {
    points: Arc<[Vec3]>,
    space: CoordinateSpace,
}

impl AnchorSet {
    /// Freeze a copy of `points`. Empty input is rejected.
    pub fn from_points(points: &[Vec3], space: CoordinateSpace) -> Result<Self> {
        if points.is_empty() {
            return Err(SketchError::InvalidGeometry(
                "base shape has no vertices".to_string(),
            ));
        }
        Ok(Self {
            points: Arc::from(points),
            space,
        })
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn space(&self) -> CoordinateSpace {
        self.space
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Distance from `position` to the closest anchor.
    ///
    /// Only the value is reported; which anchor produced it is irrelevant.
    #[inline]
    pub fn nearest_distance(&self, position: Vec3) -> f32 {
        debug_assert!(!self.points.is_empty(), "anchor set must not be empty");
        self.points
            .iter()
            .fold(f32::INFINITY, |best, a| best.min(position.distance(*a)))
    }
}

/// Turns base-shape vertex buffers into [`AnchorSet`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnchorSampler {
    space: CoordinateSpace,
}

impl AnchorSampler {
    /// Sampler that tags its output with `space`.
    pub fn new(space: CoordinateSpace) -> Self {
        Self { space }
    }

    /// One anchor per vertex, same order, values copied.
    ///
    /// No deduplication: a non-indexed buffer that repeats shared corners
    /// yields repeated anchors.
    pub fn sample(&self, vertices: &[Vec3]) -> Result<AnchorSet> {
        AnchorSet::from_points(vertices, self.space)
    }

    /// Like [`sample`](Self::sample), for a flat `xyz xyz ...` attribute.
    pub fn sample_flat(&self, positions: &[f32]) -> Result<AnchorSet> {
        if positions.is_empty() || positions.len() % 3 != 0 {
            return Err(SketchError::InvalidGeometry(format!(
                "position attribute length {} is not a positive multiple of 3",
                positions.len()
            )));
        }
        let vertices: Vec<Vec3> = positions
            .chunks_exact(3)
            .map(|c| Vec3::new(c[0], c[1], c[2]))
            .collect();
        self.sample(&vertices)
    }

    /// Project `vertices` through `transform` before freezing them, tagging
    /// the result with `space` (the space `transform` maps into).
    pub fn sample_transformed(
        &self,
        vertices: &[Vec3],
        transform: &Affine3A,
        space: CoordinateSpace,
    ) -> Result<AnchorSet> {
        let projected: Vec<Vec3> = vertices
            .iter()
            .map(|v| transform.transform_point3(*v))
            .collect();
        AnchorSet::from_points(&projected, space)
    }
}
