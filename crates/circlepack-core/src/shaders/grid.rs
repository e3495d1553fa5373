//! Circles on a UV grid, the pattern the sketches started from before
//! anchors were taken from an icosahedron.
//!
//! The surface UV is tiled into cells; every cell holds one disk centred in
//! the cell whose radius is jittered by noise sampled at the cell index and
//! the elapsed time. Disks are punched out in the background color.

use glam::{Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::instance::InstanceParameters;
use crate::math::{fract2, mix3, step};
use crate::noise::{NoiseField, Simplex3};
use crate::shaders::{FragmentInput, FragmentShader};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Cells along u and v.
    pub cells: [f32; 2],
    /// Disk radius before jitter, in cell units.
    pub radius: f32,
    /// Noise amplitude added to the radius.
    pub jitter: f32,
    pub alpha: f32,
    pub background: [f32; 3],
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cells: [20.0, 10.0],
            radius: 0.25,
            jitter: 0.25,
            alpha: 0.8,
            background: [1.0, 1.0, 1.0],
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CellGridShader<N = Simplex3> {
    noise: N,
    config: GridConfig,
}

impl CellGridShader<Simplex3> {
    pub fn new(config: GridConfig) -> Self {
        Self {
            noise: Simplex3,
            config,
        }
    }
}

impl<N: NoiseField> CellGridShader<N> {
    pub fn with_noise(noise: N, config: GridConfig) -> Self {
        Self { noise, config }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Integer cell coordinates containing `uv`.
    #[inline]
    pub fn cell(&self, uv: Vec2) -> Vec2 {
        (uv * Vec2::from_array(self.config.cells)).floor()
    }

    /// Jittered disk radius of `cell` at `time`.
    #[inline]
    pub fn cell_radius(&self, cell: Vec2, time: f32) -> f32 {
        self.config.radius + self.noise.sample(cell.extend(time)) * self.config.jitter
    }

    /// `1.0` inside the cell's disk, `0.0` outside.
    pub fn mask(&self, uv: Vec2, time: f32) -> f32 {
        let q = uv * Vec2::from_array(self.config.cells);
        let local = fract2(q);
        let d = local.distance(Vec2::splat(0.5));
        1.0 - step(self.cell_radius(q.floor(), time), d)
    }

    pub fn shade(&self, uv: Vec2, color: Vec3, time: f32) -> Vec4 {
        let m = self.mask(uv, time);
        mix3(color, Vec3::from_array(self.config.background), m).extend(self.config.alpha)
    }
}

impl<N: NoiseField> FragmentShader for CellGridShader<N> {
    fn fragment(&self, fragment: &FragmentInput, params: &InstanceParameters) -> Vec4 {
        self.shade(fragment.uv, params.base_color(), params.time())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::FnNoise;

    #[test]
    fn test_cell_index() {
        let shader = CellGridShader::new(GridConfig::default());
        assert_eq!(shader.cell(Vec2::new(0.0, 0.0)), Vec2::ZERO);
        assert_eq!(shader.cell(Vec2::new(0.51, 0.95)), Vec2::new(10.0, 9.0));
    }

    #[test]
    fn test_flat_noise_gives_fixed_disks() {
        let shader = CellGridShader::with_noise(FnNoise(|_: Vec3| 0.0_f32), GridConfig::default());
        let color = Vec3::new(1.0, 0.0, 1.0);
        // Centre of cell (0, 0) is inside its disk
        let centre = Vec2::new(0.5 / 20.0, 0.5 / 10.0);
        assert_eq!(shader.shade(centre, color, 0.0), Vec4::new(1.0, 1.0, 1.0, 0.8));
        // Near the cell corner, ~0.69 from the centre, well outside r = 0.25
        let corner = Vec2::new(0.01 / 20.0, 0.01 / 10.0);
        assert_eq!(shader.shade(corner, color, 0.0), color.extend(0.8));
    }

    #[test]
    fn test_radius_tracks_noise() {
        let shader = CellGridShader::with_noise(FnNoise(|p: Vec3| p.z), GridConfig::default());
        assert_eq!(shader.cell_radius(Vec2::ZERO, 1.0), 0.5);
        assert_eq!(shader.cell_radius(Vec2::ZERO, -1.0), 0.0);
    }
}
