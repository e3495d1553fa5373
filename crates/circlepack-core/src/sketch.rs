//! A complete circle-packing scene: several sphere instances, each with its
//! own anchors, color and placement, shaded by one shared program.

use glam::{Affine3A, Vec3, Vec4};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::anchor::{AnchorSampler, CoordinateSpace};
use crate::config::SketchConfig;
use crate::error::SketchError;
use crate::geometry::{icosahedron, SurfaceMesh};
use crate::instance::InstanceParameters;
use crate::noise::{NoiseField, Simplex3};
use crate::palette::Palette;
use crate::raster::{render_fragments, Framebuffer};
use crate::shaders::proximity::ProximityMaskShader;
use crate::uniforms::InstanceUniforms;
use crate::Result;

pub struct Sketch<N = Simplex3> {
    config: SketchConfig,
    shader: ProximityMaskShader<N>,
    surface: SurfaceMesh,
    /// Anchors per instance, the `POINT_COUNT` of the GPU program.
    point_count: usize,
    instances: Vec<InstanceParameters>,
    frame: u64,
}

impl Sketch<Simplex3> {
    /// Build a sketch with the reference simplex noise.
    ///
    /// `seed` fixes the instance count and the color of every instance.
    pub fn new(config: SketchConfig, seed: u64) -> Result<Self> {
        Self::with_noise(Simplex3, config, seed)
    }
}

impl<N: NoiseField> Sketch<N> {
    pub fn with_noise(noise: N, config: SketchConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);

        let palette = if config.palette.is_empty() {
            Palette::riso()?
        } else {
            Palette::from_hex(config.palette.as_slice())?
        };
        let base = icosahedron(config.base_radius, config.base_detail)?;
        let surface = SurfaceMesh::sphere(
            config.surface_radius,
            config.width_segments,
            config.height_segments,
        )?;
        let shader = ProximityMaskShader::with_noise(noise, config.shader);

        let count = rng.random_range(config.min_instances..config.max_instances) as usize;
        let space = config.shader.fragment_space;
        let sampler = AnchorSampler::new(space);

        let mut instances = Vec::with_capacity(count);
        for i in 0..count {
            let offset = Vec3::X * (i as f32 * config.instance_spacing);
            // Anchors follow the instance only when fragments arrive placed
            let anchors = match space {
                CoordinateSpace::Object => sampler.sample(&base)?,
                CoordinateSpace::World => sampler.sample_transformed(
                    &base,
                    &Affine3A::from_translation(offset),
                    CoordinateSpace::World,
                )?,
            };
            let color = palette.pick(&mut rng);
            let params = InstanceParameters::new(anchors, color, offset)?;
            shader.validate(&params)?;
            instances.push(params);
        }

        log::info!(
            "sketch built: seed {seed}, {count} instances, {} anchors each",
            base.len()
        );

        Ok(Self {
            config,
            shader,
            surface,
            point_count: base.len(),
            instances,
            frame: 0,
        })
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    pub fn shader(&self) -> &ProximityMaskShader<N> {
        &self.shader
    }

    pub fn surface(&self) -> &SurfaceMesh {
        &self.surface
    }

    pub fn point_count(&self) -> usize {
        self.point_count
    }

    pub fn instances(&self) -> &[InstanceParameters] {
        &self.instances
    }

    pub fn instance(&self, index: usize) -> Result<&InstanceParameters> {
        self.instances
            .get(index)
            .ok_or(SketchError::UnknownInstance(index))
    }

    /// Direct access for hosts that drive instances themselves. Instances
    /// advanced this way fall out of step with [`frame`](Self::frame) and
    /// are reported as stale by the checked accessors.
    pub fn instance_mut(&mut self, index: usize) -> Result<&mut InstanceParameters> {
        self.instances
            .get_mut(index)
            .ok_or(SketchError::UnknownInstance(index))
    }

    /// Number of frames advanced so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Elapsed time of the current frame.
    pub fn time(&self) -> f32 {
        self.instances.first().map_or(0.0, InstanceParameters::time)
    }

    /// Start a new frame at `time` seconds.
    ///
    /// Either every instance moves to `time` or none does.
    pub fn advance(&mut self, time: f32) -> Result<()> {
        for params in &self.instances {
            if !time.is_finite() || time < params.time() {
                return Err(SketchError::NonMonotonicTime {
                    previous: params.time(),
                    requested: time,
                });
            }
        }
        for params in &mut self.instances {
            params.advance(time)?;
        }
        self.frame += 1;
        Ok(())
    }

    /// Rewind every instance to time zero, starting a new frame.
    pub fn restart(&mut self) {
        for params in &mut self.instances {
            params.restart();
        }
        self.frame += 1;
    }

    /// Instance `index`, checked against the current frame.
    pub fn current(&self, index: usize) -> Result<&InstanceParameters> {
        let params = self.instance(index)?;
        params.ensure_frame(self.frame)?;
        Ok(params)
    }

    /// Color of the fragment at `position` on instance `index`.
    pub fn shade(&self, index: usize, position: Vec3) -> Result<Vec4> {
        let params = self.current(index)?;
        Ok(self.shader.shade(position, params))
    }

    /// CPU-rasterize instance `index` as a `width x height` sphere unwrap.
    pub fn render_instance(&self, index: usize, width: u32, height: u32) -> Result<Framebuffer> {
        let params = self.current(index)?;
        let center = match self.config.shader.fragment_space {
            CoordinateSpace::Object => Vec3::ZERO,
            CoordinateSpace::World => params.offset(),
        };
        Ok(render_fragments(
            &self.shader,
            params,
            center,
            self.config.surface_radius,
            width,
            height,
        ))
    }

    /// GPU uniforms of instance `index` for a program compiled with
    /// [`point_count`](Self::point_count) anchors.
    pub fn uniforms(&self, index: usize) -> Result<InstanceUniforms> {
        InstanceUniforms::pack(self.instance(index)?, self.point_count)
    }
}
