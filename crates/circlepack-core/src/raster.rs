//! CPU fallback raster.
//!
//! Evaluates a fragment shader over the sphere's `(u, v)` parameterization,
//! one fragment per pixel, into an RGBA8 framebuffer. Rows are independent,
//! so with the `parallel` feature they are shaded on the rayon pool.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use glam::{Vec2, Vec3, Vec4};

use crate::error::SketchError;
use crate::geometry::sphere_point;
use crate::host::{RenderHost, Viewport};
use crate::instance::InstanceParameters;
use crate::noise::NoiseField;
use crate::shaders::{FragmentInput, FragmentShader};
use crate::sketch::Sketch;
use crate::Result;

/// Clear color of every sketch: opaque white.
pub const CLEAR_COLOR: [u8; 4] = [255, 255, 255, 255];

#[derive(Clone, Debug, PartialEq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![CLEAR_COLOR; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reallocate for a new size; contents are cleared.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![CLEAR_COLOR; width as usize * height as usize];
    }

    pub fn clear(&mut self, color: [u8; 4]) {
        self.pixels.fill(color);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Tightly packed RGBA8 bytes, row-major from the top-left.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Copy `src` with its top-left corner at `(x0, y0)`, clipped.
    pub fn blit(&mut self, src: &Framebuffer, x0: u32, y0: u32) {
        let w = src.width.min(self.width.saturating_sub(x0)) as usize;
        let h = src.height.min(self.height.saturating_sub(y0));
        if w == 0 || h == 0 {
            return;
        }
        for y in 0..h {
            let src_start = (y * src.width) as usize;
            let dst_start = ((y0 + y) * self.width + x0) as usize;
            self.pixels[dst_start..dst_start + w]
                .copy_from_slice(&src.pixels[src_start..src_start + w]);
        }
    }
}

/// Quantize a linear `[0, 1]` RGBA color to 8 bits per channel.
#[inline]
pub fn to_rgba8(color: Vec4) -> [u8; 4] {
    let c = (color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).round();
    [c.x as u8, c.y as u8, c.z as u8, c.w as u8]
}

/// Fragment at pixel `(x, y)` of a `width x height` unwrap of a sphere of
/// `radius` centred on `center`.
#[inline]
pub fn fragment_at(
    center: Vec3,
    radius: f32,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> FragmentInput {
    let u = (x as f32 + 0.5) / width as f32;
    let v = (y as f32 + 0.5) / height as f32;
    FragmentInput::new(center + sphere_point(radius, u, v), Vec2::new(u, 1.0 - v))
}

/// Shade every pixel of a sphere unwrap with `shader` for one instance.
///
/// `center` places the sphere in the space the shader expects fragment
/// positions in: zero for object space, the instance offset for world space.
pub fn render_fragments<S: FragmentShader>(
    shader: &S,
    params: &InstanceParameters,
    center: Vec3,
    radius: f32,
    width: u32,
    height: u32,
) -> Framebuffer {
    let mut fb = Framebuffer::new(width, height);
    if width == 0 || height == 0 {
        return fb;
    }

    let shade_row = |y: usize, row: &mut [[u8; 4]]| {
        for (x, px) in row.iter_mut().enumerate() {
            let frag = fragment_at(center, radius, x as u32, y as u32, width, height);
            *px = to_rgba8(shader.fragment(&frag, params));
        }
    };

    #[cfg(feature = "parallel")]
    {
        fb.pixels
            .par_chunks_mut(width as usize)
            .enumerate()
            .for_each(|(y, row)| shade_row(y, row));
    }

    #[cfg(not(feature = "parallel"))]
    {
        fb.pixels
            .chunks_mut(width as usize)
            .enumerate()
            .for_each(|(y, row)| shade_row(y, row));
    }

    fb
}

/// Host that rasterizes on the CPU: one tile per instance, side by side.
#[derive(Debug, Default)]
pub struct SoftwareHost {
    framebuffer: Option<Framebuffer>,
    frames_presented: u64,
    disposed: bool,
}

impl SoftwareHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last presented image, `None` before the first resize or after dispose.
    pub fn framebuffer(&self) -> Option<&Framebuffer> {
        self.framebuffer.as_ref()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl RenderHost for SoftwareHost {
    fn resize(&mut self, viewport: Viewport) {
        let (w, h) = viewport.physical_size();
        match self.framebuffer.as_mut() {
            Some(fb) => fb.resize(w, h),
            None => self.framebuffer = Some(Framebuffer::new(w, h)),
        }
    }

    fn present<N: NoiseField>(&mut self, sketch: &Sketch<N>) -> Result<()> {
        let Some(fb) = self.framebuffer.as_mut() else {
            return Ok(());
        };
        fb.clear(CLEAR_COLOR);

        let count = sketch.instances().len() as u32;
        if count == 0 || fb.width() < count || fb.height() == 0 {
            return Err(SketchError::ViewportTooSmall {
                width: fb.width(),
                instances: sketch.instances().len(),
            });
        }
        let tile_w = fb.width() / count;
        let tile_h = fb.height();
        for index in 0..sketch.instances().len() {
            let tile = sketch.render_instance(index, tile_w, tile_h)?;
            fb.blit(&tile, index as u32 * tile_w, 0);
        }
        self.frames_presented += 1;
        Ok(())
    }

    fn dispose(&mut self) {
        self.framebuffer = None;
        self.disposed = true;
    }
}
