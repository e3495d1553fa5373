//! Rendering-host seam and sketch lifecycle.
//!
//! The host (a WebGL canvas, a native window, the CPU raster) is handed to a
//! [`Session`] instead of being reached through any global. The session
//! drives frames, forwards resizes and disposes the host exactly once when
//! it is unloaded or dropped, after which no further frames are rendered.

use serde::{Deserialize, Serialize};

use crate::noise::{NoiseField, Simplex3};
use crate::sketch::Sketch;
use crate::Result;

/// Drawing surface size in CSS pixels plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    /// Size of the backing store in device pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        let ratio = if self.pixel_ratio > 0.0 { self.pixel_ratio } else { 1.0 };
        (
            (self.width as f32 * ratio).round() as u32,
            (self.height as f32 * ratio).round() as u32,
        )
    }

    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Everything a sketch needs from the surface it is drawn on.
///
/// Camera and orbit-controller state belong to the host and are released by
/// [`dispose`](Self::dispose).
pub trait RenderHost {
    fn resize(&mut self, viewport: Viewport);

    /// Draw one frame. Every instance of `sketch` has already been advanced.
    fn present<N: NoiseField>(&mut self, sketch: &Sketch<N>) -> Result<()>;

    /// Release renderer and controller resources.
    fn dispose(&mut self);
}

pub struct Session<H: RenderHost, N: NoiseField = Simplex3> {
    host: Option<H>,
    sketch: Sketch<N>,
    viewport: Viewport,
}

impl<H: RenderHost, N: NoiseField> Session<H, N> {
    pub fn new(mut host: H, sketch: Sketch<N>, viewport: Viewport) -> Self {
        host.resize(viewport);
        log::info!(
            "session started: {} instances, {}x{} @{}",
            sketch.instances().len(),
            viewport.width,
            viewport.height,
            viewport.pixel_ratio
        );
        Self {
            host: Some(host),
            sketch,
            viewport,
        }
    }

    pub fn sketch(&self) -> &Sketch<N> {
        &self.sketch
    }

    /// The host, until the session is unloaded.
    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_running(&self) -> bool {
        self.host.is_some()
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if let Some(host) = self.host.as_mut() {
            host.resize(viewport);
        }
    }

    /// Advance every instance to `time` and present the frame.
    ///
    /// Returns `Ok(false)` once the session has been unloaded: the caller
    /// should stop requesting animation frames.
    pub fn render(&mut self, time: f32) -> Result<bool> {
        let Some(host) = self.host.as_mut() else {
            return Ok(false);
        };
        if let Err(e) = self.sketch.advance(time) {
            log::warn!("frame at t={time} rejected: {e}");
            return Err(e);
        }
        if let Err(e) = host.present(&self.sketch) {
            log::warn!("frame at t={time} not presented: {e}");
            return Err(e);
        }
        Ok(true)
    }

    /// Dispose the host. Safe to call more than once.
    pub fn unload(&mut self) {
        if let Some(mut host) = self.host.take() {
            host.dispose();
            log::info!("session unloaded after {} frames", self.sketch.frame());
        }
    }
}

impl<H: RenderHost, N: NoiseField> Drop for Session<H, N> {
    fn drop(&mut self) {
        self.unload();
    }
}
