use glam::Vec3;

use crate::anchor::AnchorSet;
use crate::error::{Mismatch, SketchError};
use crate::Result;

/// Per-instance state read by the shaders.
///
/// Everything but the elapsed time is fixed at construction. Time moves
/// forward once per frame through [`advance`](Self::advance), which also
/// bumps the frame generation used to detect stale parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct InstanceParameters {
    anchors: AnchorSet,
    base_color: Vec3,
    /// Placement of the instance. Never applied to the anchors.
    offset: Vec3,
    time: f32,
    generation: u64,
}

impl InstanceParameters {
    pub fn new(anchors: AnchorSet, base_color: Vec3, offset: Vec3) -> Result<Self> {
        if anchors.is_empty() {
            return Err(Mismatch::EmptyAnchorSet.into());
        }
        log::debug!(
            "instance: {} anchors, color {:?}, offset {:?}",
            anchors.len(),
            base_color,
            offset
        );
        Ok(Self {
            anchors,
            base_color,
            offset,
            time: 0.0,
            generation: 0,
        })
    }

    pub fn anchors(&self) -> &AnchorSet {
        &self.anchors
    }

    pub fn base_color(&self) -> Vec3 {
        self.base_color
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    /// Elapsed time in seconds as of the last [`advance`](Self::advance).
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Number of frames this instance has been advanced through.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Set the elapsed time for a new frame.
    ///
    /// Time must not go backwards: a smaller value is rejected and the
    /// instance keeps its previous state. Use [`restart`](Self::restart) to
    /// rewind a looping animation.
    pub fn advance(&mut self, time: f32) -> Result<()> {
        if !time.is_finite() || time < self.time {
            return Err(SketchError::NonMonotonicTime {
                previous: self.time,
                requested: time,
            });
        }
        self.time = time;
        self.generation += 1;
        Ok(())
    }

    /// Rewind elapsed time to zero. The generation keeps counting.
    pub fn restart(&mut self) {
        self.time = 0.0;
        self.generation += 1;
    }

    /// Check that the instance was advanced for `frame`.
    pub fn ensure_frame(&self, frame: u64) -> Result<()> {
        if self.generation != frame {
            return Err(SketchError::StaleParameterUse {
                instance_frame: self.generation,
                frame,
            });
        }
        Ok(())
    }
}
