use crate::error::Mismatch;
use crate::instance::InstanceParameters;
use crate::Result;

/// One anchor as laid out in a uniform array: vec3 padded to 16 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuAnchor {
    pub position: [f32; 3], // 12 bytes
    pub _pad: f32,          //  4 bytes
}

/// Scalar uniforms of one instance: 32 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuInstance {
    pub color: [f32; 3],  // 12 bytes
    pub time: f32,        //  4 bytes
    pub offset: [f32; 3], // 12 bytes
    pub point_count: u32, //  4 bytes
}

/// Uniform data for a program compiled with a fixed `POINT_COUNT`.
#[derive(Clone, Debug, PartialEq)]
pub struct InstanceUniforms {
    header: GpuInstance,
    points: Vec<GpuAnchor>,
}

impl InstanceUniforms {
    /// Pack `params` for a program expecting exactly `point_count` anchors.
    pub fn pack(params: &InstanceParameters, point_count: usize) -> Result<Self> {
        let anchors = params.anchors();
        if anchors.len() != point_count {
            return Err(Mismatch::PointCount {
                expected: point_count,
                actual: anchors.len(),
            }
            .into());
        }

        let points = anchors
            .points()
            .iter()
            .map(|p| GpuAnchor {
                position: p.to_array(),
                _pad: 0.0,
            })
            .collect();

        Ok(Self {
            header: GpuInstance {
                color: params.base_color().to_array(),
                time: params.time(),
                offset: params.offset().to_array(),
                point_count: point_count as u32,
            },
            points,
        })
    }

    /// Refresh the per-frame part from an advanced instance.
    pub fn sync_time(&mut self, params: &InstanceParameters) {
        self.header.time = params.time();
    }

    pub fn header(&self) -> &GpuInstance {
        &self.header
    }

    pub fn points(&self) -> &[GpuAnchor] {
        &self.points
    }

    pub fn header_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.header)
    }

    pub fn point_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }
}
