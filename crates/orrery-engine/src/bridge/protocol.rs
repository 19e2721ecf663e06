/// Flat frame buffer layout shared with the JavaScript renderer.
/// Must stay in sync with the host's `protocol.js`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [View matrix: 16 floats, column-major]
/// [Projection matrix: 16 floats, column-major]
/// [Draws: max_draws × 20 floats]
/// ```
///
/// Capacities are written into the header on every frame.
/// The host reads them from the header to compute offsets.

use glam::Mat4;

use crate::renderer::frame::Frame;
use crate::renderer::instance::{DrawBuffer, DrawInstance};
use crate::renderer::skybox::SkyboxFace;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_DRAWS: usize = 2;
pub const HEADER_DRAW_COUNT: usize = 3;
pub const HEADER_SKYBOX_COUNT: usize = 4;
pub const HEADER_CAMERA_X: usize = 5;
pub const HEADER_CAMERA_Y: usize = 6;
pub const HEADER_CAMERA_Z: usize = 7;
pub const HEADER_LIGHT_X: usize = 8;
pub const HEADER_LIGHT_Y: usize = 9;
pub const HEADER_LIGHT_Z: usize = 10;
pub const HEADER_RUNNING: usize = 11;
pub const HEADER_ELAPSED: usize = 12;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per matrix section.
pub const MATRIX_FLOATS: usize = 16;

/// Floats per draw (wire format, never changes).
pub const DRAW_FLOATS: usize = DrawInstance::FLOATS;

/// Per-frame values written into the header besides the draws.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameHeader {
    pub frame_counter: u64,
    pub running: bool,
    pub elapsed: f64,
}

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum draws per frame.
    pub max_draws: usize,

    /// Offset (in floats) where the view matrix begins.
    pub view_offset: usize,
    /// Offset (in floats) where the projection matrix begins.
    pub projection_offset: usize,
    /// Offset (in floats) where draw data begins.
    pub draw_data_offset: usize,
    /// Size of the draw section in floats.
    pub draw_data_floats: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from a draw capacity.
    pub fn new(max_draws: usize) -> Self {
        let view_offset = HEADER_FLOATS;
        let projection_offset = view_offset + MATRIX_FLOATS;
        let draw_data_offset = projection_offset + MATRIX_FLOATS;
        let draw_data_floats = max_draws * DRAW_FLOATS;
        let buffer_total_floats = draw_data_offset + draw_data_floats;

        Self {
            max_draws,
            view_offset,
            projection_offset,
            draw_data_offset,
            draw_data_floats,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Room for the six skybox faces plus `body_count` bodies.
    pub fn for_bodies(body_count: usize) -> Self {
        Self::new(SkyboxFace::ALL.len() + body_count)
    }

    /// A zeroed buffer of the right size.
    pub fn allocate(&self) -> Vec<f32> {
        vec![0.0; self.buffer_total_floats]
    }

    /// Pack one frame into `out`. Draws past `max_draws` are dropped.
    /// Returns the number of draws written.
    pub fn write_frame(
        &self,
        out: &mut [f32],
        header: FrameHeader,
        frame: &Frame,
        draws: &DrawBuffer,
    ) -> usize {
        if out.len() < self.buffer_total_floats {
            log::warn!(
                "frame buffer too small: {} < {} floats",
                out.len(),
                self.buffer_total_floats
            );
            return 0;
        }

        let count = draws.instances.len().min(self.max_draws);
        if count < draws.instances.len() {
            log::warn!(
                "dropping {} draws over capacity {}",
                draws.instances.len() - count,
                self.max_draws
            );
        }

        out[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        out[HEADER_FRAME_COUNTER] = header.frame_counter as f32;
        out[HEADER_MAX_DRAWS] = self.max_draws as f32;
        out[HEADER_DRAW_COUNT] = count as f32;
        out[HEADER_SKYBOX_COUNT] = frame.skybox_count.min(count) as f32;
        out[HEADER_CAMERA_X..=HEADER_CAMERA_Z].copy_from_slice(&frame.camera_position.to_array());
        out[HEADER_LIGHT_X..=HEADER_LIGHT_Z].copy_from_slice(&frame.light_position.to_array());
        out[HEADER_RUNNING] = if header.running { 1.0 } else { 0.0 };
        out[HEADER_ELAPSED] = header.elapsed as f32;

        write_matrix(out, self.view_offset, &frame.view);
        write_matrix(out, self.projection_offset, &frame.projection);

        let floats: &[f32] = bytemuck::cast_slice(&draws.instances[..count]);
        out[self.draw_data_offset..self.draw_data_offset + floats.len()].copy_from_slice(floats);
        count
    }
}

fn write_matrix(out: &mut [f32], offset: usize, m: &Mat4) {
    out[offset..offset + MATRIX_FLOATS].copy_from_slice(&m.to_cols_array());
}
