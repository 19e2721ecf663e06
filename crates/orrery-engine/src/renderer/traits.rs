//! Renderer trait for native GPU backends.
//!
//! In the browser, drawing happens in JavaScript (WebGL) from the flat
//! buffer described by `bridge::protocol`. This trait is the Rust-side
//! contract for backends that consume the same data directly.

use glam::{Mat4, Vec3};

use super::frame::Frame;
use super::instance::DrawInstance;

/// Timing information from a draw call.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawTiming {
    /// Time spent submitting draw calls (microseconds)
    pub draw_us: u32,
}

/// Renderer trait for GPU backends.
///
/// ```ignore
/// struct GlRenderer { /* ... */ }
///
/// impl Renderer for GlRenderer {
///     fn backend(&self) -> &'static str { "webgl" }
///     fn draw(&mut self, frame: &FrameData) -> DrawTiming { /* ... */ }
///     fn resize(&mut self, width: u32, height: u32) { /* ... */ }
/// }
/// ```
pub trait Renderer {
    /// Backend identifier (e.g., "webgl", "wgpu")
    fn backend(&self) -> &'static str;

    /// Draw a complete frame.
    fn draw(&mut self, frame: &FrameData) -> DrawTiming;

    /// Handle a canvas resize.
    fn resize(&mut self, width: u32, height: u32);
}

/// Borrowed frame data in wire layout.
pub struct FrameData<'a> {
    /// Skybox faces first, then bodies.
    pub instances: &'a [DrawInstance],
    /// Number of leading skybox instances.
    pub skybox_count: usize,
    pub view: Mat4,
    pub projection: Mat4,
    pub camera_position: Vec3,
    pub light_position: Vec3,
}

impl<'a> FrameData<'a> {
    /// Pair a frame's matrices with its packed instances.
    pub fn new(frame: &Frame, instances: &'a [DrawInstance]) -> Self {
        Self {
            instances,
            skybox_count: frame.skybox_count,
            view: frame.view,
            projection: frame.projection,
            camera_position: frame.camera_position,
            light_position: frame.light_position,
        }
    }
}
