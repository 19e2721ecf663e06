use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::api::types::{MaterialId, Shading};

/// Per-draw data laid out for the JavaScript renderer.
/// Must match the host protocol: 20 floats = 80 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct DrawInstance {
    /// World matrix, column-major.
    pub world: [f32; 16],
    /// Dense material index (texture slot).
    pub material: f32,
    /// 0 = emissive, 1 = lit.
    pub shading: f32,
    pub _pad: [f32; 2],
}

impl DrawInstance {
    pub const FLOATS: usize = 20;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(world: &Mat4, material: MaterialId, shading: Shading) -> Self {
        Self {
            world: world.to_cols_array(),
            material: material.0 as f32,
            shading: shading.as_f32(),
            _pad: [0.0; 2],
        }
    }

    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_cols_array(&self.world)
    }
}

/// Draw buffer for one frame: skybox faces first, then bodies.
pub struct DrawBuffer {
    pub instances: Vec<DrawInstance>,
    /// Index of the first body draw. Instances before it are skybox faces.
    pub body_start: u32,
}

impl DrawBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(32),
            body_start: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.body_start = 0;
    }

    pub fn push(&mut self, instance: DrawInstance) {
        self.instances.push(instance);
    }

    /// Mark the current end of the buffer as the start of the body draws.
    pub fn mark_body_start(&mut self) {
        self.body_start = self.instances.len() as u32;
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// The whole buffer as one flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Raw pointer to instance data for zero-copy reads from JS.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for DrawBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn draw_instance_is_20_floats() {
        assert_eq!(std::mem::size_of::<DrawInstance>(), 80);
        assert_eq!(DrawInstance::FLOATS, 20);
    }

    #[test]
    fn draw_instance_keeps_matrix_layout() {
        let world = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let inst = DrawInstance::new(&world, MaterialId(4), Shading::Emissive);
        // Translation lives in the last column
        assert_eq!(&inst.world[12..15], &[1.0, 2.0, 3.0]);
        assert_eq!(inst.material, 4.0);
        assert_eq!(inst.shading, 0.0);
        assert_eq!(inst.world_matrix(), world);
    }

    #[test]
    fn draw_buffer_push_and_count() {
        let mut buf = DrawBuffer::new();
        buf.push(DrawInstance::default());
        buf.mark_body_start();
        buf.push(DrawInstance::default());
        assert_eq!(buf.instance_count(), 2);
        assert_eq!(buf.body_start, 1);
        assert_eq!(buf.as_floats().len(), 40);
        buf.clear();
        assert_eq!(buf.instance_count(), 0);
        assert_eq!(buf.body_start, 0);
    }
}
