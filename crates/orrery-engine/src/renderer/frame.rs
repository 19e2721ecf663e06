use glam::{Mat4, Vec3};

use crate::api::types::{MaterialId, Shading};

/// One thing to draw: a unit mesh placed by `world`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub world: Mat4,
    pub material: MaterialId,
    pub shading: Shading,
}

/// Everything a renderer needs for one tick.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Skybox faces first, then bodies in declaration order.
    pub draws: Vec<DrawItem>,
    pub view: Mat4,
    pub projection: Mat4,
    pub camera_position: Vec3,
    /// World position of the root star.
    pub light_position: Vec3,
    /// Number of leading skybox draws in `draws`.
    pub skybox_count: usize,
}

impl Frame {
    pub fn skybox_draws(&self) -> &[DrawItem] {
        &self.draws[..self.skybox_count]
    }

    pub fn body_draws(&self) -> &[DrawItem] {
        &self.draws[self.skybox_count..]
    }
}
