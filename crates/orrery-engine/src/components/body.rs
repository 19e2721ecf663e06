use glam::{Mat4, Vec3};

use crate::api::types::{BodyId, BodyKind, MaterialId, Shading};
use crate::math;

/// A sun, planet or moon. Static parameters are fixed at scene setup;
/// the angles and the world matrix change every tick.
#[derive(Debug, Clone)]
pub struct CelestialBody {
    pub id: BodyId,
    pub name: String,
    pub kind: BodyKind,
    /// Lookup only; the scene owns every body.
    pub parent: Option<BodyId>,
    /// Placement relative to the parent at revolution angle zero.
    pub orbit_offset: Vec3,
    pub scale: f32,
    /// Degrees per second about local +Y.
    pub spin_rate: f32,
    /// Degrees per second about the parent's +Y.
    pub revolution_rate: f32,
    /// Accumulated self-rotation in degrees, wrapped to [0, 360).
    pub spin_angle: f32,
    /// Accumulated revolution in degrees, wrapped to [0, 360).
    pub revolution_angle: f32,
    pub material: MaterialId,
    pub shading: Shading,
    world: Mat4,
}

impl CelestialBody {
    pub fn new(id: BodyId, name: impl Into<String>, kind: BodyKind, scale: f32) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            parent: None,
            orbit_offset: Vec3::ZERO,
            scale,
            spin_rate: 0.0,
            revolution_rate: 0.0,
            spin_angle: 0.0,
            revolution_angle: 0.0,
            material: MaterialId::default(),
            shading: Shading::Lit,
            world: math::scale_uniform(scale),
        }
    }

    // -- Builder pattern --

    pub fn with_parent(mut self, parent: BodyId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.orbit_offset = offset;
        self
    }

    pub fn with_rates(mut self, spin_rate: f32, revolution_rate: f32) -> Self {
        self.spin_rate = spin_rate;
        self.revolution_rate = revolution_rate;
        self
    }

    pub fn with_material(mut self, material: MaterialId, shading: Shading) -> Self {
        self.material = material;
        self.shading = shading;
        self
    }

    /// Current world matrix.
    #[inline]
    pub fn world(&self) -> &Mat4 {
        &self.world
    }

    /// Replace the world matrix. Only the orbit system calls this.
    #[inline]
    pub(crate) fn set_world(&mut self, world: Mat4) {
        self.world = world;
    }

    /// World-space position (translation column of the world matrix).
    #[inline]
    pub fn position(&self) -> Vec3 {
        math::translation_of(&self.world)
    }

    /// Distance from the parent at rest. Zero for roots.
    pub fn orbit_radius(&self) -> f32 {
        self.orbit_offset.length()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
