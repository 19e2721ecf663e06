use glam::{Mat4, Vec3};

use crate::math;

/// One side of the skybox cube, named after the cube-map image it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkyboxFace {
    NegativeY,
    PositiveY,
    NegativeX,
    PositiveX,
    PositiveZ,
    NegativeZ,
}

impl SkyboxFace {
    /// Draw order: bottom, top, left, right, back, front.
    pub const ALL: [SkyboxFace; 6] = [
        SkyboxFace::NegativeY,
        SkyboxFace::PositiveY,
        SkyboxFace::NegativeX,
        SkyboxFace::PositiveX,
        SkyboxFace::PositiveZ,
        SkyboxFace::NegativeZ,
    ];

    /// Material name the face is registered under.
    pub fn material_name(self) -> &'static str {
        match self {
            SkyboxFace::NegativeY => "skybox_negative_y",
            SkyboxFace::PositiveY => "skybox_positive_y",
            SkyboxFace::NegativeX => "skybox_negative_x",
            SkyboxFace::PositiveX => "skybox_positive_x",
            SkyboxFace::PositiveZ => "skybox_positive_z",
            SkyboxFace::NegativeZ => "skybox_negative_z",
        }
    }

    /// Placement of a unit quad for this face at distance `d`:
    /// `translate * rotate * scale(d)`.
    pub fn world_matrix(self, d: f32) -> Mat4 {
        let (offset, rotation) = match self {
            SkyboxFace::NegativeY => (Vec3::new(0.0, -d, 0.0), math::rotation_x(-90.0)),
            SkyboxFace::PositiveY => (Vec3::new(0.0, d, 0.0), math::rotation_x(90.0)),
            SkyboxFace::NegativeX => (Vec3::new(-d, 0.0, 0.0), math::rotation_y(90.0)),
            SkyboxFace::PositiveX => (Vec3::new(d, 0.0, 0.0), math::rotation_y(-90.0)),
            // The back quad faces the origin as authored
            SkyboxFace::PositiveZ => (Vec3::new(0.0, 0.0, -d), math::identity()),
            SkyboxFace::NegativeZ => (Vec3::new(0.0, 0.0, d), math::rotation_y(180.0)),
        };
        math::translation(offset) * rotation * math::scale_uniform(d)
    }
}

/// The six static background quads. Built once per scene.
#[derive(Debug, Clone)]
pub struct Skybox {
    distance: f32,
    faces: [(SkyboxFace, Mat4); 6],
}

impl Skybox {
    pub fn new(distance: f32) -> Self {
        let faces = SkyboxFace::ALL.map(|face| (face, face.world_matrix(distance)));
        Self { distance, faces }
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Faces in draw order with their world matrices.
    pub fn faces(&self) -> &[(SkyboxFace, Mat4); 6] {
        &self.faces
    }
}
