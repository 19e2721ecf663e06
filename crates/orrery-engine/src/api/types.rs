use serde::{Deserialize, Serialize};

/// Index of a body in the scene's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

impl BodyId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Dense material handle resolved from a material name at scene setup.
/// The renderer maps it to a texture + shader pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MaterialId(pub u32);

/// What kind of body this is. Purely descriptive; the transform rules
/// only look at the parent links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    Star,
    Planet,
    Moon,
}

/// Which shader family draws a given item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u32)]
pub enum Shading {
    /// Self-lit (the sun).
    Emissive = 0,
    /// Point-lit by the star (planets, moons, skybox faces).
    Lit = 1,
}

impl Shading {
    /// Wire value written into the frame buffer.
    pub fn as_f32(self) -> f32 {
        self as u32 as f32
    }
}
