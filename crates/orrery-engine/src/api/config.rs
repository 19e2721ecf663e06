use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::preset;
use crate::api::types::{BodyKind, Shading};
use crate::error::{ConfigError, SceneError};

/// How orbiting bodies advance their world matrix each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevolutionMode {
    /// Track spin and revolution angles for every body and rebuild each
    /// world matrix from angle + offset + scale. No drift over long runs.
    #[default]
    Rebuild,
    /// Bodies orbiting a root compound a fresh rotation step into their
    /// existing matrix (`world = step * world * spin`). Bodies orbiting a
    /// moving parent are still rebuilt from their angle.
    Compound,
}

/// Static description of one celestial body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    /// Unique name, also used to resolve `parent` references.
    pub name: String,
    pub kind: BodyKind,
    /// Name of the body this one orbits. `None` for roots (the sun).
    #[serde(default)]
    pub parent: Option<String>,
    /// Placement relative to the parent at angle zero. Its length is the orbit radius.
    #[serde(default)]
    pub orbit_offset: [f32; 3],
    /// Uniform scale applied to the shared unit sphere mesh.
    pub scale: f32,
    /// Self-rotation about local +Y, degrees per second.
    #[serde(default)]
    pub spin_rate: f32,
    /// Revolution about the parent's +Y, degrees per second.
    #[serde(default)]
    pub revolution_rate: f32,
    /// Material (texture) name handed to the renderer.
    pub material: String,
    #[serde(default = "default_shading")]
    pub shading: Shading,
}

fn default_shading() -> Shading {
    Shading::Lit
}

impl BodyConfig {
    pub fn new(name: impl Into<String>, kind: BodyKind, scale: f32) -> Self {
        let name = name.into();
        Self {
            material: name.clone(),
            name,
            kind,
            parent: None,
            orbit_offset: [0.0; 3],
            scale,
            spin_rate: 0.0,
            revolution_rate: 0.0,
            shading: Shading::Lit,
        }
    }

    // -- Builder pattern --

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.orbit_offset = offset.to_array();
        self
    }

    pub fn with_spin(mut self, degrees_per_sec: f32) -> Self {
        self.spin_rate = degrees_per_sec;
        self
    }

    pub fn with_revolution(mut self, degrees_per_sec: f32) -> Self {
        self.revolution_rate = degrees_per_sec;
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = material.into();
        self
    }

    pub fn with_shading(mut self, shading: Shading) -> Self {
        self.shading = shading;
        self
    }

    pub fn offset(&self) -> Vec3 {
        Vec3::from_array(self.orbit_offset)
    }
}

/// Pitch is held this far (radians) inside the configured limit so it never
/// reaches the limit itself.
pub const PITCH_MARGIN_RAD: f32 = 1e-3;

/// Orbit camera tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting distance from the target.
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Starting yaw in degrees (0 = camera on +Z).
    pub yaw_deg: f32,
    /// Starting pitch in degrees (positive = above the orbital plane).
    pub pitch_deg: f32,
    /// Pitch is kept strictly inside (-limit, limit).
    pub pitch_limit_deg: f32,
    /// Radians of yaw/pitch per pixel of drag.
    pub sensitivity: f32,
    /// World units of distance per unit of scroll.
    pub zoom_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 30.0,
            min_distance: 2.0,
            max_distance: 90.0,
            yaw_deg: 0.0,
            pitch_deg: 20.0,
            pitch_limit_deg: 89.0,
            sensitivity: 0.005,
            zoom_sensitivity: 0.02,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), SceneError> {
        let fields = [
            self.distance,
            self.min_distance,
            self.max_distance,
            self.yaw_deg,
            self.pitch_deg,
            self.pitch_limit_deg,
            self.sensitivity,
            self.zoom_sensitivity,
        ];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err(SceneError::InvalidCamera("all values must be finite"));
        }
        if self.min_distance <= 0.0 {
            return Err(SceneError::InvalidCamera("min_distance must be > 0"));
        }
        if self.max_distance < self.min_distance {
            return Err(SceneError::InvalidCamera("max_distance must be >= min_distance"));
        }
        if self.pitch_limit_deg > 89.0 || self.pitch_limit_deg.to_radians() <= PITCH_MARGIN_RAD {
            return Err(SceneError::InvalidCamera(
                "pitch_limit_deg must be above the clamp margin and at most 89",
            ));
        }
        Ok(())
    }
}

/// Perspective projection parameters. Aspect is updated on resize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    /// Initial width / height, before the host reports a canvas size.
    pub aspect: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_deg: 45.0,
            near: 0.1,
            far: 1000.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl ProjectionConfig {
    pub fn validate(&self) -> Result<(), SceneError> {
        if !(self.fov_deg > 0.0 && self.fov_deg < 180.0) {
            return Err(SceneError::InvalidProjection("fov_deg must be in (0, 180)"));
        }
        if !(self.near > 0.0 && self.far > self.near && self.far.is_finite()) {
            return Err(SceneError::InvalidProjection("need 0 < near < far"));
        }
        if !(self.aspect > 0.0 && self.aspect.is_finite()) {
            return Err(SceneError::InvalidProjection("aspect must be > 0"));
        }
        Ok(())
    }
}

/// Complete scene description. `Default` is the solar system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Bodies in declaration order (also the draw order).
    pub bodies: Vec<BodyConfig>,
    pub camera: CameraConfig,
    pub projection: ProjectionConfig,
    /// Half-size of the skybox cube.
    pub skybox_distance: f32,
    pub revolution_mode: RevolutionMode,
    /// Optional cap on the delta time fed to the bodies in one tick, in
    /// seconds. `None` (the default) applies every host delta as given.
    pub max_frame_dt: Option<f32>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            bodies: preset::solar_system_bodies(),
            camera: CameraConfig::default(),
            projection: ProjectionConfig::default(),
            skybox_distance: preset::SKYBOX_DISTANCE,
            revolution_mode: RevolutionMode::default(),
            max_frame_dt: None,
        }
    }
}

impl SceneConfig {
    /// A config with the given bodies and default everything else.
    pub fn with_bodies(bodies: Vec<BodyConfig>) -> Self {
        Self {
            bodies,
            ..Self::default()
        }
    }

    /// Check the scene-wide tuning values that have no struct of their own.
    pub fn validate(&self) -> Result<(), SceneError> {
        let d = self.skybox_distance;
        if !(d.is_finite() && d > 0.0) {
            return Err(SceneError::InvalidSkybox(d));
        }
        if let Some(max) = self.max_frame_dt {
            if !(max.is_finite() && max > 0.0) {
                return Err(SceneError::InvalidFrameCap(max));
            }
        }
        Ok(())
    }

    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::ParseError)
    }
}
