use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::renderer::skybox::SkyboxFace;

/// Every file the scene needs before it can start running.
/// Loaded from JSON, or `solar_system()` for the stock scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Shared unit sphere mesh used by every body.
    pub sphere_mesh: String,
    /// Shader sources keyed by role (e.g. "phong_vs", "sun_fs").
    #[serde(default)]
    pub shaders: BTreeMap<String, String>,
    /// Texture path per material name. Skybox faces are materials too.
    #[serde(default)]
    pub textures: BTreeMap<String, String>,
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The stock solar-system file list.
    pub fn solar_system() -> Self {
        let shaders = [
            ("phong_vs", "./shaders/phong.vs.glsl"),
            ("phong_fs", "./shaders/phong.pointlit.fs.glsl"),
            ("sun_vs", "./shaders/sun.vs.glsl"),
            ("sun_fs", "./shaders/sun.fs.glsl"),
        ];
        let mut textures: BTreeMap<String, String> = [
            ("sun", "./data/sun.jpg"),
            ("mercury", "./data/mercury.jpg"),
            ("venus_atmosphere", "./data/venusAt.jpg"),
            ("earth", "./data/earth.jpg"),
            ("moon", "./data/moon.png"),
            ("mars", "./data/mars.jpg"),
            ("jupiter", "./data/jupiter.jpg"),
            ("saturn", "./data/saturn.jpg"),
            ("uranus", "./data/uranus.jpg"),
            ("neptune", "./data/neptune.jpg"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        for face in SkyboxFace::ALL {
            let image = match face {
                SkyboxFace::NegativeX => "NegativeX",
                SkyboxFace::PositiveX => "PositiveX",
                SkyboxFace::NegativeY => "NegativeY",
                SkyboxFace::PositiveY => "PositiveY",
                SkyboxFace::NegativeZ => "NegativeZ",
                SkyboxFace::PositiveZ => "PositiveZ",
            };
            textures.insert(
                face.material_name().to_string(),
                format!("./data/GalaxyTex_{image}.png"),
            );
        }

        Self {
            sphere_mesh: "./data/sphere.json".to_string(),
            shaders: shaders
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            textures,
        }
    }

    /// Every key the host must report ready: the mesh, each shader and
    /// each texture, in a stable order.
    pub fn required_keys(&self) -> Vec<String> {
        let mut keys = Vec::with_capacity(1 + self.shaders.len() + self.textures.len());
        keys.push(self.sphere_mesh.clone());
        keys.extend(self.shaders.values().cloned());
        keys.extend(self.textures.values().cloned());
        keys.sort();
        keys.dedup();
        keys
    }
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self::solar_system()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solar_system_lists_every_file() {
        let manifest = AssetManifest::solar_system();
        assert_eq!(manifest.shaders.len(), 4);
        // 10 bodies + 6 skybox faces
        assert_eq!(manifest.textures.len(), 16);
        assert_eq!(manifest.required_keys().len(), 21);
        assert_eq!(manifest.textures["venus_atmosphere"], "./data/venusAt.jpg");
        assert_eq!(
            manifest.textures[SkyboxFace::NegativeY.material_name()],
            "./data/GalaxyTex_NegativeY.png"
        );
    }

    #[test]
    fn parse_minimal_manifest() {
        let json = r#"{
            "sphere_mesh": "sphere.json",
            "textures": { "sun": "sun.jpg" }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert!(manifest.shaders.is_empty());
        assert_eq!(manifest.required_keys(), vec!["sphere.json", "sun.jpg"]);
        assert!(manifest.textures.contains_key("sun"));
    }

    #[test]
    fn missing_mesh_is_an_error() {
        assert!(AssetManifest::from_json("{}").is_err());
    }
}
