use std::collections::{BTreeSet, HashMap};

use crate::api::types::MaterialId;
use crate::assets::manifest::AssetManifest;

/// Dense material ids keyed by name.
/// Ids are handed out in registration order starting at 0.
pub struct MaterialRegistry {
    ids: HashMap<String, MaterialId>,
    names: Vec<String>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
            names: Vec::new(),
        }
    }

    /// Id for `name`, assigning the next free id on first sight.
    pub fn register(&mut self, name: &str) -> MaterialId {
        if let Some(id) = self.ids.get(name) {
            return *id;
        }
        let id = MaterialId(self.names.len() as u32);
        self.ids.insert(name.to_string(), id);
        self.names.push(name.to_string());
        id
    }

    /// Look up a material by name. Returns None if not registered.
    pub fn get(&self, name: &str) -> Option<MaterialId> {
        self.ids.get(name).copied()
    }

    pub fn name(&self, id: MaterialId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for MaterialRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracks which manifest entries the host has finished loading.
pub struct LoadTracker {
    required: BTreeSet<String>,
    ready: BTreeSet<String>,
}

impl LoadTracker {
    pub fn new(manifest: &AssetManifest) -> Self {
        Self {
            required: manifest.required_keys().into_iter().collect(),
            ready: BTreeSet::new(),
        }
    }

    /// Record `key` as loaded. Returns false for keys the manifest never listed.
    pub fn mark_ready(&mut self, key: &str) -> bool {
        if !self.required.contains(key) {
            log::warn!("asset '{key}' reported ready but is not in the manifest");
            return false;
        }
        self.ready.insert(key.to_string());
        true
    }

    pub fn is_ready(&self, key: &str) -> bool {
        self.ready.contains(key)
    }

    /// True once every required key has been reported.
    pub fn is_complete(&self) -> bool {
        self.ready.len() == self.required.len()
    }

    /// Keys still outstanding, in sorted order.
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.required.difference(&self.ready).map(String::as_str)
    }

    pub fn ready_count(&self) -> usize {
        self.ready.len()
    }

    pub fn required_count(&self) -> usize {
        self.required.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_manifest() -> AssetManifest {
        AssetManifest::from_json(
            r#"{ "sphere_mesh": "sphere.json", "textures": { "sun": "sun.jpg", "earth": "earth.jpg" } }"#,
        )
        .unwrap()
    }

    #[test]
    fn registry_ids_follow_registration_order() {
        let mut reg = MaterialRegistry::new();
        assert!(reg.is_empty());
        assert_eq!(reg.register("sun"), MaterialId(0));
        assert_eq!(reg.register("earth"), MaterialId(1));
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.get("earth"), Some(MaterialId(1)));
        assert_eq!(reg.name(MaterialId(0)), Some("sun"));
        assert!(reg.get("pluto").is_none());
        assert!(reg.name(MaterialId(5)).is_none());
    }

    #[test]
    fn register_is_idempotent() {
        let mut reg = MaterialRegistry::new();
        let a = reg.register("moon");
        let b = reg.register("moon");
        assert_eq!(a, b);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn tracker_completes_after_all_keys() {
        let mut tracker = LoadTracker::new(&small_manifest());
        assert_eq!(tracker.required_count(), 3);
        assert!(tracker.mark_ready("sun.jpg"));
        assert!(tracker.mark_ready("sphere.json"));
        assert!(!tracker.is_complete());
        assert_eq!(tracker.pending().collect::<Vec<_>>(), vec!["earth.jpg"]);
        assert!(tracker.mark_ready("earth.jpg"));
        assert!(tracker.is_complete());
    }

    #[test]
    fn tracker_ignores_unknown_and_repeated_keys() {
        let mut tracker = LoadTracker::new(&small_manifest());
        assert!(!tracker.mark_ready("pluto.jpg"));
        assert!(tracker.mark_ready("sun.jpg"));
        assert!(tracker.mark_ready("sun.jpg"));
        assert_eq!(tracker.ready_count(), 1);
        assert!(!tracker.is_ready("pluto.jpg"));
    }
}
