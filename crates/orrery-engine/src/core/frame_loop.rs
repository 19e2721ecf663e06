use crate::api::config::SceneConfig;
use crate::assets::manifest::AssetManifest;
use crate::assets::registry::LoadTracker;
use crate::core::scene::Scene;
use crate::error::SceneError;
use crate::input::queue::InputEvent;
use crate::renderer::frame::Frame;

/// Lifecycle of the scene as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Waiting for the host to report every manifest entry.
    Loading,
    /// Assets are in; every tick animates the scene.
    Running,
}

/// Drives a `Scene` through Loading -> Running.
/// Ticks are ignored until the last asset arrives; the transition happens once.
pub struct FrameLoop {
    scene: Scene,
    tracker: LoadTracker,
    state: RunState,
}

impl FrameLoop {
    pub fn new(scene: Scene, manifest: &AssetManifest) -> Self {
        Self {
            scene,
            tracker: LoadTracker::new(manifest),
            state: RunState::Loading,
        }
    }

    /// Build the scene from `config` and wait on `manifest`.
    pub fn from_config(config: &SceneConfig, manifest: &AssetManifest) -> Result<Self, SceneError> {
        Ok(Self::new(Scene::from_config(config)?, manifest))
    }

    /// Record one loaded asset. Returns the state after the call.
    pub fn asset_ready(&mut self, key: &str) -> RunState {
        self.tracker.mark_ready(key);
        if self.state == RunState::Loading && self.tracker.is_complete() {
            self.state = RunState::Running;
            log::info!(
                "all {} assets ready, scene running",
                self.tracker.required_count()
            );
        }
        self.state
    }

    /// Advance by a frame delta. `None` while loading.
    pub fn tick(&mut self, frame_dt: f32) -> Option<&Frame> {
        match self.state {
            RunState::Loading => None,
            RunState::Running => Some(self.scene.tick(frame_dt)),
        }
    }

    /// Advance to a host timestamp in seconds. `None` while loading.
    /// The first running tick applies no motion.
    pub fn tick_at(&mut self, timestamp: f64) -> Option<&Frame> {
        match self.state {
            RunState::Loading => None,
            RunState::Running => Some(self.scene.tick_at(timestamp)),
        }
    }

    /// Queue an input event. Events queued while loading apply on the first running tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.scene.push_input(event);
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn tracker(&self) -> &LoadTracker {
        &self.tracker
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> AssetManifest {
        AssetManifest::from_json(
            r#"{ "sphere_mesh": "sphere.json", "textures": { "sun": "sun.jpg" } }"#,
        )
        .unwrap()
    }

    fn frame_loop() -> FrameLoop {
        FrameLoop::from_config(&SceneConfig::default(), &manifest()).unwrap()
    }

    #[test]
    fn ticks_ignored_while_loading() {
        let mut fl = frame_loop();
        let sun_before = *fl.scene().find_by_name("sun").unwrap().world();
        assert!(fl.tick(1.0).is_none());
        assert_eq!(fl.scene().clock().frame_count(), 0);
        assert_eq!(*fl.scene().find_by_name("sun").unwrap().world(), sun_before);
    }

    #[test]
    fn runs_once_every_asset_arrives() {
        let mut fl = frame_loop();
        assert_eq!(fl.asset_ready("sun.jpg"), RunState::Loading);
        assert_eq!(fl.asset_ready("bogus.png"), RunState::Loading);
        assert_eq!(fl.asset_ready("sphere.json"), RunState::Running);
        assert!(fl.tick(0.1).is_some());
        // Late or repeated reports keep it running
        assert_eq!(fl.asset_ready("sun.jpg"), RunState::Running);
        assert_eq!(fl.scene().clock().frame_count(), 1);
    }

    #[test]
    fn first_timestamp_tick_applies_no_motion() {
        let mut fl = frame_loop();
        fl.asset_ready("sun.jpg");
        fl.asset_ready("sphere.json");
        assert!(fl.tick_at(10.0).is_some());
        assert_eq!(fl.scene().clock().elapsed(), 0.0);
        fl.tick_at(10.1);
        assert!((fl.scene().clock().elapsed() - 0.1).abs() < 1e-5);
    }

    #[test]
    fn input_queued_while_loading_applies_later() {
        let mut fl = frame_loop();
        let start = fl.scene().camera().distance();
        fl.push_input(InputEvent::Scroll { delta: 50.0 });
        fl.tick(0.0);
        assert_eq!(fl.scene().camera().distance(), start);
        fl.asset_ready("sun.jpg");
        fl.asset_ready("sphere.json");
        fl.tick(0.0);
        assert!(fl.scene().camera().distance() < start);
    }
}
