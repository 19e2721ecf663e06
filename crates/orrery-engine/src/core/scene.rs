use std::collections::HashMap;

use glam::{Mat4, Vec3};

use crate::api::config::{BodyConfig, RevolutionMode, SceneConfig};
use crate::api::types::{BodyId, MaterialId};
use crate::assets::registry::MaterialRegistry;
use crate::components::body::CelestialBody;
use crate::core::hierarchy::BodyGraph;
use crate::core::time::SceneClock;
use crate::error::SceneError;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::camera::{OrbitCamera, Projection};
use crate::renderer::frame::Frame;
use crate::renderer::skybox::Skybox;
use crate::systems::{orbit, render};

/// The animated scene: bodies in a flat arena, the orbit camera, the clock
/// and the static skybox. Built once from a `SceneConfig`; never fails after.
pub struct Scene {
    bodies: Vec<CelestialBody>,
    graph: BodyGraph,
    camera: OrbitCamera,
    projection: Projection,
    clock: SceneClock,
    skybox: Skybox,
    /// Skybox faces resolved to materials, in draw order.
    skybox_draws: Vec<(MaterialId, Mat4)>,
    materials: MaterialRegistry,
    mode: RevolutionMode,
    input: InputQueue,
    frame: Frame,
}

impl Scene {
    /// Validate `config` and build the scene at its rest pose.
    pub fn from_config(config: &SceneConfig) -> Result<Self, SceneError> {
        if config.bodies.is_empty() {
            return Err(SceneError::NoBodies);
        }
        config.camera.validate()?;
        config.projection.validate()?;
        config.validate()?;

        let mut index: HashMap<&str, BodyId> = HashMap::with_capacity(config.bodies.len());
        for (i, body) in config.bodies.iter().enumerate() {
            validate_body(body)?;
            if index.insert(body.name.as_str(), BodyId(i as u32)).is_some() {
                return Err(SceneError::DuplicateName(body.name.clone()));
            }
        }

        let mut parents = Vec::with_capacity(config.bodies.len());
        for body in &config.bodies {
            let parent = match body.parent.as_deref() {
                None => None,
                Some(p) if p == body.name => return Err(SceneError::SelfParent(body.name.clone())),
                Some(p) => match index.get(p) {
                    Some(id) => Some(*id),
                    None => {
                        return Err(SceneError::UnknownParent {
                            body: body.name.clone(),
                            parent: p.to_string(),
                        })
                    }
                },
            };
            parents.push(parent);
        }

        let names: Vec<String> = config.bodies.iter().map(|b| b.name.clone()).collect();
        let graph = BodyGraph::build(&names, &parents)?;

        let mut materials = MaterialRegistry::new();
        let skybox = Skybox::new(config.skybox_distance);
        let skybox_draws = skybox
            .faces()
            .iter()
            .map(|(face, world)| (materials.register(face.material_name()), *world))
            .collect();

        let mut bodies: Vec<CelestialBody> = config
            .bodies
            .iter()
            .zip(&parents)
            .enumerate()
            .map(|(i, (cfg, parent))| {
                let id = BodyId(i as u32);
                let mut body = CelestialBody::new(id, cfg.name.clone(), cfg.kind, cfg.scale)
                    .with_offset(cfg.offset())
                    .with_rates(cfg.spin_rate, cfg.revolution_rate)
                    .with_material(materials.register(&cfg.material), cfg.shading);
                if let Some(p) = parent {
                    body = body.with_parent(*p);
                }
                body
            })
            .collect();
        orbit::place_bodies(&mut bodies, &graph);

        log::info!(
            "scene built: {} bodies ({} roots), {} materials, {:?} revolution",
            bodies.len(),
            graph.roots().len(),
            materials.len(),
            config.revolution_mode
        );

        let mut scene = Self {
            bodies,
            graph,
            camera: OrbitCamera::new(config.camera),
            projection: Projection::new(config.projection),
            clock: SceneClock::new(config.max_frame_dt),
            skybox,
            skybox_draws,
            materials,
            mode: config.revolution_mode,
            input: InputQueue::new(),
            frame: Frame::default(),
        };
        scene.refresh_frame();
        Ok(scene)
    }

    /// Parse a JSON config and build the scene.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let config = SceneConfig::from_json(json)?;
        Self::from_config(&config)
    }

    /// Advance by a host-measured delta (seconds) and return the new frame.
    pub fn tick(&mut self, frame_dt: f32) -> &Frame {
        let dt = self.clock.advance(frame_dt);
        self.step(dt)
    }

    /// Advance to a host timestamp (seconds). The first call applies no motion.
    pub fn tick_at(&mut self, timestamp: f64) -> &Frame {
        let dt = self.clock.advance_to(timestamp);
        self.step(dt)
    }

    fn step(&mut self, dt: f32) -> &Frame {
        orbit::step_bodies(&mut self.bodies, &self.graph, self.mode, dt);

        for event in self.input.drain() {
            self.handle_input(event);
        }
        self.camera.update();

        self.refresh_frame();
        &self.frame
    }

    fn refresh_frame(&mut self) {
        render::collect_draws(&self.skybox_draws, &self.bodies, &mut self.frame);
        self.frame.view = self.camera.view_matrix();
        self.frame.projection = self.projection.matrix();
        self.frame.camera_position = self.camera.position();
        self.frame.light_position = render::light_position(&self.bodies);
    }

    /// Queue an event for the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Apply an event now. Camera changes show after the next `camera.update()`.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Drag { dx, dy } => self.camera.drag(dx, dy),
            InputEvent::Scroll { delta } => self.camera.scroll(delta),
            InputEvent::Resize { width, height } => self.set_viewport(width, height),
            InputEvent::ResetCamera => {
                self.camera.reset();
                log::debug!("camera reset");
            }
        }
    }

    /// Update the projection aspect ratio from a canvas size.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.projection.resize(width, height);
    }

    /// The frame produced by the latest tick (the rest pose before any tick).
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn get(&self, id: BodyId) -> Option<&CelestialBody> {
        self.bodies.get(id.index())
    }

    pub fn find_by_name(&self, name: &str) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.name == name)
    }

    /// Bodies in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.iter()
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn graph(&self) -> &BodyGraph {
        &self.graph
    }

    /// Body names in update order.
    pub fn update_order(&self) -> Vec<&str> {
        self.graph
            .update_order()
            .iter()
            .map(|id| self.bodies[id.index()].name.as_str())
            .collect()
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_position(&self) -> Vec3 {
        self.camera.position()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }

    pub fn aspect(&self) -> f32 {
        self.projection.aspect()
    }

    pub fn clock(&self) -> &SceneClock {
        &self.clock
    }

    pub fn skybox(&self) -> &Skybox {
        &self.skybox
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    pub fn mode(&self) -> RevolutionMode {
        self.mode
    }
}

fn validate_body(body: &BodyConfig) -> Result<(), SceneError> {
    if !(body.scale.is_finite() && body.scale > 0.0) {
        return Err(SceneError::InvalidScale {
            body: body.name.clone(),
            scale: body.scale,
        });
    }
    let non_finite = |field: &'static str| SceneError::NonFiniteValue {
        body: body.name.clone(),
        field,
    };
    if body.orbit_offset.iter().any(|v| !v.is_finite()) {
        return Err(non_finite("orbit_offset"));
    }
    if !body.spin_rate.is_finite() {
        return Err(non_finite("spin_rate"));
    }
    if !body.revolution_rate.is_finite() {
        return Err(non_finite("revolution_rate"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{BodyKind, Shading};

    fn sun() -> BodyConfig {
        BodyConfig::new("sun", BodyKind::Star, 0.05).with_spin(60.0)
    }

    fn earth() -> BodyConfig {
        BodyConfig::new("earth", BodyKind::Planet, 0.01)
            .with_parent("sun")
            .with_offset(Vec3::new(9.0, 0.0, 0.0))
            .with_spin(25.0)
            .with_revolution(25.0)
    }

    fn build(bodies: Vec<BodyConfig>) -> Result<Scene, SceneError> {
        Scene::from_config(&SceneConfig::with_bodies(bodies))
    }

    #[test]
    fn default_scene_builds() {
        let scene = Scene::from_config(&SceneConfig::default()).unwrap();
        assert_eq!(scene.len(), 10);
        assert_eq!(
            scene.update_order(),
            vec![
                "sun", "mercury", "venus", "earth", "moon", "mars", "jupiter", "saturn", "uranus",
                "neptune"
            ]
        );
        // 6 skybox faces + 10 bodies
        assert_eq!(scene.frame().draws.len(), 16);
        assert_eq!(scene.frame().skybox_count, 6);
        assert_eq!(
            scene.find_by_name("sun").unwrap().shading,
            Shading::Emissive
        );
    }

    #[test]
    fn rest_pose_places_bodies_at_offsets() {
        let scene = build(vec![sun(), earth()]).unwrap();
        let earth = scene.find_by_name("earth").unwrap();
        assert!((earth.position() - Vec3::new(9.0, 0.0, 0.0)).length() < 1e-5);
        assert_eq!(scene.frame().light_position, Vec3::ZERO);
    }

    #[test]
    fn rejects_empty_scene() {
        assert!(matches!(build(vec![]), Err(SceneError::NoBodies)));
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = build(vec![sun(), sun()]).err().unwrap();
        assert!(matches!(err, SceneError::DuplicateName(name) if name == "sun"));
    }

    #[test]
    fn rejects_self_parent() {
        let err = build(vec![sun().with_parent("sun")]).err().unwrap();
        assert!(matches!(err, SceneError::SelfParent(name) if name == "sun"));
    }

    #[test]
    fn rejects_unknown_parent() {
        let err = build(vec![sun(), earth().with_parent("vulcan")]).err().unwrap();
        assert!(matches!(
            err,
            SceneError::UnknownParent { parent, .. } if parent == "vulcan"
        ));
    }

    #[test]
    fn rejects_parent_cycle() {
        let a = BodyConfig::new("a", BodyKind::Planet, 1.0).with_parent("b");
        let b = BodyConfig::new("b", BodyKind::Planet, 1.0).with_parent("a");
        let err = build(vec![sun(), a, b]).err().unwrap();
        assert!(matches!(err, SceneError::Cycle { .. }));
    }

    #[test]
    fn rejects_bad_values() {
        let err = build(vec![BodyConfig::new("sun", BodyKind::Star, 0.0)]).err().unwrap();
        assert!(matches!(err, SceneError::InvalidScale { .. }));

        let err = build(vec![sun().with_spin(f32::NAN)]).err().unwrap();
        assert!(matches!(err, SceneError::NonFiniteValue { field: "spin_rate", .. }));

        let mut config = SceneConfig::with_bodies(vec![sun()]);
        config.skybox_distance = -1.0;
        assert!(matches!(
            Scene::from_config(&config),
            Err(SceneError::InvalidSkybox(_))
        ));

        let mut config = SceneConfig::with_bodies(vec![sun()]);
        config.max_frame_dt = Some(-1.0);
        assert!(matches!(
            Scene::from_config(&config),
            Err(SceneError::InvalidFrameCap(_))
        ));

        let mut config = SceneConfig::with_bodies(vec![sun()]);
        config.camera.pitch_limit_deg = 0.05;
        assert!(matches!(
            Scene::from_config(&config),
            Err(SceneError::InvalidCamera(_))
        ));

        let mut config = SceneConfig::with_bodies(vec![sun()]);
        config.camera.min_distance = 0.0;
        assert!(matches!(
            Scene::from_config(&config),
            Err(SceneError::InvalidCamera(_))
        ));
    }

    #[test]
    fn from_json_reports_parse_errors() {
        assert!(matches!(Scene::from_json("{ nope"), Err(SceneError::Config(_))));
        let scene = Scene::from_json(r#"{ "skybox_distance": 50.0 }"#).unwrap();
        assert_eq!(scene.skybox().distance(), 50.0);
    }

    #[test]
    fn queued_input_applies_on_tick() {
        let mut scene = build(vec![sun()]).unwrap();
        let before = scene.camera().distance();
        scene.push_input(InputEvent::Scroll { delta: 100.0 });
        assert_eq!(scene.camera().distance(), before);
        scene.tick(0.0);
        assert!(scene.camera().distance() < before);

        scene.push_input(InputEvent::Resize {
            width: 1000.0,
            height: 500.0,
        });
        scene.push_input(InputEvent::ResetCamera);
        let frame = scene.tick(0.0);
        assert!((frame.camera_position.length() - before).abs() < 1e-4);
        assert_eq!(scene.aspect(), 2.0);
    }

    #[test]
    fn materials_resolve_by_name() {
        let scene = build(vec![sun(), earth().with_material("earth_day")]).unwrap();
        let earth = scene.find_by_name("earth").unwrap();
        assert_eq!(scene.materials().name(earth.material), Some("earth_day"));
        // Skybox faces take the first six ids
        assert_eq!(scene.materials().len(), 8);
        assert_eq!(scene.frame().skybox_draws()[0].material, MaterialId(0));
    }
}
