use orrery_engine::bridge::protocol::{FrameHeader, ProtocolLayout};
use orrery_engine::systems::render::build_draw_buffer;
use orrery_engine::{
    AssetManifest, ConfigError, DrawBuffer, FrameLoop, InputEvent, MaterialId, RunState,
    SceneConfig, SceneError,
};

/// Wires a `FrameLoop` to the flat buffer the JavaScript renderer reads.
///
/// `lib.rs` keeps one runner in a `thread_local!` and exports free functions
/// via `#[wasm_bindgen]`, because wasm-bindgen cannot export it directly.
pub struct SceneRunner {
    frame_loop: FrameLoop,
    draw_buffer: DrawBuffer,
    layout: ProtocolLayout,
    /// Header + view + projection + draws, rewritten every running tick.
    frame_buffer: Vec<f32>,
    frames: u64,
}

impl SceneRunner {
    pub fn new(config: &SceneConfig, manifest: &AssetManifest) -> Result<Self, SceneError> {
        let frame_loop = FrameLoop::from_config(config, manifest)?;
        let layout = ProtocolLayout::for_bodies(frame_loop.scene().len());
        let mut runner = Self {
            frame_loop,
            draw_buffer: DrawBuffer::new(),
            frame_buffer: layout.allocate(),
            layout,
            frames: 0,
        };
        // The rest pose is drawable before the first tick
        runner.pack_current_frame();
        Ok(runner)
    }

    /// Build from JSON. An empty string selects the defaults for either input.
    pub fn from_json(config_json: &str, manifest_json: &str) -> Result<Self, SceneError> {
        let config = if config_json.trim().is_empty() {
            SceneConfig::default()
        } else {
            SceneConfig::from_json(config_json)?
        };
        let manifest = if manifest_json.trim().is_empty() {
            AssetManifest::solar_system()
        } else {
            AssetManifest::from_json(manifest_json).map_err(ConfigError::ParseError)?
        };
        Self::new(&config, &manifest)
    }

    /// Report one loaded asset. Returns true once the scene is running.
    pub fn asset_ready(&mut self, key: &str) -> bool {
        self.frame_loop.asset_ready(key) == RunState::Running
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.frame_loop.push_input(event);
    }

    /// Run one frame tick from a host delta (seconds). No-op while loading.
    pub fn tick(&mut self, dt: f32) {
        if self.frame_loop.tick(dt).is_some() {
            self.pack_current_frame();
        }
    }

    /// Run one frame tick from a host timestamp (seconds). No-op while loading.
    pub fn tick_at(&mut self, timestamp: f64) {
        if self.frame_loop.tick_at(timestamp).is_some() {
            self.pack_current_frame();
        }
    }

    fn pack_current_frame(&mut self) {
        let scene = self.frame_loop.scene();
        let frame = scene.frame();
        build_draw_buffer(frame, &mut self.draw_buffer);
        let header = FrameHeader {
            frame_counter: self.frames,
            running: self.frame_loop.is_running(),
            elapsed: scene.clock().elapsed(),
        };
        self.layout
            .write_frame(&mut self.frame_buffer, header, frame, &self.draw_buffer);
        self.frames += 1;
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    pub fn frame_loop(&self) -> &FrameLoop {
        &self.frame_loop
    }

    // ---- Pointer accessors for zero-copy reads ----

    pub fn frame_buffer_ptr(&self) -> *const f32 {
        self.frame_buffer.as_ptr()
    }

    pub fn frame_buffer(&self) -> &[f32] {
        &self.frame_buffer
    }

    pub fn draws_ptr(&self) -> *const f32 {
        self.draw_buffer.instances_ptr()
    }

    pub fn draw_count(&self) -> u32 {
        self.draw_buffer.instance_count()
    }

    pub fn skybox_count(&self) -> u32 {
        self.draw_buffer.body_start
    }

    // ---- Layout accessors (read by JavaScript via wasm_bindgen exports) ----

    pub fn max_draws(&self) -> u32 {
        self.layout.max_draws as u32
    }

    pub fn view_offset(&self) -> u32 {
        self.layout.view_offset as u32
    }

    pub fn projection_offset(&self) -> u32 {
        self.layout.projection_offset as u32
    }

    pub fn draw_data_offset(&self) -> u32 {
        self.layout.draw_data_offset as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    // ---- Materials ----

    pub fn material_count(&self) -> u32 {
        self.frame_loop.scene().materials().len() as u32
    }

    pub fn material_name(&self, id: u32) -> Option<String> {
        self.frame_loop
            .scene()
            .materials()
            .name(MaterialId(id))
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::bridge::protocol::{HEADER_DRAW_COUNT, HEADER_RUNNING, HEADER_SKYBOX_COUNT};

    fn running_runner() -> SceneRunner {
        let mut runner = SceneRunner::from_json("", "").unwrap();
        let manifest = AssetManifest::solar_system();
        for key in manifest.required_keys() {
            runner.asset_ready(&key);
        }
        runner
    }

    #[test]
    fn rest_pose_is_packed_before_running() {
        let runner = SceneRunner::from_json("", "").unwrap();
        assert!(!runner.is_running());
        assert_eq!(runner.draw_count(), 16);
        assert_eq!(runner.skybox_count(), 6);
        assert_eq!(runner.frame_buffer()[HEADER_DRAW_COUNT], 16.0);
        assert_eq!(runner.frame_buffer()[HEADER_RUNNING], 0.0);
        assert_eq!(
            runner.frame_buffer().len(),
            runner.buffer_total_floats() as usize
        );
    }

    #[test]
    fn tick_repacks_when_running() {
        let mut runner = running_runner();
        assert!(runner.is_running());
        runner.tick(0.5);
        let buf = runner.frame_buffer();
        assert_eq!(buf[HEADER_RUNNING], 1.0);
        assert_eq!(buf[HEADER_SKYBOX_COUNT], 6.0);
        // Earth is draw 6 + 3; its translation column moved off the x axis
        let earth = runner.draw_data_offset() as usize + 9 * 20;
        assert!(buf[earth + 14].abs() > 0.1);
    }

    #[test]
    fn bad_json_is_reported() {
        assert!(matches!(SceneRunner::from_json("{", ""), Err(SceneError::Config(_))));
        assert!(matches!(SceneRunner::from_json("", "[]"), Err(SceneError::Config(_))));
    }

    #[test]
    fn material_names_round_trip() {
        let runner = SceneRunner::from_json("", "").unwrap();
        assert_eq!(runner.material_count(), 16);
        assert_eq!(runner.material_name(6).as_deref(), Some("sun"));
        assert!(runner.material_name(99).is_none());
    }
}
