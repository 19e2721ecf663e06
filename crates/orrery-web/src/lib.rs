//! `#[wasm_bindgen]` exports for the orrery scene.
//!
//! The host calls `orrery_init` once, reports each loaded file through
//! `orrery_asset_ready`, then calls `orrery_tick` from its animation frame
//! callback and reads the frame buffer via the pointer accessors.

pub mod runner;

pub use runner::SceneRunner;

use std::cell::RefCell;

use orrery_engine::InputEvent;
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SceneRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the live runner. Logs and returns `None` before init.
fn with_runner<R>(f: impl FnOnce(&mut SceneRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("orrery: not initialized, call orrery_init() first");
                None
            }
        }
    })
}

fn install_logging() {
    console_error_panic_hook::set_once();
    // A second init returns Err; the first logger stays installed
    let _ = console_log::init_with_level(log::Level::Info);
}

fn init_runner(config_json: &str, manifest_json: &str) -> bool {
    install_logging();
    match SceneRunner::from_json(config_json, manifest_json) {
        Ok(runner) => {
            RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
            log::info!("orrery: initialized");
            true
        }
        Err(err) => {
            log::error!("orrery: scene setup failed: {err}");
            RUNNER.with(|cell| *cell.borrow_mut() = None);
            false
        }
    }
}

/// Build the scene from JSON (empty string = default solar system) with the
/// stock asset manifest. Returns false and logs on invalid input.
#[wasm_bindgen]
pub fn orrery_init(config_json: &str) -> bool {
    init_runner(config_json, "")
}

/// Like `orrery_init`, with a custom asset manifest.
#[wasm_bindgen]
pub fn orrery_init_with_manifest(config_json: &str, manifest_json: &str) -> bool {
    init_runner(config_json, manifest_json)
}

/// Report one loaded file by its manifest path. Returns true once running.
#[wasm_bindgen]
pub fn orrery_asset_ready(key: &str) -> bool {
    with_runner(|r| r.asset_ready(key)).unwrap_or(false)
}

/// Every file the host must load, as a JS array of strings.
#[wasm_bindgen]
pub fn orrery_required_assets(manifest_json: &str) -> js_sys::Array {
    let manifest = if manifest_json.trim().is_empty() {
        Ok(orrery_engine::AssetManifest::solar_system())
    } else {
        orrery_engine::AssetManifest::from_json(manifest_json)
    };
    match manifest {
        Ok(m) => m.required_keys().iter().map(|k| JsValue::from_str(k)).collect(),
        Err(err) => {
            log::error!("orrery: bad asset manifest: {err}");
            js_sys::Array::new()
        }
    }
}

#[wasm_bindgen]
pub fn orrery_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

/// Tick from a `requestAnimationFrame` timestamp in milliseconds.
#[wasm_bindgen]
pub fn orrery_tick_at(timestamp_ms: f64) {
    with_runner(|r| r.tick_at(timestamp_ms / 1000.0));
}

#[wasm_bindgen]
pub fn orrery_is_running() -> bool {
    with_runner(|r| r.is_running()).unwrap_or(false)
}

// ---- Input ----

#[wasm_bindgen]
pub fn orrery_drag(dx: f32, dy: f32) {
    with_runner(|r| r.push_input(InputEvent::Drag { dx, dy }));
}

#[wasm_bindgen]
pub fn orrery_scroll(delta: f32) {
    with_runner(|r| r.push_input(InputEvent::Scroll { delta }));
}

#[wasm_bindgen]
pub fn orrery_resize(width: f32, height: f32) {
    with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
}

#[wasm_bindgen]
pub fn orrery_reset_camera() {
    with_runner(|r| r.push_input(InputEvent::ResetCamera));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn orrery_frame_buffer_ptr() -> *const f32 {
    with_runner(|r| r.frame_buffer_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn orrery_draws_ptr() -> *const f32 {
    with_runner(|r| r.draws_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn orrery_draw_count() -> u32 {
    with_runner(|r| r.draw_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn orrery_skybox_count() -> u32 {
    with_runner(|r| r.skybox_count()).unwrap_or(0)
}

// ---- Layout accessors ----

#[wasm_bindgen]
pub fn orrery_max_draws() -> u32 {
    with_runner(|r| r.max_draws()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn orrery_view_offset() -> u32 {
    with_runner(|r| r.view_offset()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn orrery_projection_offset() -> u32 {
    with_runner(|r| r.projection_offset()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn orrery_draw_data_offset() -> u32 {
    with_runner(|r| r.draw_data_offset()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn orrery_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
}

// ---- Materials ----

#[wasm_bindgen]
pub fn orrery_material_count() -> u32 {
    with_runner(|r| r.material_count()).unwrap_or(0)
}

/// Material name for a draw's material index, or undefined.
#[wasm_bindgen]
pub fn orrery_material_name(id: u32) -> Option<String> {
    with_runner(|r| r.material_name(id)).flatten()
}
