pub mod api;
pub mod assets;
pub mod bridge;
pub mod components;
pub mod core;
pub mod error;
pub mod input;
pub mod math;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::{BodyConfig, CameraConfig, ProjectionConfig, RevolutionMode, SceneConfig};
pub use api::types::{BodyId, BodyKind, MaterialId, Shading};
pub use assets::manifest::AssetManifest;
pub use assets::registry::{LoadTracker, MaterialRegistry};
pub use bridge::protocol::{FrameHeader, ProtocolLayout};
pub use components::body::CelestialBody;
pub use core::frame_loop::{FrameLoop, RunState};
pub use core::hierarchy::BodyGraph;
pub use core::scene::Scene;
pub use core::time::SceneClock;
pub use error::{ConfigError, SceneError};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::camera::{OrbitCamera, Projection};
pub use renderer::frame::{DrawItem, Frame};
pub use renderer::instance::{DrawBuffer, DrawInstance};
pub use renderer::skybox::{Skybox, SkyboxFace};
pub use renderer::traits::{DrawTiming, FrameData, Renderer};
pub use systems::render::build_draw_buffer;
