pub mod camera;
pub mod frame;
pub mod instance;
pub mod skybox;
pub mod traits;

// Re-export key types for convenient access
pub use camera::{OrbitCamera, Projection};
pub use frame::{DrawItem, Frame};
pub use instance::{DrawBuffer, DrawInstance};
pub use skybox::{Skybox, SkyboxFace};
pub use traits::{DrawTiming, FrameData, Renderer};
