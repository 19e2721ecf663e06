//! Scene construction errors.
//!
//! Everything that can go wrong is caught while building a `Scene`;
//! the per-frame update path has no error returns.

/// Errors raised while parsing configuration JSON.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The scene config or asset manifest was not valid JSON for its schema.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] serde_json::Error),
}

/// Errors raised while validating a scene description.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("scene has no bodies")]
    NoBodies,

    #[error("body `{0}` is declared twice")]
    DuplicateName(String),

    #[error("body `{0}` declares itself as its parent")]
    SelfParent(String),

    #[error("body `{body}` references unknown parent `{parent}`")]
    UnknownParent { body: String, parent: String },

    /// A chain of parent links loops back on itself.
    /// `path` lists the bodies in the loop, starting and ending with the same name.
    #[error("parent cycle: {}", path.join(" -> "))]
    Cycle { path: Vec<String> },

    #[error("body `{body}` has invalid scale {scale} (must be finite and > 0)")]
    InvalidScale { body: String, scale: f32 },

    #[error("body `{body}` has a non-finite {field}")]
    NonFiniteValue { body: String, field: &'static str },

    #[error("invalid camera config: {0}")]
    InvalidCamera(&'static str),

    #[error("invalid projection config: {0}")]
    InvalidProjection(&'static str),

    #[error("skybox distance {0} must be finite and > 0")]
    InvalidSkybox(f32),

    #[error("max_frame_dt {0} must be finite and > 0")]
    InvalidFrameCap(f32),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
