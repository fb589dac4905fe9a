//! Error types for start-up and presentation.
//!
//! Nothing in the per-frame update returns these: once a [`Session`] exists
//! the hot loop is infallible. Errors only surface while settings, levels and
//! assets are being loaded, or when the GPU surface cannot be created.
//!
//! [`Session`]: crate::session::Session

use std::path::PathBuf;

/// Malformed level layout text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("level layout is empty")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },

    #[error("unknown cell '{ch}' at column {col}, row {row}")]
    InvalidCell { col: usize, row: usize, ch: char },

    #[error("level has more than one player start")]
    DuplicatePlayerStart,
}

/// Invalid settings or level content detected at start-up.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error(transparent)]
    Map(#[from] MapError),

    #[error("player start cell ({0}, {1}) is not free floor")]
    PlayerStartBlocked(i32, i32),

    #[error("entity at cell ({0}, {1}) is placed inside a wall")]
    EntityInWall(i32, i32),
}

/// Texture loading failures.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("resource directory {} does not exist", .0.display())]
    MissingRoot(PathBuf),

    #[error("failed to decode {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("required texture `{0}` was not found")]
    MissingKey(String),
}

/// GPU setup failures in the presenter.
#[derive(Debug, thiserror::Error)]
pub enum PresentError {
    #[error(transparent)]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error(transparent)]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error(transparent)]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}

/// Everything that can stop the engine from starting or keep running.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Present(#[from] PresentError),

    #[error(transparent)]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
}
