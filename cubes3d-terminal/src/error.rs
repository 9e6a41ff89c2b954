use cubes3d_core::MeshError;

/// Errors from the terminal application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("frame is {actual} bytes, sink expects {expected}")]
    FrameSize { expected: usize, actual: usize },
    #[error("mesh error: {0}")]
    Mesh(#[from] MeshError),
}
