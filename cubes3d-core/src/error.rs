use crate::mesh::{MeshHash, FLOATS_PER_VERTEX};

/// Errors from mesh construction and buffer lookup.
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("vertex buffer length {len} is not a multiple of {}", FLOATS_PER_VERTEX)]
    MalformedBuffer { len: usize },
    #[error("mesh {0} has no registered buffer")]
    Unregistered(MeshHash),
}
