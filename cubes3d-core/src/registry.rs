//! Buffer registry shared by meshes with identical vertex data
use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::MeshError;
use crate::mesh::{Mesh, MeshHash};

/// Opaque handle to an uploaded vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u32);

/// Maps mesh content hashes to uploaded buffers.
///
/// Owned by the application and handed to the renderer; registering the same
/// vertex data twice reuses the first buffer.
#[derive(Debug, Default)]
pub struct MeshRegistry {
    handles: HashMap<MeshHash, BufferHandle>,
    buffers: HashMap<BufferHandle, Arc<[f32]>>,
    next_handle: u32,
}

impl MeshRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload `mesh`'s vertex data unless a buffer with the same hash exists.
    pub fn register(&mut self, mesh: &Mesh) -> BufferHandle {
        if let Some(handle) = self.handles.get(&mesh.hash()) {
            return *handle;
        }

        let handle = BufferHandle(self.next_handle);
        self.next_handle += 1;
        self.handles.insert(mesh.hash(), handle);
        self.buffers.insert(handle, mesh.shared_buffer());
        debug!(
            hash = %mesh.hash(),
            handle = handle.0,
            vertices = mesh.vertex_count(),
            "registered mesh buffer"
        );
        handle
    }

    pub fn handle(&self, hash: MeshHash) -> Result<BufferHandle, MeshError> {
        self.handles
            .get(&hash)
            .copied()
            .ok_or(MeshError::Unregistered(hash))
    }

    pub fn buffer(&self, handle: BufferHandle) -> Option<&[f32]> {
        self.buffers.get(&handle).map(|b| &b[..])
    }

    /// Look up the buffer to draw `mesh` with.
    pub fn bind(&self, mesh: &Mesh) -> Result<&[f32], MeshError> {
        let handle = self.handle(mesh.hash())?;
        self.buffer(handle).ok_or(MeshError::Unregistered(mesh.hash()))
    }

    pub fn contains(&self, hash: MeshHash) -> bool {
        self.handles.contains_key(&hash)
    }

    /// Drop the buffer for `hash`, returning the handle it had.
    pub fn remove(&mut self, hash: MeshHash) -> Option<BufferHandle> {
        let handle = self.handles.remove(&hash)?;
        self.buffers.remove(&handle);
        debug!(%hash, handle = handle.0, "released mesh buffer");
        Some(handle)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn clear(&mut self) {
        self.handles.clear();
        self.buffers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_deduplicates() {
        let mut registry = MeshRegistry::new();
        let a = registry.register(&Mesh::cube());
        let b = registry.register(&Mesh::cube());
        let c = registry.register(&Mesh::plane());

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_bind() {
        let mut registry = MeshRegistry::new();
        let cube = Mesh::cube();
        registry.register(&cube);

        let buffer = registry.bind(&cube).unwrap();
        assert_eq!(buffer, cube.vertex_buffer());
    }

    #[test]
    fn test_unregistered() {
        let registry = MeshRegistry::new();
        let plane = Mesh::plane();
        assert!(registry.is_empty());
        assert!(matches!(registry.bind(&plane), Err(MeshError::Unregistered(h)) if h == plane.hash()));
        assert!(registry.handle(plane.hash()).is_err());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut registry = MeshRegistry::new();
        let cube = Mesh::cube();
        let handle = registry.register(&cube);
        registry.register(&Mesh::plane());

        assert_eq!(registry.remove(cube.hash()), Some(handle));
        assert!(!registry.contains(cube.hash()));
        assert!(registry.buffer(handle).is_none());
        assert_eq!(registry.remove(cube.hash()), None);

        // handles are never reused
        let again = registry.register(&cube);
        assert_ne!(again, handle);

        registry.clear();
        assert!(registry.is_empty());
    }
}
